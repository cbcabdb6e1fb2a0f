use rand::rngs::SmallRng;

use crate::ai;
use crate::view::OpponentView;

use super::Commander;

/// Computer player driven by the targeting heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomatedPlayer;

impl AutomatedPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Commander for AutomatedPlayer {
    fn choose_shot(&mut self, rng: &mut SmallRng, view: &OpponentView) -> Option<(usize, usize)> {
        ai::choose_target(view, rng)
    }
}
