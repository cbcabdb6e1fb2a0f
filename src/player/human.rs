use rand::rngs::SmallRng;

use crate::common::GameError;
use crate::view::{CellView, OpponentView};

use super::Commander;

/// Player whose shots are supplied from outside the engine.
///
/// The UI stores a coordinate with [`HumanPlayer::set_next_shot`]; the next
/// [`Commander::choose_shot`] consumes it. Until then the player reports no
/// move, so the caller's event loop is never blocked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HumanPlayer {
    next_shot: Option<(usize, usize)>,
}

impl HumanPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a shot at (`row`, `col`). Only unshot cells are accepted; on
    /// error any previously queued shot is dropped.
    pub fn set_next_shot(
        &mut self,
        row: usize,
        col: usize,
        view: &OpponentView,
    ) -> Result<(), GameError> {
        self.next_shot = None;
        match view.get(row, col) {
            None => Err(GameError::OutOfBounds { row, col }),
            Some(CellView::Unknown) => {
                self.next_shot = Some((row, col));
                Ok(())
            }
            Some(_) => Err(GameError::AlreadyShot { row, col }),
        }
    }

    pub fn clear_next_shot(&mut self) {
        self.next_shot = None;
    }
}

impl Commander for HumanPlayer {
    fn choose_shot(&mut self, _rng: &mut SmallRng, _view: &OpponentView) -> Option<(usize, usize)> {
        self.next_shot.take()
    }
}
