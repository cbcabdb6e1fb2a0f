// Targeting heuristic for the automated player.
// Memoryless: every call recomputes its choice from the visible grid.

use alloc::vec::Vec;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::BOARD_SIZE;
use crate::ship::Orientation;
use crate::view::{CellView, OpponentView};

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// Pick the next cell to fire at, or `None` when nothing is left unknown.
///
/// Priority, first match wins:
/// 1. extend a run of two or more hits past one of its ends,
/// 2. a random unknown neighbour of a hit cell,
/// 3. a uniformly random unknown cell.
pub fn choose_target<R: Rng + ?Sized>(view: &OpponentView, rng: &mut R) -> Option<(usize, usize)> {
    directed_shot(view)
        .or_else(|| adjacent_to_hit(view, rng))
        .or_else(|| random_unknown(view, rng))
}

/// Maximal runs of two or more adjacent hits along `orient`, as
/// (start, end) cells, scanned top-to-bottom and left-to-right.
pub fn hit_runs(
    view: &OpponentView,
    orient: Orientation,
) -> impl Iterator<Item = ((usize, usize), (usize, usize))> + '_ {
    (0..GRID_SIZE * GRID_SIZE).filter_map(move |idx| {
        let (r, c) = (idx / GRID_SIZE, idx % GRID_SIZE);
        let is_hit = |r: usize, c: usize| view.get(r, c) == Some(CellView::Hit);
        // only start at the first cell of a run
        let before = match orient {
            Orientation::Horizontal => c.checked_sub(1).map(|pc| (r, pc)),
            Orientation::Vertical => r.checked_sub(1).map(|pr| (pr, c)),
        };
        if !is_hit(r, c) || before.is_some_and(|(pr, pc)| is_hit(pr, pc)) {
            return None;
        }
        let mut len = 1;
        loop {
            let (nr, nc) = orient.step(r, c, len);
            if !is_hit(nr, nc) {
                break;
            }
            len += 1;
        }
        (len >= 2).then(|| ((r, c), orient.step(r, c, len - 1)))
    })
}

/// Shoot past the end of a detected line of hits: right then left for
/// horizontal runs, below then above for vertical runs.
pub fn directed_shot(view: &OpponentView) -> Option<(usize, usize)> {
    [Orientation::Horizontal, Orientation::Vertical]
        .into_iter()
        .flat_map(|orient| hit_runs(view, orient).map(move |run| (orient, run)))
        .find_map(|(orient, ((r0, c0), (r1, c1)))| {
            let (after, before) = match orient {
                Orientation::Horizontal => ((r1, c1 + 1), c0.checked_sub(1).map(|c| (r0, c))),
                Orientation::Vertical => ((r1 + 1, c1), r0.checked_sub(1).map(|r| (r, c0))),
            };
            if view.is_unknown(after.0, after.1) {
                Some(after)
            } else {
                before.filter(|&(r, c)| view.is_unknown(r, c))
            }
        })
}

/// Unknown orthogonal neighbours of (`row`, `col`): below, above, right, left.
pub fn unknown_neighbours(view: &OpponentView, row: usize, col: usize) -> Vec<(usize, usize)> {
    [
        Some((row + 1, col)),
        row.checked_sub(1).map(|r| (r, col)),
        Some((row, col + 1)),
        col.checked_sub(1).map(|c| (row, c)),
    ]
    .into_iter()
    .flatten()
    .filter(|&(r, c)| view.is_unknown(r, c))
    .collect()
}

/// Random unknown neighbour of the first hit cell, in row-major order,
/// that still has one. Hits whose neighbours are all resolved are skipped.
pub fn adjacent_to_hit<R: Rng + ?Sized>(view: &OpponentView, rng: &mut R) -> Option<(usize, usize)> {
    view.cells()
        .filter(|&(_, v)| v == CellView::Hit)
        .map(|((r, c), _)| unknown_neighbours(view, r, c))
        .find(|candidates| !candidates.is_empty())
        .and_then(|candidates| candidates.choose(rng).copied())
}

/// Uniformly random unknown cell.
pub fn random_unknown<R: Rng + ?Sized>(view: &OpponentView, rng: &mut R) -> Option<(usize, usize)> {
    let unknown: Vec<(usize, usize)> = view
        .cells()
        .filter(|&(_, v)| v == CellView::Unknown)
        .map(|(pos, _)| pos)
        .collect();
    unknown.choose(rng).copied()
}
