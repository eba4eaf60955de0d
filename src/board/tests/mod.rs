//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `edge_cases.rs` - Special positions and rule interactions
//! - `inverse.rs` - Applying a move and undoing it by hand
//! - `proptest.rs` - Property-based tests over random play

mod edge_cases;

use rand::prelude::*;

use crate::board::{AttackTables, Board, Move, Square};

pub(super) fn tables() -> &'static AttackTables {
    AttackTables::shared().unwrap()
}

pub(super) fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

/// Picks a random candidate of the side to move, `None` if there is none.
pub(super) fn random_candidate(board: &Board, rng: &mut StdRng) -> Option<(Square, Square)> {
    let all = board.side_candidates(tables());
    let (from, candidates) = all.choose(rng)?;
    let targets: Vec<Square> = candidates.all().iter().collect();
    let to = *targets.choose(rng)?;
    Some((*from, to))
}

/// Plays up to `plies` random candidate moves and returns what was played.
pub(super) fn random_play(board: &mut Board, rng: &mut StdRng, plies: usize) -> Vec<Move> {
    let mut played = Vec::with_capacity(plies);
    for _ in 0..plies {
        let Some((from, to)) = random_candidate(board, rng) else {
            break;
        };
        played.push(board.apply_move(tables(), from, to).unwrap());
    }
    played
}
