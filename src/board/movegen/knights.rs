use super::super::{AttackTables, Board, Square};
use super::Candidates;

impl Board {
    pub(crate) fn knight_candidates(&self, tables: &AttackTables, from: Square) -> Candidates {
        Candidates::split(self, tables.knight_attacks(from))
    }
}
