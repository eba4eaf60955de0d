use super::super::{AttackTables, Board, Piece, Side, Square};
use super::Candidates;

impl Board {
    pub(crate) fn slider_candidates(
        &self,
        tables: &AttackTables,
        from: Square,
        piece: Piece,
    ) -> Candidates {
        let occupancy = self.occupancy(Side::Both);
        let targets = match piece {
            Piece::Bishop => tables.bishop_attacks(from, occupancy),
            Piece::Rook => tables.rook_attacks(from, occupancy),
            _ => tables.queen_attacks(from, occupancy),
        };
        Candidates::split(self, targets)
    }
}
