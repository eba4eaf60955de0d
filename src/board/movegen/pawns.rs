use super::super::{AttackTables, Bitboard, Board, Piece, Square};
use super::Candidates;

impl Board {
    /// Forward advances are moves; diagonal attacks onto enemy pieces or
    /// onto a live en passant target are captures.
    pub(crate) fn pawn_candidates(&self, tables: &AttackTables, from: Square) -> Candidates {
        let color = self.side_to_move;
        let dir = color.pawn_direction();

        let mut moves = Bitboard::EMPTY;
        if let Some(one) = from.offset(0, dir).filter(|&sq| self.is_empty(sq)) {
            moves.set(one);
            if from.rank() == color.pawn_start_rank() {
                if let Some(two) = one.offset(0, dir).filter(|&sq| self.is_empty(sq)) {
                    moves.set(two);
                }
            }
        }

        let attacks = tables.pawn_attacks(color, from);
        let mut captures = attacks & self.occupancy(color.opponent());
        if let Some(target) = self.en_passant_target_for(from) {
            if attacks.contains(target) {
                captures.set(target);
            }
        }

        Candidates { moves, captures }
    }

    /// The en passant target, if the pawn it refers to is still there to be
    /// taken and the target square itself is empty.
    fn en_passant_target_for(&self, from: Square) -> Option<Square> {
        let target = self.en_passant?;
        let color = self.side_to_move;
        let bypassed = target.offset(0, -color.pawn_direction())?;
        let live = self.is_empty(target)
            && bypassed.rank() == from.rank()
            && self.pieces(color.opponent(), Piece::Pawn).contains(bypassed);
        live.then_some(target)
    }
}
