//! Click-driven move selection on top of a `Board`.
//!
//! A `Game` is either `Idle` or has one square `Selected` together with the
//! candidates computed for it. Selecting, applying and cancelling are the
//! only ways to change it; every move goes through `Board::apply_move`.

use std::sync::Arc;

use log::{debug, trace};
use parking_lot::Mutex;

use crate::board::{
    AttackTables, Board, Candidates, Color, FenError, Move, MoveError, Piece, Square, TableError,
};

/// A game whose attack tables live for the whole process, guarded for use
/// from more than one thread.
pub type SharedGame = Arc<Mutex<Game<'static>>>;

/// Selection state between clicks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        square: Square,
        color: Color,
        piece: Piece,
        candidates: Candidates,
    },
}

/// What a click did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A piece with at least one candidate is now selected
    Selected(Candidates),
    /// Nothing to select on that square, or the piece there cannot move
    Ignored,
    /// The selected square was clicked again
    Cancelled,
    Moved(Move),
    /// The destination was not a candidate; the board is unchanged
    Rejected(MoveError),
}

/// Board plus selection state.
#[derive(Clone, Debug)]
pub struct Game<'t> {
    board: Board,
    tables: &'t AttackTables,
    selection: Selection,
}

impl<'t> Game<'t> {
    /// A game at the starting position.
    #[must_use]
    pub fn new(tables: &'t AttackTables) -> Self {
        Self::with_board(tables, Board::new())
    }

    #[must_use]
    pub fn with_board(tables: &'t AttackTables, board: Board) -> Self {
        Game {
            board,
            tables,
            selection: Selection::Idle,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn tables(&self) -> &'t AttackTables {
        self.tables
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selects the piece on `square`.
    ///
    /// Returns its candidates, or `None` (leaving the game idle) when the
    /// square is empty, holds the other side's piece, or the piece has no
    /// candidate at all.
    pub fn select(&mut self, square: Square) -> Option<Candidates> {
        self.selection = Selection::Idle;
        let (color, piece) = self.board.piece_at(square)?;
        let candidates = self.board.candidates(self.tables, square);
        if candidates.is_empty() {
            trace!("{square}: nothing to select");
            return None;
        }
        Board::debug_bitboard_grid("moves", candidates.moves);
        Board::debug_bitboard_grid("captures", candidates.captures);
        self.selection = Selection::Selected {
            square,
            color,
            piece,
            candidates,
        };
        Some(candidates)
    }

    /// Moves the selected piece to `to` and returns to idle, whether or not
    /// the move was accepted.
    pub fn apply_to(&mut self, to: Square) -> Result<Move, MoveError> {
        let selection = std::mem::take(&mut self.selection);
        let Selection::Selected {
            square, candidates, ..
        } = selection
        else {
            return Err(MoveError::NothingSelected);
        };
        if !candidates.contains(to) {
            debug!("rejected {square}->{to}");
            return Err(MoveError::IllegalDestination { from: square, to });
        }
        self.board.apply_move(self.tables, square, to)
    }

    pub fn cancel(&mut self) {
        self.selection = Selection::Idle;
    }

    /// One click from the presentation layer.
    ///
    /// Idle: select the clicked piece. Selected: clicking the same square
    /// cancels, any other square is an attempted destination.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        match self.selection {
            Selection::Idle => match self.select(square) {
                Some(candidates) => ClickOutcome::Selected(candidates),
                None => ClickOutcome::Ignored,
            },
            Selection::Selected { square: from, .. } if from == square => {
                self.cancel();
                ClickOutcome::Cancelled
            }
            Selection::Selected { .. } => match self.apply_to(square) {
                Ok(mv) => ClickOutcome::Moved(mv),
                Err(err) => ClickOutcome::Rejected(err),
            },
        }
    }

    /// Loads a new position and drops any selection. On error nothing
    /// changes.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.board.load_fen(fen)?;
        self.selection = Selection::Idle;
        self.board.debug_bitboards();
        Ok(())
    }

    /// Back to the starting position.
    pub fn reset(&mut self) {
        self.board.reset();
        self.selection = Selection::Idle;
    }
}

impl Game<'static> {
    /// A game on the process-wide tables, building them on first use.
    pub fn with_shared_tables() -> Result<Self, TableError> {
        Ok(Game::new(AttackTables::shared()?))
    }

    #[must_use]
    pub fn into_shared(self) -> SharedGame {
        Arc::new(Mutex::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MoveKind;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn game() -> Game<'static> {
        Game::with_shared_tables().unwrap()
    }

    #[test]
    fn test_select_then_move() {
        let mut game = game();
        let c = game.select(sq("e2")).unwrap();
        assert_eq!(c.moves.popcount(), 2);
        assert!(matches!(game.selection(), Selection::Selected { piece: Piece::Pawn, .. }));

        let mv = game.apply_to(sq("e4")).unwrap();
        assert_eq!(mv.kind(), MoveKind::DoublePawnPush);
        assert_eq!(*game.selection(), Selection::Idle);
        assert_eq!(game.board().side_to_move(), Color::Black);
    }

    #[test]
    fn test_reclick_cancels() {
        let mut game = game();
        assert!(matches!(game.click(sq("g1")), ClickOutcome::Selected(_)));
        assert_eq!(game.click(sq("g1")), ClickOutcome::Cancelled);
        assert_eq!(*game.selection(), Selection::Idle);
        assert_eq!(*game.board(), Board::new());
    }

    #[test]
    fn test_piece_without_candidates_stays_idle() {
        let mut game = game();
        assert_eq!(game.click(sq("a1")), ClickOutcome::Ignored);
        assert_eq!(*game.selection(), Selection::Idle);
        assert_eq!(game.click(sq("e4")), ClickOutcome::Ignored);
        assert_eq!(game.click(sq("e7")), ClickOutcome::Ignored);
    }

    #[test]
    fn test_illegal_destination_returns_to_idle() {
        let mut game = game();
        game.click(sq("e2"));
        let outcome = game.click(sq("e5"));
        assert_eq!(
            outcome,
            ClickOutcome::Rejected(MoveError::IllegalDestination {
                from: sq("e2"),
                to: sq("e5"),
            })
        );
        assert_eq!(*game.selection(), Selection::Idle);
        assert_eq!(*game.board(), Board::new());
    }

    #[test]
    fn test_apply_without_selection() {
        let mut game = game();
        assert_eq!(game.apply_to(sq("e4")), Err(MoveError::NothingSelected));
    }

    #[test]
    fn test_load_fen_drops_selection() {
        let mut game = game();
        game.select(sq("b1"));
        game.load_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert_eq!(*game.selection(), Selection::Idle);

        let before = game.board().clone();
        assert!(game.load_fen("4k3/8/8/8/8/8/8/4K2X w K - 0 1").is_err());
        assert_eq!(*game.board(), before);
    }

    #[test]
    fn test_shared_game_across_threads() {
        let shared = game().into_shared();
        let worker = Arc::clone(&shared);
        std::thread::spawn(move || {
            let mut game = worker.lock();
            game.click(sq("e2"));
            game.click(sq("e4"));
        })
        .join()
        .unwrap();
        assert_eq!(shared.lock().board().en_passant(), Some(sq("e3")));
    }
}
