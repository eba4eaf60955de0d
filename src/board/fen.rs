use std::str::FromStr;

use log::debug;

use super::{Board, CastlingRights, Color, FenError, Piece, Square};

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// All six fields are required. Parsing builds a fresh board, so a
    /// failure never leaves a half-written position behind.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 6 {
            return Err(FenError::TooFewFields { found: parts.len() });
        }
        if parts.len() > 6 {
            return Err(FenError::TooManyFields { found: parts.len() });
        }

        let mut board = Board::empty();
        parse_placement(&mut board, parts[0])?;

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        board.castling = parse_castling(parts[2])?;

        board.en_passant = if parts[3] == "-" {
            None
        } else {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let sq: Square = parts[3].parse().map_err(|_| invalid())?;
            // The square the opponent's last double advance skipped
            let expected_rank = match board.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if sq.rank() != expected_rank {
                return Err(invalid());
            }
            Some(sq)
        };

        board.halfmove_clock = parse_counter(parts[4])?;
        board.fullmove_number = parse_counter(parts[5])?;

        Ok(board)
    }

    /// Replaces this position with the one described by `fen`.
    ///
    /// On error the board is left untouched.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let board = Board::try_from_fen(fen)?;
        debug!("loaded position {fen}");
        *self = board;
        Ok(())
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                let occupant = Square::from_file_rank(file, rank).and_then(|sq| self.piece_at(sq));
                if let Some((color, piece)) = occupant {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file: usize = 0;
        for c in rank_str.chars() {
            match c {
                '1'..='8' => file += c as usize - '0' as usize,
                _ if c.is_ascii_alphabetic() => {
                    let (color, piece) =
                        Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    let sq = u8::try_from(file)
                        .ok()
                        .and_then(|f| Square::from_file_rank(f, rank))
                        .ok_or(FenError::WrongFileCount {
                            rank: rank + 1,
                            files: file + 1,
                        })?;
                    board.put_piece(sq, color, piece);
                    file += 1;
                }
                _ => return Err(FenError::UnexpectedCharacter { char: c }),
            }
        }
        if file != 8 {
            return Err(FenError::WrongFileCount {
                rank: rank + 1,
                files: file,
            });
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        match c {
            'K' => rights.set(Color::White, true),
            'Q' => rights.set(Color::White, false),
            'k' => rights.set(Color::Black, true),
            'q' => rights.set(Color::Black, false),
            _ => return Err(FenError::InvalidCastling { char: c }),
        }
    }
    Ok(rights)
}

fn parse_counter(field: &str) -> Result<u32, FenError> {
    field.parse().map_err(|_| FenError::InvalidCounter {
        found: field.to_string(),
    })
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
