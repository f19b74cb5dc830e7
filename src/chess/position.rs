//! The canonical KRK [`Position`]: white king, white rook, black king and
//! the side to move, plus FEN parsing/rendering (the FEN string doubles
//! as the canonical store key, §3/§6).

use std::fmt;

use crate::chess::core::{self, king_adjacent, square_from_str, square_to_str, Color, Square};
use crate::error::TablebaseError;

/// A legal KRK position: white king, white rook, black king and the side
/// to move.
///
/// Constructing a `Position` validates the invariants from §3 of the
/// design: the three squares are distinct, and the two kings are never a
/// king-move apart. There is no further legality check (in particular, a
/// black king already in check by the rook is a perfectly valid
/// `stm = Black` position — see the design notes on invariant 4).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    white_king: Square,
    white_rook: Square,
    black_king: Square,
    side_to_move: Color,
}

impl Position {
    /// Constructs a position, validating invariants 1-2 of the data
    /// model.
    ///
    /// # Errors
    ///
    /// Returns [`TablebaseError::InvalidPosition`] if any two of the three
    /// squares coincide, or if the two kings are adjacent.
    pub fn new(
        white_king: Square,
        white_rook: Square,
        black_king: Square,
        side_to_move: Color,
    ) -> Result<Self, TablebaseError> {
        if white_king == white_rook || white_king == black_king || white_rook == black_king {
            return Err(TablebaseError::InvalidPosition {
                reason: format!(
                    "pieces must occupy distinct squares: wk={white_king} wr={white_rook} bk={black_king}"
                ),
            });
        }
        if king_adjacent(white_king, black_king) {
            return Err(TablebaseError::InvalidPosition {
                reason: format!(
                    "kings cannot be adjacent: wk={white_king} bk={black_king}"
                ),
            });
        }
        Ok(Self {
            white_king,
            white_rook,
            black_king,
            side_to_move,
        })
    }

    #[must_use]
    pub const fn white_king(&self) -> Square {
        self.white_king
    }

    #[must_use]
    pub const fn white_rook(&self) -> Square {
        self.white_rook
    }

    #[must_use]
    pub const fn black_king(&self) -> Square {
        self.black_king
    }

    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The square of the king whose side is to move.
    #[must_use]
    pub const fn king_to_move(&self) -> Square {
        match self.side_to_move {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Parses the canonical FEN-equivalent representation (§6): three
    /// pieces placed, no castling rights, no en passant target, halfmove
    /// clock 0, fullmove number 1, e.g.
    /// `4k3/8/8/8/8/8/8/R3K3 w - - 0 1`.
    ///
    /// # Errors
    ///
    /// Returns [`TablebaseError::MalformedFen`] if the string is not a
    /// well-formed FEN, does not contain exactly one white king, one
    /// white rook and one black king, or [`TablebaseError::InvalidPosition`]
    /// if the placement violates the position invariants.
    pub fn from_fen(input: &str) -> Result<Self, TablebaseError> {
        let malformed = |reason: &str| TablebaseError::MalformedFen {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let mut fields = input.split_ascii_whitespace();
        let board = fields.next().ok_or_else(|| malformed("missing board field"))?;
        let stm = fields.next().ok_or_else(|| malformed("missing side to move field"))?;

        let mut white_king = None;
        let mut white_rook = None;
        let mut black_king = None;

        let ranks: Vec<&str> = board.split('/').collect();
        if ranks.len() != 8 {
            return Err(malformed(&format!(
                "expected 8 ranks separated by '/', got {}",
                ranks.len()
            )));
        }
        // FEN ranks run from rank 8 down to rank 1.
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                    continue;
                }
                if file >= 8 {
                    return Err(malformed(&format!("rank {rank_str:?} has too many squares")));
                }
                let square = core::square(file, rank);
                match c {
                    'K' => {
                        if white_king.replace(square).is_some() {
                            return Err(malformed("more than one white king"));
                        }
                    },
                    'R' => {
                        if white_rook.replace(square).is_some() {
                            return Err(malformed("more than one white rook"));
                        }
                    },
                    'k' => {
                        if black_king.replace(square).is_some() {
                            return Err(malformed("more than one black king"));
                        }
                    },
                    other => {
                        return Err(malformed(&format!(
                            "unexpected piece {other:?} in a KRK position"
                        )));
                    },
                }
                file += 1;
            }
            if file != 8 {
                return Err(malformed(&format!("rank {rank_str:?} does not sum to 8 files")));
            }
        }

        let white_king = white_king.ok_or_else(|| malformed("missing white king"))?;
        let white_rook = white_rook.ok_or_else(|| malformed("missing white rook"))?;
        let black_king = black_king.ok_or_else(|| malformed("missing black king"))?;
        let side_to_move =
            Color::try_from(stm).map_err(|e| malformed(&e.to_string()))?;

        Self::new(white_king, white_rook, black_king, side_to_move)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank_from_top in 0..8u8 {
            let rank = 7 - rank_from_top;
            let mut empty_run = 0u8;
            for file in 0..8u8 {
                let square = core::square(file, rank);
                let piece = if square == self.white_king {
                    Some('K')
                } else if square == self.white_rook {
                    Some('R')
                } else if square == self.black_king {
                    Some('k')
                } else {
                    None
                };
                match piece {
                    Some(c) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        write!(f, "{c}")?;
                    },
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if rank_from_top != 7 {
                write!(f, "/")?;
            }
        }
        write!(f, " {} - - 0 1", self.side_to_move)
    }
}

/// A pure coordinate move: source square followed by destination,
/// e.g. `a1a8`. No promotion field: impossible in KRK.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// The square the moving piece starts on.
    pub from: Square,
    /// The square the moving piece ends on.
    pub to: Square,
}

impl Move {
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Encodes the move as `(from << 6) | to`, the on-disk representation
    /// used by the persistence format (§6).
    #[must_use]
    pub const fn encode(self) -> u16 {
        ((self.from as u16) << 6) | self.to as u16
    }

    /// Decodes a move from its `(from << 6) | to` encoding.
    #[must_use]
    pub const fn decode(bits: u16) -> Self {
        Self {
            from: (bits >> 6) as u8,
            to: (bits & 0x3f) as u8,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_to_str(self.from), square_to_str(self.to))
    }
}

impl std::str::FromStr for Move {
    type Err = TablebaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| TablebaseError::MalformedFen {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        if s.len() != 4 {
            return Err(malformed("a coordinate move is exactly 4 characters"));
        }
        let from = square_from_str(&s[0..2]).map_err(|e| malformed(&e.to_string()))?;
        let to = square_from_str(&s[2..4]).map_err(|e| malformed(&e.to_string()))?;
        Ok(Self::new(from, to))
    }
}
