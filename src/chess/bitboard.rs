//! A minimal 64-bit set of squares, used to represent blockers for sliding
//! rook attacks. KRK only ever has two blockers on the board (the two
//! kings), so this is a thin wrapper rather than the full magic-bitboard
//! machinery a general chess engine needs.

use std::fmt;

use itertools::Itertools;

use crate::chess::core::Square;

/// A set of up to 64 squares, one bit per square.
#[derive(Clone, Copy, Default, Eq, PartialEq)]
pub struct Bitboard(u64);

impl Bitboard {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn with_squares(squares: impl IntoIterator<Item = Square>) -> Self {
        let mut board = Self::empty();
        for square in squares {
            board.set(square);
        }
        board
    }

    pub fn set(&mut self, square: Square) {
        self.0 |= 1 << square;
    }

    #[must_use]
    pub const fn is_set(&self, square: Square) -> bool {
        self.0 & (1 << square) != 0
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks = (0..8)
            .rev()
            .map(|rank| {
                (0..8)
                    .map(|file| {
                        if self.is_set(rank * 8 + file) {
                            '1'
                        } else {
                            '.'
                        }
                    })
                    .join(" ")
            })
            .join("\n");
        write!(f, "\n{ranks}\n")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chess::core::square;

    #[test]
    fn set_and_query() {
        let board = Bitboard::with_squares([square(0, 0), square(7, 7)]);
        assert!(board.is_set(square(0, 0)));
        assert!(board.is_set(square(7, 7)));
        assert!(!board.is_set(square(3, 3)));
    }

    #[test]
    fn empty_has_no_squares() {
        let board = Bitboard::empty();
        for s in 0..64 {
            assert!(!board.is_set(s));
        }
    }
}
