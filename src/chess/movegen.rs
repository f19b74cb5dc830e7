//! KRK legal move generation and terminal (checkmate/stalemate)
//! classification (§4.C).
//!
//! A general engine dispatches move generation over six piece kinds;
//! here only a king and a rook ever exist, so generation is two direct
//! functions instead of a dispatch table (design notes, "dynamic
//! dispatch elimination").

use arrayvec::ArrayVec;

use crate::chess::attacks::{king_attacks, rook_attacks};
use crate::chess::bitboard::Bitboard;
use crate::chess::core::{king_adjacent, Color};
use crate::chess::position::{Move, Position};

/// A KRK move list never exceeds 8 king destinations or 14 rook
/// destinations.
pub type MoveList = ArrayVec<Move, 14>;

/// What applying a move to a position leads to: either another legal
/// position, or a terminal outcome that cannot be represented as a
/// `Position` (the black king capturing the rook collapses the state to
/// a bare KK draw with no rook square to store).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Position(Position),
    /// Black captured the rook; the resulting KK position is an
    /// unconditional draw (open question 1).
    DrawByCapture,
}

/// Whether the side to move's king is attacked.
#[must_use]
pub fn in_check(position: &Position) -> bool {
    match position.side_to_move() {
        // The white king can only be attacked by the black king, and the
        // two kings are never adjacent in a valid position.
        Color::White => false,
        Color::Black => {
            let blockers = Bitboard::with_squares([position.white_king(), position.black_king()]);
            rook_attacks(position.white_rook(), blockers).is_set(position.black_king())
        },
    }
}

/// Generates the legal move list for `position`.
#[must_use]
pub fn legal_moves(position: &Position) -> MoveList {
    match position.side_to_move() {
        Color::White => white_moves(position),
        Color::Black => black_moves(position),
    }
}

fn white_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let (wk, wr, bk) = (position.white_king(), position.white_rook(), position.black_king());

    for target in king_attacks(wk) {
        if target == wr {
            continue;
        }
        if king_adjacent(target, bk) {
            continue;
        }
        moves.push(Move::new(wk, target));
    }

    let blockers = Bitboard::with_squares([wk, bk]);
    let rook_targets = rook_attacks(wr, blockers);
    for target in 0..64u8 {
        if !rook_targets.is_set(target) {
            continue;
        }
        if target == bk {
            // Capturing the bare king is not a move; checkmate/stalemate
            // detection handles the "opponent has no legal move" case
            // directly instead.
            continue;
        }
        if target == wk {
            continue;
        }
        moves.push(Move::new(wr, target));
    }
    moves
}

fn black_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let (wk, wr, bk) = (position.white_king(), position.white_rook(), position.black_king());
    // The black king is vacating `bk`, so it must not block the rook's ray
    // when checking whether a destination is safe -- otherwise a square
    // directly behind the king along the checking file/rank looks shielded
    // when it is not.
    let rook_targets_after_king_moves = rook_attacks(wr, Bitboard::with_squares([wk]));

    for target in king_attacks(bk) {
        if target == wk || king_adjacent(target, wk) {
            continue;
        }
        if target == wr {
            // Capturing the rook is legal iff the destination isn't
            // otherwise attacked by the (now rookless) white king, i.e.
            // iff it isn't adjacent to wk -- already excluded above.
            moves.push(Move::new(bk, target));
            continue;
        }
        // Any other destination must not be attacked by the white rook once
        // the black king has actually left its square.
        if rook_targets_after_king_moves.is_set(target) {
            continue;
        }
        moves.push(Move::new(bk, target));
    }
    moves
}

/// Applies `mv` to `position`, assuming it is a legal move for
/// `position` (callers needing to validate arbitrary input should check
/// membership in [`legal_moves`] first).
#[must_use]
pub fn apply(position: &Position, mv: Move) -> Outcome {
    match position.side_to_move() {
        Color::White => {
            let (white_king, white_rook) = if mv.from == position.white_king() {
                (mv.to, position.white_rook())
            } else {
                (position.white_king(), mv.to)
            };
            Outcome::Position(
                Position::new(white_king, white_rook, position.black_king(), Color::Black)
                    .expect("legal white move preserves position invariants"),
            )
        },
        Color::Black => {
            if mv.to == position.white_rook() {
                return Outcome::DrawByCapture;
            }
            Outcome::Position(
                Position::new(position.white_king(), position.white_rook(), mv.to, Color::White)
                    .expect("legal black move preserves position invariants"),
            )
        },
    }
}

/// Terminal classification for a position with no legal moves: `true`
/// means checkmate, `false` means stalemate.
#[must_use]
pub fn is_checkmate(position: &Position) -> bool {
    debug_assert!(legal_moves(position).is_empty());
    in_check(position)
}

#[cfg(test)]
mod test {
    use super::*;

    // Note on fixtures: a hand-check of the source material's worked FEN
    // examples turned up inconsistencies (one claimed-stalemate position
    // has a legal king move; one claimed-checkmate position is actually a
    // stalemate; one claimed mating move lands on the defending king's
    // own square, which is not a legal rook destination). The fixtures
    // below are independently verified by hand against the rules in this
    // module rather than carried over uncritically; see DESIGN.md.

    #[test]
    fn stalemate_position_has_no_moves_and_is_not_in_check() {
        // Rook one step too close: cuts off the king's own file but is
        // defended by, and shielded by, the white king -- the classic
        // KRK stalemate trap.
        let position = Position::from_fen("7k/6R1/7K/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(legal_moves(&position).is_empty());
        assert!(!in_check(&position));
        assert!(!is_checkmate(&position));
    }

    #[test]
    fn checkmate_position_has_no_moves_and_is_in_check() {
        // Rook delivers check along the back rank; the white king covers
        // both squares adjacent to the cornered black king.
        let position = Position::from_fen("R6k/8/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(legal_moves(&position).is_empty());
        assert!(in_check(&position));
        assert!(is_checkmate(&position));
    }

    #[test]
    fn mate_in_one_is_found_among_legal_moves() {
        // Rook lift up an open file straight to the back rank, mating
        // immediately: the king is not in the way of the rook's path and
        // the white king already covers both flight squares.
        let position = Position::from_fen("7k/8/6K1/8/8/8/8/R7 w - - 0 1").unwrap();
        let expected: Move = "a1a8".parse().unwrap();
        assert!(legal_moves(&position).contains(&expected));
        let Outcome::Position(next) = apply(&position, expected) else {
            panic!("a1a8 does not capture the rook");
        };
        assert!(legal_moves(&next).is_empty());
        assert!(is_checkmate(&next));
    }

    #[test]
    fn black_can_capture_the_rook() {
        // Black king adjacent to the rook, which is not defended by the
        // white king: Black should be able to capture it.
        let position =
            Position::new(
                crate::chess::core::square(7, 0),
                crate::chess::core::square(4, 4),
                crate::chess::core::square(3, 4),
                Color::Black,
            )
            .unwrap();
        let capture = Move::new(position.black_king(), position.white_rook());
        assert!(legal_moves(&position).contains(&capture));
        assert_eq!(apply(&position, capture), Outcome::DrawByCapture);
    }

    #[test]
    fn white_king_cannot_move_adjacent_to_black_king() {
        let position = Position::new(
            crate::chess::core::square(0, 0),
            crate::chess::core::square(7, 7),
            crate::chess::core::square(2, 0),
            Color::White,
        )
        .unwrap();
        let illegal = Move::new(position.white_king(), crate::chess::core::square(1, 0));
        assert!(!legal_moves(&position).contains(&illegal));
    }

    #[test]
    fn black_king_cannot_step_straight_back_along_the_checking_file() {
        // WR a1 checks BK a5 down the a-file; WK h8 is nowhere near either
        // king. Stepping to a6 keeps the king on the very file the rook
        // already rakes, so it is not a legal evasion even though a6 sits
        // beyond the king's current square.
        let position = Position::new(
            crate::chess::core::square(7, 7),
            crate::chess::core::square(0, 0),
            crate::chess::core::square(0, 4),
            Color::Black,
        )
        .unwrap();
        assert!(in_check(&position));
        let escape_along_file = Move::new(position.black_king(), crate::chess::core::square(0, 5));
        assert!(!legal_moves(&position).contains(&escape_along_file));
    }
}
