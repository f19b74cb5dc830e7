//! Attack generation for the two pieces KRK needs: king and rook.
//!
//! A general engine precomputes these with magic bitboards / PEXT tables
//! because sliding-piece attacks depend on the full board occupancy. KRK
//! never has more than two blockers (the two kings) on the board, so a
//! direct ray scan is simpler and just as fast in practice — there is no
//! attack table to build at compile time here.

use arrayvec::ArrayVec;

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{Direction, Square};

/// The (up to 8) squares a king on `square` attacks.
#[must_use]
pub fn king_attacks(square: Square) -> ArrayVec<Square, 8> {
    let mut attacks = ArrayVec::new();
    for direction in [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ] {
        if let Some(target) = direction.step(square) {
            attacks.push(target);
        }
    }
    attacks
}

/// Squares a rook on `square` attacks, sliding along each cardinal
/// direction and stopping at (and including) the first square that
/// intersects `blockers`.
#[must_use]
pub fn rook_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::empty();
    for direction in Direction::ROOK {
        let mut current = square;
        while let Some(next) = direction.step(current) {
            attacks.set(next);
            if blockers.is_set(next) {
                break;
            }
            current = next;
        }
    }
    attacks
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chess::core::square;

    #[test]
    fn king_in_corner_has_three_attacks() {
        assert_eq!(king_attacks(square(0, 0)).len(), 3);
    }

    #[test]
    fn king_in_center_has_eight_attacks() {
        assert_eq!(king_attacks(square(4, 4)).len(), 8);
    }

    #[test]
    fn rook_on_empty_board_attacks_whole_cross() {
        let attacks = rook_attacks(square(0, 0), Bitboard::empty());
        // 7 squares along the a-file plus 7 along the first rank.
        let count = (0..64).filter(|&s| attacks.is_set(s)).count();
        assert_eq!(count, 14);
    }

    #[test]
    fn rook_attack_stops_at_blocker() {
        let blockers = Bitboard::with_squares([square(0, 3)]);
        let attacks = rook_attacks(square(0, 0), blockers);
        assert!(attacks.is_set(square(0, 3)));
        assert!(!attacks.is_set(square(0, 4)));
        assert!(attacks.is_set(square(0, 2)));
    }
}
