//! Enumerates every legal KRK position (§4.D): every `(wk, wr, bk, stm)`
//! tuple satisfying the position invariants, exactly once.

use crate::chess::core::king_adjacent;
use crate::chess::position::Position;

/// The exact number of legal KRK positions. Derived in `DESIGN.md` from the
/// position invariants directly (`3612` valid `(wk, bk)` pairs, `× 62` for
/// `wr`, `× 2` for the side to move) rather than taken from prose.
pub const POSITION_COUNT: usize = 447_888;

/// Produces every legal KRK position exactly once, in a fixed but otherwise
/// unspecified order (ascending `wk`, then `wr`, then `bk`, then
/// `White` before `Black`, matching the nested-loop shape of the source
/// this is grounded on).
pub fn enumerate() -> impl Iterator<Item = Position> {
    use crate::chess::core::Color;

    (0..64u8).flat_map(move |wk| {
        (0..64u8).flat_map(move |wr| {
            (0..64u8).flat_map(move |bk| {
                [Color::White, Color::Black].into_iter().filter_map(move |stm| {
                    if wk == wr || wk == bk || wr == bk {
                        return None;
                    }
                    if king_adjacent(wk, bk) {
                        return None;
                    }
                    Position::new(wk, wr, bk, stm).ok()
                })
            })
        })
    })
}
