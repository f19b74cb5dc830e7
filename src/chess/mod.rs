//! The reduced chess environment this crate needs: board primitives, attack
//! generation, the canonical KRK position and its legal move generator.
//! There is no full chess engine here (no search, no evaluation, no
//! protocol loop) — just enough rules to enumerate and solve one endgame.

pub mod attacks;
pub mod bitboard;
pub mod core;
pub mod movegen;
pub mod position;
