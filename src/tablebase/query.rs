//! The collaborator-facing surface (§6): load a solved artifact and answer
//! O(1) lookups, plus the `setup`/`legal_moves`/`apply` trio a caller needs
//! to drive a game without reimplementing the rules.

use std::path::Path;

use crate::chess::core::{Color, Square};
use crate::chess::movegen::{self, Outcome};
use crate::chess::position::{Move, Position};
use crate::error::TablebaseError;
use crate::tablebase::persistence;
use crate::tablebase::store::{Entry, Store, Value};

/// A loaded, queryable tablebase.
#[derive(Debug)]
pub struct Tablebase {
    store: Store,
}

impl Tablebase {
    /// Wraps an already-solved [`Store`] (e.g. the direct output of
    /// [`crate::tablebase::solver::solve`]) for querying.
    #[must_use]
    pub const fn from_store(store: Store) -> Self {
        Self { store }
    }

    /// Loads a tablebase artifact previously written by
    /// [`crate::tablebase::persistence::save`].
    ///
    /// # Errors
    ///
    /// Returns [`TablebaseError::Persistence`] if the file is missing, not a
    /// tablebase artifact, or was written by an incompatible version.
    pub fn load(path: &Path) -> Result<Self, TablebaseError> {
        Ok(Self::from_store(persistence::load(path)?))
    }

    /// Validates and constructs a position from its four components,
    /// exactly as a collaborator would set up a board.
    ///
    /// # Errors
    ///
    /// Returns [`TablebaseError::InvalidPosition`] if the pieces overlap or
    /// the kings are adjacent.
    pub fn setup(
        &self,
        white_king: Square,
        white_rook: Square,
        black_king: Square,
        side_to_move: Color,
    ) -> Result<Position, TablebaseError> {
        Position::new(white_king, white_rook, black_king, side_to_move)
    }

    /// The legal moves available in `position`.
    #[must_use]
    pub fn legal_moves(&self, position: &Position) -> Vec<Move> {
        movegen::legal_moves(position).into_iter().collect()
    }

    /// Applies `mv` to `position`.
    ///
    /// # Errors
    ///
    /// Returns [`TablebaseError::IllegalMove`] if `mv` is not among
    /// `position`'s legal moves.
    pub fn apply(&self, position: &Position, mv: Move) -> Result<Outcome, TablebaseError> {
        if !movegen::legal_moves(position).contains(&mv) {
            return Err(TablebaseError::IllegalMove { from: mv.from, to: mv.to });
        }
        Ok(movegen::apply(position, mv))
    }

    /// The raw solved entry for `position`, if it is a legal KRK position.
    #[must_use]
    pub fn entry(&self, position: &Position) -> Option<&Entry> {
        self.store.get(position)
    }

    /// The O(1) lookup the CLI's `query` subcommand exposes: `"draw"`,
    /// `"mate 0"`, or `"mate <d> <move>"`.
    ///
    /// # Errors
    ///
    /// Returns [`TablebaseError::InvalidPosition`] if `position` was never
    /// enumerated (it should be unreachable for any position built through
    /// [`Tablebase::setup`] or [`Position::from_fen`], both of which
    /// already enforce the same invariants the enumerator does).
    pub fn query(&self, position: &Position) -> Result<String, TablebaseError> {
        let entry = self.entry(position).ok_or_else(|| TablebaseError::InvalidPosition {
            reason: format!("{position} was never enumerated"),
        })?;
        Ok(match (entry.value, entry.best_move) {
            (Value::Draw, _) => "draw".to_string(),
            (Value::Mate(0), _) => "mate 0".to_string(),
            (Value::Mate(d), Some(mv)) => format!("mate {d} {mv}"),
            (Value::Mate(d), None) => unreachable!("Mate({d}) with d > 0 always carries a move"),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tablebase::solver;

    fn tablebase() -> Tablebase {
        Tablebase::from_store(solver::solve())
    }

    #[test]
    fn queries_checkmate_as_mate_zero() {
        let tb = tablebase();
        let position = Position::from_fen("R6k/8/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(tb.query(&position).unwrap(), "mate 0");
    }

    #[test]
    fn queries_stalemate_as_draw() {
        let tb = tablebase();
        let position = Position::from_fen("7k/6R1/7K/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(tb.query(&position).unwrap(), "draw");
    }

    #[test]
    fn queries_mate_in_one_with_its_move() {
        let tb = tablebase();
        let position = Position::from_fen("7k/8/6K1/8/8/8/8/R7 w - - 0 1").unwrap();
        assert_eq!(tb.query(&position).unwrap(), "mate 1 a1a8");
    }

    #[test]
    fn setup_rejects_adjacent_kings() {
        let tb = tablebase();
        use crate::chess::core::square;
        assert!(tb.setup(square(0, 0), square(7, 7), square(1, 1), Color::White).is_err());
    }

    #[test]
    fn apply_rejects_illegal_moves() {
        let tb = tablebase();
        let position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let illegal = Move::new(position.white_rook(), position.black_king());
        assert!(tb.apply(&position, illegal).is_err());
    }
}
