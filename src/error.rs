//! Typed errors for the library's fallible boundaries: position
//! construction, move application and persisted-artifact decoding. The
//! CLI binaries compose these into `anyhow::Result` chains at the
//! application edge; library code never panics on bad input.

use crate::chess::core::Square;

/// Everything that can go wrong inside the `krk` library.
#[derive(Debug, thiserror::Error)]
pub enum TablebaseError {
    /// A `(wk, wr, bk, stm)` tuple violates one of the position
    /// invariants (distinct squares, kings not adjacent).
    #[error("invalid position: {reason}")]
    InvalidPosition {
        /// Human-readable description of which invariant was violated.
        reason: String,
    },

    /// A move was requested that is not in the legal move list for the
    /// given position.
    #[error("illegal move {from}->{to} in this position")]
    IllegalMove {
        /// Source square of the rejected move.
        from: Square,
        /// Destination square of the rejected move.
        to: Square,
    },

    /// Parsing a FEN (or FEN-like) string failed.
    #[error("malformed FEN {input:?}: {reason}")]
    MalformedFen {
        /// The offending input string.
        input: String,
        /// Human-readable description of what was wrong with it.
        reason: String,
    },

    /// The persisted artifact could not be read back.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Failures specific to loading or saving the on-disk tablebase artifact.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The file does not start with the expected magic number.
    #[error("not a tablebase artifact (bad magic number)")]
    BadMagic,

    /// The file's format version does not match what this build expects.
    #[error("unsupported artifact version {found} (expected {expected})")]
    VersionMismatch {
        /// Version found in the file.
        found: u32,
        /// Version this build supports.
        expected: u32,
    },

    /// The file was truncated or otherwise structurally corrupt.
    #[error("corrupt artifact: {0}")]
    Corrupt(String),

    /// The underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `bincode` failed to encode or decode a record.
    #[error("encoding error: {0}")]
    Encoding(#[from] Box<bincode::ErrorKind>),
}
