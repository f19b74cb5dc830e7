//! An exact King+Rook vs. King endgame tablebase: exhaustive
//! backward-induction construction of the distance-to-mate value (and best
//! move) for every legal position, persisted to a compact binary artifact
//! and served back in O(1).
//!
//! - [`chess`] has the board primitives this needs: squares, a position,
//!   legal move generation and check/checkmate/stalemate classification.
//! - [`tablebase`] enumerates the legal position space, solves it, and
//!   persists/loads/queries the result.
//! - [`error`] has the typed errors every fallible boundary returns.

// TODO: Gradually move most of warnings to deny.
#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
// Performance is extremely important.
#![deny(clippy::perf)]

pub mod chess;
pub mod error;
pub mod tablebase;

pub use error::{PersistenceError, TablebaseError};
pub use tablebase::{Entry, Tablebase, Value};

shadow_rs::shadow!(build);

/// Full version and commit hash of this build, produced by `build.rs` via
/// `shadow-rs`.
pub const VERSION: &str = build::PKG_VERSION;
/// Commit hash and build timestamp banner, produced by `build.rs`.
pub const BUILD_INFO: &str = build::SHORT_COMMIT;
