//! `query`: loads a solved tablebase artifact and answers FEN lookups,
//! either a single one-shot query or an interactive REPL over stdin.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use krk::chess::position::Position;
use krk::Tablebase;

/// Looks up positions in a solved King+Rook vs. King tablebase.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to a tablebase artifact written by `construct`.
    tablebase: PathBuf,

    /// A single FEN to look up. If omitted, reads FENs from stdin, one per
    /// line, until EOF.
    fen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let tablebase = Tablebase::load(&args.tablebase)
        .with_context(|| format!("failed to load tablebase from {}", args.tablebase.display()))?;
    tracing::info!(positions = tablebase.len(), path = %args.tablebase.display(), "tablebase loaded");

    match args.fen {
        Some(fen) => println!("{}", lookup(&tablebase, &fen)?),
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for line in stdin.lock().lines() {
                let line = line.context("failed to read a line from stdin")?;
                let fen = line.trim();
                if fen.is_empty() {
                    continue;
                }
                match lookup(&tablebase, fen) {
                    Ok(answer) => writeln!(out, "{answer}")?,
                    Err(e) => writeln!(out, "error: {e}")?,
                }
            }
        },
    }
    Ok(())
}

fn lookup(tablebase: &Tablebase, fen: &str) -> anyhow::Result<String> {
    let position = Position::from_fen(fen).with_context(|| format!("invalid FEN {fen:?}"))?;
    Ok(tablebase.query(&position)?)
}
