//! `construct`: enumerates every legal KRK position, solves the tablebase
//! by backward induction, and writes the result to disk.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use krk::tablebase::solver::{self, SolverOptions, DEFAULT_MAX_PASSES};
use krk::tablebase::{enumerator, persistence};

/// Builds a King+Rook vs. King tablebase and writes it to disk.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Where to write the solved tablebase artifact.
    #[arg(long, default_value = "krk.tablebase")]
    out: PathBuf,

    /// Use a `rayon` data-parallel induction pass instead of a sequential
    /// one.
    #[arg(long)]
    parallel: bool,

    /// Safety cap on the number of backward-induction passes.
    #[arg(long, default_value_t = DEFAULT_MAX_PASSES)]
    max_passes: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let args = Args::parse();
    tracing::info!(positions = enumerator::POSITION_COUNT, "enumerating legal KRK positions");

    let options = SolverOptions { max_passes: args.max_passes, parallel: args.parallel };
    let store = solver::solve_with_options(options);
    tracing::info!(solved = store.len(), "tablebase construction complete");

    persistence::save(&store, &args.out)
        .with_context(|| format!("failed to write tablebase to {}", args.out.display()))?;
    tracing::info!(path = %args.out.display(), "tablebase written to disk");
    Ok(())
}
