use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lincomb::ilp::{BranchAndBound, IntegerProgramSolver};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Smallest XOR subsets and integer combinations of 0/1 vectors")]
struct Cli {
    /// File with one instance per line.
    #[arg(default_value = "inputs/day_10.txt")]
    input: PathBuf,

    /// Log more (-v for per-instance results, -vv for solver internals).
    /// `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Backend for the integer programs.
    #[arg(long, value_enum, default_value_t = Solver::BranchAndBound)]
    solver: Solver,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Solver {
    BranchAndBound,
    /// Only available when built with the `z3` feature.
    Z3,
}

impl Solver {
    fn backend(self) -> Result<Box<dyn IntegerProgramSolver>> {
        match self {
            Solver::BranchAndBound => Ok(Box::new(BranchAndBound::default())),
            #[cfg(feature = "z3")]
            Solver::Z3 => Ok(Box::new(lincomb::ilp::Z3Optimizer)),
            #[cfg(not(feature = "z3"))]
            Solver::Z3 => anyhow::bail!("lincomb was built without the `z3` feature"),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lincomb={level}")));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let solver = cli.solver.backend()?;
    info!(input = %cli.input.display(), solver = ?cli.solver, "solving");
    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let totals = lincomb::solve_all_with(&text, solver.as_ref())
        .with_context(|| format!("failed to solve {}", cli.input.display()))?;

    println!("{}", totals.xor);
    println!("{}", totals.ilp);
    Ok(())
}
