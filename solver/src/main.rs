use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use hashi::render::render;
use hashi::search::{Budget, Deadline, NodeBudget, Unbounded};
use hashi::{encode, Grid, Search, SolverFailure, Strategy};
use log::info;
use strum::VariantArray;

/// Solve a Hashiwokakero puzzle given as comma-separated rows, `0` for water and `1`-`8` for islands.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Puzzle file
    puzzle: PathBuf,

    /// Search strategy: complete (sat), best-first (astar), backtracking (dpll) or exhaustive (bruteforce)
    #[arg(short, long, default_value = "complete", conflicts_with = "all")]
    strategy: Strategy,

    /// Run every strategy in turn and log how long each took
    #[arg(long)]
    all: bool,

    /// Give up after this many node expansions
    #[arg(long)]
    node_limit: Option<u64>,

    /// Give up after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Write the solution here instead of printing it
    #[arg(short, long, conflicts_with = "all")]
    output: Option<PathBuf>,
}

impl Args {
    fn budget(&self) -> Box<dyn Budget> {
        let deadline = self.time_limit_ms.map(|ms| Deadline::after(Duration::from_millis(ms)));
        match (self.node_limit.map(NodeBudget::new), deadline) {
            (None, None) => Box::new(Unbounded),
            (Some(nodes), None) => Box::new(nodes),
            (None, Some(deadline)) => Box::new(deadline),
            (Some(nodes), Some(deadline)) => Box::new((nodes, deadline)),
        }
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let grid = Grid::load(&args.puzzle)
        .with_context(|| format!("could not load {}", args.puzzle.display()))?;
    let model = encode(&grid);

    let strategies = if args.all { Strategy::VARIANTS.to_vec() } else { vec![args.strategy] };

    let mut interrupted = false;
    for strategy in strategies {
        let started = Instant::now();
        let result = strategy.search(&model, args.budget().as_mut());
        info!("{} finished in {:?}", strategy, started.elapsed());

        match result {
            Ok(Some(solution)) => {
                let rendering = render(&grid, &model, &solution);
                match &args.output {
                    Some(path) => rendering.write_to(path)
                        .with_context(|| format!("could not write {}", path.display()))?,
                    None => print!("{}", rendering),
                }
            }
            Ok(None) => println!("no solution"),
            Err(SolverFailure::Interrupted) => {
                eprintln!("{}: gave up before finding an answer", strategy);
                interrupted = true;
            }
            Err(failure) => return Err(failure).context(format!("{} failed", strategy)),
        }
    }

    Ok(if interrupted { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
