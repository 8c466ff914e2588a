use std::path::PathBuf;

use hashi::{encode, Grid, Solution, Strategy};
use itertools::Itertools;
use strum::VariantArray;

/// Install a test logger; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parse a grid given as comma-separated rows.
///
/// # Panics
///  - If the text is not a well-formed grid
pub fn grid(text: &str) -> Grid {
    text.parse().unwrap()
}

/// Load one of the puzzle files shipped in `puzzles/`.
#[allow(dead_code)]
pub fn puzzle(name: &str) -> Grid {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "puzzles", name].iter().collect();
    Grid::load(&path).unwrap()
}

/// Every bridged pair as `((low, high), count)`, in ascending order.
pub fn pairs(solution: &Solution) -> Vec<((usize, usize), u8)> {
    solution.iter()
        .map(|((a, b), bridges)| ((a.get(), b.get()), bridges.count()))
        .collect_vec()
}

/// Solve `grid` with every strategy, checking each solution against the puzzle's rules.
pub fn solve_all(grid: &Grid) -> Vec<(Strategy, Option<Solution>)> {
    solve_with(grid, Strategy::VARIANTS)
}

/// Solve `grid` with each of `strategies`, checking each solution against the puzzle's rules.
pub fn solve_with(grid: &Grid, strategies: &[Strategy]) -> Vec<(Strategy, Option<Solution>)> {
    let model = encode(grid);
    strategies.iter()
        .map(|strategy| {
            let solution = strategy.solve(grid).unwrap();
            if let Some(solution) = &solution {
                assert_eq!(model.check(solution), Ok(()), "{} returned an invalid solution", strategy);
            }
            log::debug!("{}: {:?}", strategy, solution.as_ref().map(pairs));
            (*strategy, solution)
        })
        .collect_vec()
}
