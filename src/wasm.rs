//! Bindings for running the solver in a browser.

use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::encoder::encode;
use crate::grid::Grid;
use crate::render::render;
use crate::search::{Search, Strategy, Unbounded};

/// Solve the puzzle in `text` (one comma-separated row per line) with the strategy named `strategy`.
///
/// Resolves to the rendered rows of the solution, or to an empty array when the puzzle has no solution.
#[wasm_bindgen(js_name = solvePuzzle)]
pub fn solve_puzzle(text: &str, strategy: &str) -> Result<Array, JsError> {
    let grid: Grid = text.parse()?;
    let strategy: Strategy = strategy.parse()?;

    let model = encode(&grid);
    let rows = Array::new();
    if let Some(solution) = strategy.search(&model, &mut Unbounded)? {
        for row in render(&grid, &model, &solution).rows() {
            rows.push(&JsValue::from_str(&row));
        }
    }

    Ok(rows)
}
