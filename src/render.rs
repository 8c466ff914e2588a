//! Drawing solutions as character grids.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use itertools::Itertools;
use ndarray::Array2;

use crate::grid::Grid;
use crate::location::Orientation;
use crate::model::PuzzleModel;
use crate::solution::{Bridges, Solution};

/// A solved grid laid out as characters: island digits, `-`/`=` for single/double horizontal bridges,
/// `|`/`$` for single/double vertical bridges and `0` elsewhere.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rendering {
    cells: Array2<char>,
}

/// Draw `solution` over `grid`. `model` must have been encoded from `grid`.
pub fn render(grid: &Grid, model: &PuzzleModel, solution: &Solution) -> Rendering {
    let mut cells = Array2::from_elem(grid.cells().raw_dim(), '0');

    for island in model.islands() {
        cells[island.location().as_index()] = char::from_digit(u32::from(island.degree()), 10).unwrap_or('?');
    }

    for ((a, b), bridges) in solution.iter() {
        let span = match model.edge_between(a, b) {
            Some(edge) => edge.span(),
            None => panic!("islands {} and {} are bridged but share no candidate edge", a, b),
        };

        let symbol = match (span.orientation, bridges) {
            (Orientation::Horizontal, Bridges::Single) => '-',
            (Orientation::Horizontal, Bridges::Double) => '=',
            (Orientation::Vertical, Bridges::Single) => '|',
            (Orientation::Vertical, Bridges::Double) => '$',
        };

        for location in span.interior() {
            cells[location.as_index()] = symbol;
        }
    }

    Rendering { cells }
}

impl Rendering {
    /// Each row as a plain string.
    pub fn rows(&self) -> Vec<String> {
        self.cells.rows()
            .into_iter()
            .map(|row| row.iter().collect::<String>())
            .collect_vec()
    }

    /// Write this rendering to `path` in the same format as [`Display`].
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        if let Some(parent) = path.as_ref().parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_string())
    }
}

impl Display for Rendering {
    /// One bracketed row per line, e.g. `["2", "=", "2"]`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            writeln!(f, "[{}]", row.iter().map(|cell| format!("\"{}\"", cell)).join(", "))?;
        }
        Ok(())
    }
}
