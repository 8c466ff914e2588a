use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use ndarray::Array2;

use crate::location::{Coord, Location};

/// The largest number an island may carry: two bridges in each of four directions.
pub const MAX_DEGREE: u8 = 8;

/// Reasons a grid may be rejected while loading.
#[derive(Debug)]
pub enum GridError {
    /// The input held no rows, or only empty rows.
    Empty,
    /// A row had a different number of cells than the first row.
    Ragged {
        /// The offending row.
        row: Coord,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// A cell could not be read as a non-negative integer.
    NotAnInteger {
        /// Row of the cell.
        row: Coord,
        /// Column of the cell.
        col: Coord,
        /// What the cell held.
        text: String,
    },
    /// A cell held a number above [`MAX_DEGREE`].
    OutOfRange {
        /// Row of the cell.
        row: Coord,
        /// Column of the cell.
        col: Coord,
        /// The number found.
        value: u64,
    },
    /// The grid file could not be read.
    Io(std::io::Error),
}

impl Display for GridError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::Empty => write!(f, "grid has no cells"),
            GridError::Ragged { row, expected, found } =>
                write!(f, "row {} has {} cells, expected {}", row, found, expected),
            GridError::NotAnInteger { row, col, text } =>
                write!(f, "cell ({}, {}) is not a non-negative integer: {:?}", row, col, text),
            GridError::OutOfRange { row, col, value } =>
                write!(f, "cell ({}, {}) holds {}, islands range from 1 to {}", row, col, value, MAX_DEGREE),
            GridError::Io(err) => write!(f, "could not read grid: {}", err),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GridError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// A rectangular puzzle grid. `0` is an empty cell, `1..=8` is an island requiring that many bridges.
///
/// A [`Grid`] is always non-empty, rectangular and in range; every constructor checks this.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    cells: Array2<u8>,
}

impl Grid {
    /// Build a grid from rows of cell values.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let width = match rows.first() {
            None => return Err(GridError::Empty),
            Some(first) if first.is_empty() => return Err(GridError::Empty),
            Some(first) => first.len(),
        };

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::Ragged { row, expected: width, found: cells.len() });
            }
            if let Some((col, value)) = cells.iter().find_position(|value| **value > MAX_DEGREE) {
                return Err(GridError::OutOfRange { row, col, value: u64::from(*value) });
            }
        }

        let height = rows.len();
        let cells = Array2::from_shape_vec((height, width), rows.into_iter().flatten().collect_vec())
            .map_err(|_| GridError::Empty)?;

        Ok(Self { cells })
    }

    /// Read a grid file: one row per line, cells separated by commas.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        fs::read_to_string(path)?.parse()
    }

    /// `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// The value at `location`, or [`None`] when it lies off the grid.
    pub fn get(&self, location: Location) -> Option<u8> {
        self.cells.get(location.as_index()).copied()
    }

    pub(crate) fn cells(&self) -> &Array2<u8> {
        &self.cells
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| line.split(',')
                .map(str::trim)
                .enumerate()
                .map(|(col, text)| match text.parse::<u64>() {
                    Err(_) => Err(GridError::NotAnInteger { row, col, text: text.to_string() }),
                    Ok(value) if value > u64::from(MAX_DEGREE) => Err(GridError::OutOfRange { row, col, value }),
                    Ok(value) => Ok(value as u8),
                })
                .collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(rows)
    }
}
