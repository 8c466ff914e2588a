use ndarray::Ix;
use strum::VariantArray;

pub(crate) type Coord = usize;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, col)` on a grid. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    #[inline]
    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0, self.1)
    }

    /// The row of this location.
    #[inline]
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column of this location.
    #[inline]
    pub fn col(&self) -> Coord {
        self.1
    }

    /// One cell further along `orientation`, i.e. to the right or downward.
    /// Never fails; stepping off the grid is caught when the result is looked up.
    pub(crate) fn step(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self(self.0, self.1.wrapping_add(1)),
            Orientation::Vertical => Self(self.0.wrapping_add(1), self.1),
        }
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

/// The two directions a bridge may run in.
///
/// Scanning for neighbors only ever moves "forward", so [`Horizontal`](Orientation::Horizontal) means rightward along a row
/// and [`Vertical`](Orientation::Vertical) means downward along a column.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Orientation {
    /// Along a row.
    Horizontal,
    /// Along a column.
    Vertical,
}

impl Orientation {
    /// The coordinate which stays fixed while travelling in this orientation.
    pub(crate) fn line_of(&self, location: Location) -> Coord {
        match self {
            Self::Horizontal => location.row(),
            Self::Vertical => location.col(),
        }
    }

    /// The coordinate which changes while travelling in this orientation.
    pub(crate) fn position_of(&self, location: Location) -> Coord {
        match self {
            Self::Horizontal => location.col(),
            Self::Vertical => location.row(),
        }
    }
}
