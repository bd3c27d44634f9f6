//! Cells and the rectangles that enclose them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The coordinates of a cell.
///
/// Unbounded in both directions; the grid has no edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    /// Row, growing downwards.
    pub row: i64,
    /// Column, growing to the right.
    pub col: i64,
}

impl Coord {
    /// A cell at `(row, col)`.
    #[inline]
    pub const fn new(row: i64, col: i64) -> Self {
        Coord { row, col }
    }

    /// The eight cells of the Moore neighborhood, not including this cell.
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        self.nbhd().filter(move |&c| c != self)
    }

    /// The 3x3 block centered at this cell, including the cell itself.
    #[inline]
    pub fn nbhd(self) -> impl Iterator<Item = Coord> {
        (-1..=1).flat_map(move |dr| (-1..=1).map(move |dc| Coord::new(self.row + dr, self.col + dc)))
    }
}

impl From<(i64, i64)> for Coord {
    #[inline]
    fn from((row, col): (i64, i64)) -> Self {
        Coord::new(row, col)
    }
}

/// An axis-aligned rectangle of cells.
///
/// `min_row` and `min_col` are inclusive, `max_row` and `max_col`
/// are exclusive. A box with `min_row == max_row` or `min_col == max_col`
/// contains no cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BBox {
    pub min_row: i64,
    pub min_col: i64,
    pub max_row: i64,
    pub max_col: i64,
}

impl BBox {
    pub const fn new(min_row: i64, min_col: i64, max_row: i64, max_col: i64) -> Self {
        BBox {
            min_row,
            min_col,
            max_row,
            max_col,
        }
    }

    /// The box containing exactly one cell.
    pub const fn around(coord: Coord) -> Self {
        BBox::new(coord.row, coord.col, coord.row + 1, coord.col + 1)
    }

    /// The zero-area box anchored at the minimum corner of this box.
    pub const fn collapsed(self) -> Self {
        BBox::new(self.min_row, self.min_col, self.min_row, self.min_col)
    }

    /// Number of rows.
    pub fn height(&self) -> i64 {
        (self.max_row - self.min_row).max(0)
    }

    /// Number of columns.
    pub fn width(&self) -> i64 {
        (self.max_col - self.min_col).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    pub fn contains(&self, coord: Coord) -> bool {
        (self.min_row..self.max_row).contains(&coord.row)
            && (self.min_col..self.max_col).contains(&coord.col)
    }

    /// Grows the box just enough to contain `coord`.
    ///
    /// Each bound is compared on its own, so the result does not depend on
    /// the order in which cells are added.
    pub fn extend(&mut self, coord: Coord) {
        self.min_row = self.min_row.min(coord.row);
        self.min_col = self.min_col.min(coord.col);
        self.max_row = self.max_row.max(coord.row + 1);
        self.max_col = self.max_col.max(coord.col + 1);
    }

    /// The box grown by one cell on every side.
    ///
    /// Every cell that can be alive one generation later lies in here.
    pub const fn expanded(self) -> Self {
        BBox::new(
            self.min_row - 1,
            self.min_col - 1,
            self.max_row + 1,
            self.max_col + 1,
        )
    }

    /// All cells in the box, row by row.
    pub fn cells(self) -> impl Iterator<Item = Coord> {
        (self.min_row..self.max_row)
            .flat_map(move |row| (self.min_col..self.max_col).map(move |col| Coord::new(row, col)))
    }
}

/// Tracks the tight enclosure of a growing set of cells.
///
/// Starts with no box at all; the first cell gives a one-cell box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct BBoxTracker(Option<BBox>);

impl BBoxTracker {
    pub(crate) fn add(&mut self, coord: Coord) {
        match &mut self.0 {
            Some(bbox) => bbox.extend(coord),
            None => self.0 = Some(BBox::around(coord)),
        }
    }

    /// The enclosure, or `fallback` when no cell was added.
    pub(crate) fn finish(self, fallback: BBox) -> BBox {
        self.0.unwrap_or(fallback)
    }
}
