//! Uniform bucket grid over a bounded rectangle.
//!
//! Points are bucket sorted into row-major cells during construction so that
//! every cell, and every run of neighbouring cells inside one row, maps to a
//! single contiguous slice of the point array. The grid is immutable after
//! construction and can be shared between query engines.

use std::ops::Range;

use tracing::{debug, warn};

use crate::error::{RadialError, Result};

/// A point in plane coordinates: `row` grows downwards (y), `col` rightwards (x).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Vertical coordinate (y).
    pub row: f32,
    /// Horizontal coordinate (x).
    pub col: f32,
}

impl Point {
    /// Creates a point from its row (y) and column (x) coordinates.
    #[inline]
    #[must_use]
    pub const fn new(row: f32, col: f32) -> Self {
        Self { row, col }
    }
}

impl From<(f32, f32)> for Point {
    fn from((row, col): (f32, f32)) -> Self {
        Self { row, col }
    }
}

/// Integer grid coordinates of one cell.
///
/// Cells may lie outside the grid; tracing emits them freely and callers
/// check [`BucketGrid::in_bounds`] before touching point storage.
/// Ordering is by row, then column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCell {
    /// Row index.
    pub r: i32,
    /// Column index.
    pub c: i32,
}

impl GridCell {
    /// Creates a cell from its row and column indices.
    #[inline]
    #[must_use]
    pub const fn new(r: i32, c: i32) -> Self {
        Self { r, c }
    }
}

/// How [`BucketGrid::anchor`] snaps a coordinate to a grid line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Snap {
    /// Leading edge of the cell containing the value.
    Floor,
    /// The grid line one step after the containing cell's leading edge.
    Next,
}

/// Geometry of the indexed rectangle: `[0, height) x [0, width)` cut into
/// square cells of side `step`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    /// Extent along columns (x).
    pub width: f32,
    /// Extent along rows (y).
    pub height: f32,
    /// Cell side length.
    pub step: f32,
}

impl GridSpec {
    /// Creates and validates a grid specification.
    ///
    /// # Errors
    /// Returns [`RadialError::InvalidSpec`] when any value is not a positive
    /// finite number.
    pub fn new(width: f32, height: f32, step: f32) -> Result<Self> {
        let spec = Self { width, height, step };
        spec.validate()?;
        Ok(spec)
    }

    /// Checks that the geometry can be partitioned into cells.
    ///
    /// # Errors
    /// Returns [`RadialError::InvalidSpec`] when any value is not a positive
    /// finite number or the cell count does not fit in memory indices.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !(positive(self.width) && positive(self.height) && positive(self.step)) {
            return Err(self.invalid());
        }
        let rows = (self.height / self.step).ceil();
        let cols = (self.width / self.step).ceil();
        if !(rows * cols).is_finite() || rows * cols > i32::MAX as f32 {
            return Err(self.invalid());
        }
        Ok(())
    }

    /// Number of cell rows, `ceil(height / step)`.
    #[must_use]
    pub fn rows(&self) -> usize {
        (self.height / self.step).ceil() as usize
    }

    /// Number of cell columns, `ceil(width / step)`.
    #[must_use]
    pub fn cols(&self) -> usize {
        (self.width / self.step).ceil() as usize
    }

    fn invalid(&self) -> RadialError {
        RadialError::InvalidSpec {
            width: self.width,
            height: self.height,
            step: self.step,
        }
    }
}

/// Points bucket sorted into a `rows x cols` grid.
///
/// Points of cell `i` (row-major) occupy `offsets[i]..offsets[i] + sizes[i]`
/// of the reordered point array. `offsets` is the exclusive prefix sum of
/// `sizes`.
#[derive(Clone, Debug)]
pub struct BucketGrid {
    /// Reordered points, grouped by cell
    points: Vec<Point>,
    /// Reordered slot -> position in the caller's input
    origin: Vec<usize>,
    offsets: Vec<usize>,
    sizes: Vec<usize>,
    spec: GridSpec,
    rows: usize,
    cols: usize,
}

impl BucketGrid {
    /// Builds the grid, taking ownership of the points.
    ///
    /// # Errors
    /// - [`RadialError::InvalidSpec`] for unusable geometry.
    /// - [`RadialError::OutOfBoundsPoint`] for the first point outside
    ///   `[0, height) x [0, width)`; no grid is built in that case.
    ///
    /// # Example
    /// ```
    /// use radialcells::{BucketGrid, GridSpec, Point};
    /// let spec = GridSpec::new(100.0, 100.0, 10.0).unwrap();
    /// let grid = BucketGrid::new(vec![Point::new(5.0, 15.0)], spec).unwrap();
    /// assert_eq!(grid.rows(), 10);
    /// assert_eq!(grid.cell_range(grid.cell_of(grid.point(0))), 0..1);
    /// ```
    pub fn new(points: Vec<Point>, spec: GridSpec) -> Result<Self> {
        spec.validate()?;
        let rows = spec.rows();
        let cols = spec.cols();

        let mut sizes = vec![0usize; rows * cols];
        let mut cell_ids = Vec::with_capacity(points.len());
        for (index, pt) in points.iter().enumerate() {
            // Negated form rejects NaN too
            if !(pt.row >= 0.0 && pt.row < spec.height && pt.col >= 0.0 && pt.col < spec.width) {
                warn!(index, row = pt.row, col = pt.col, "point out of grid bounds");
                return Err(RadialError::OutOfBoundsPoint {
                    index,
                    row: pt.row,
                    col: pt.col,
                });
            }
            // Division can round up onto the far edge for values just below it
            let r = ((pt.row / spec.step).floor() as usize).min(rows - 1);
            let c = ((pt.col / spec.step).floor() as usize).min(cols - 1);
            let id = r * cols + c;
            sizes[id] += 1;
            cell_ids.push(id);
        }

        let mut offsets = Vec::with_capacity(sizes.len());
        let mut total = 0;
        for &n in &sizes {
            offsets.push(total);
            total += n;
        }

        let mut cursor = offsets.clone();
        let mut sorted = vec![Point::default(); points.len()];
        let mut origin = vec![0usize; points.len()];
        for (index, (pt, id)) in points.into_iter().zip(cell_ids).enumerate() {
            let slot = cursor[id];
            cursor[id] += 1;
            sorted[slot] = pt;
            origin[slot] = index;
        }

        debug!(
            rows,
            cols,
            points = sorted.len(),
            occupied = sizes.iter().filter(|&&n| n > 0).count(),
            "bucket grid built"
        );

        Ok(Self {
            points: sorted,
            origin,
            offsets,
            sizes,
            spec,
            rows,
            cols,
        })
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the grid holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of cell rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell side length.
    #[must_use]
    pub fn step(&self) -> f32 {
        self.spec.step
    }

    /// Extent along columns.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.spec.width
    }

    /// Extent along rows.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.spec.height
    }

    /// Geometry the grid was built with.
    #[must_use]
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// Points in bucket order. Query results index into this slice.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Point stored at a reordered slot.
    ///
    /// # Panics
    /// Panics if `slot >= self.len()`.
    #[must_use]
    pub fn point(&self, slot: usize) -> Point {
        self.points[slot]
    }

    /// Position in the construction input of the point stored at `slot`.
    ///
    /// # Panics
    /// Panics if `slot >= self.len()`.
    #[must_use]
    pub fn original_index(&self, slot: usize) -> usize {
        self.origin[slot]
    }

    /// Grid coordinate along one axis: `floor(value / step)`.
    #[inline]
    #[must_use]
    pub fn to_cell(&self, value: f32) -> i32 {
        (value / self.spec.step).floor() as i32
    }

    /// Grid coordinate of the cell that ends at or just after `value`:
    /// `ceil(value / step) - 1`.
    ///
    /// Differs from [`to_cell`](Self::to_cell) only when `value` sits exactly
    /// on a grid line, where it picks the cell before the line.
    #[inline]
    #[must_use]
    pub fn to_cell_before(&self, value: f32) -> i32 {
        (value / self.spec.step).ceil() as i32 - 1
    }

    /// Cell containing the plane coordinate `(row, col)`.
    #[inline]
    #[must_use]
    pub fn point_as_cell(&self, row: f32, col: f32) -> GridCell {
        GridCell::new(self.to_cell(row), self.to_cell(col))
    }

    /// Cell containing `pt`.
    #[inline]
    #[must_use]
    pub fn cell_of(&self, pt: Point) -> GridCell {
        self.point_as_cell(pt.row, pt.col)
    }

    /// Grid line coordinate near `value`.
    ///
    /// [`Snap::Floor`] returns the leading edge of the cell containing
    /// `value`; [`Snap::Next`] returns the line one step after it, which is
    /// strictly greater than `value`.
    #[inline]
    #[must_use]
    pub fn anchor(&self, value: f32, snap: Snap) -> f32 {
        let base = (value / self.spec.step).floor();
        match snap {
            Snap::Floor => base * self.spec.step,
            Snap::Next => (base + 1.0) * self.spec.step,
        }
    }

    /// Whether `cell` addresses storage inside the grid.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.r >= 0 && cell.c >= 0 && (cell.r as usize) < self.rows && (cell.c as usize) < self.cols
    }

    /// Slice of [`points`](Self::points) holding the points of `cell`.
    ///
    /// Empty for cells without points and for cells outside the grid.
    #[inline]
    #[must_use]
    pub fn cell_range(&self, cell: GridCell) -> Range<usize> {
        if !self.in_bounds(cell) {
            return 0..0;
        }
        let id = cell.r as usize * self.cols + cell.c as usize;
        let start = self.offsets[id];
        start..start + self.sizes[id]
    }

    /// Slice of [`points`](Self::points) spanning cells `start_col..=end_col`
    /// of `row`.
    ///
    /// Cells of one row are adjacent in bucket order, so the span is a single
    /// range.
    ///
    /// # Panics
    /// Panics if the row or either column lies outside the grid.
    #[inline]
    #[must_use]
    pub fn row_range(&self, start_col: usize, end_col: usize, row: usize) -> Range<usize> {
        debug_assert!(start_col <= end_col, "row range columns reversed");
        let base = row * self.cols;
        let first = base + start_col;
        let last = base + end_col;
        self.offsets[first]..self.offsets[last] + self.sizes[last]
    }
}
