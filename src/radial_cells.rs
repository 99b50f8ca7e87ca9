//! Radius query engine.
//!
//! [`RadialCells`] pairs a shared, immutable [`BucketGrid`] with the scratch
//! state one query needs: the boundary cell heap and the result buffer. Both
//! buffers are reused by every call, so a warmed-up engine answers queries
//! without allocating. The price is that results borrow the engine and are
//! overwritten by the next query; copy them out with
//! [`RadialCells::radius_query_to_vec`] when they must outlive it.
//!
//! One engine serves one caller at a time. For concurrent queries create one
//! engine per thread with [`RadialCells::fork`]; the grid itself is shared.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::cell_heap::CellHeap;
use crate::error::{RadialError, Result};
use crate::fast_sqrt::fast_sqrt;
use crate::grid::{BucketGrid, GridCell, GridSpec, Point};
use crate::tracer::{TraceStrategy, push_cardinal_cells};

/// Largest distance from the origin, in cells, that the tracers step
/// through. Queries reaching further are answered by a full scan, since `f32`
/// increments start to be lost to rounding.
const MAX_SPAN_CELLS: f32 = 4_194_304.0; // 2^22

/// One query hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Slot of the point in [`BucketGrid::points`] (bucket order, not input
    /// order; see [`BucketGrid::original_index`]).
    pub index: usize,
    /// Approximate distance to the query centre (about 0.2% relative error).
    pub distance: f32,
}

/// Grid-accelerated "all points within radius" queries.
///
/// # Example
/// ```
/// use radialcells::prelude::*;
///
/// let points = vec![Point::new(5.0, 5.0), Point::new(5.0, 15.0), Point::new(95.0, 95.0)];
/// let spec = GridSpec::new(100.0, 100.0, 10.0).unwrap();
/// let mut cells = RadialCells::new(points, spec).unwrap();
///
/// let hits = cells.radius_query(5.0, 5.0, 11.0).unwrap();
/// assert_eq!(hits.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct RadialCells {
    grid: Arc<BucketGrid>,
    /// Boundary cells of the last query, sorted after tracing
    heap: CellHeap,
    results: Vec<Neighbor>,
    strategy: TraceStrategy,
}

impl RadialCells {
    /// Builds the grid over `points` and an engine to query it.
    ///
    /// # Errors
    /// Propagates the errors of [`BucketGrid::new`].
    pub fn new(points: Vec<Point>, spec: GridSpec) -> Result<Self> {
        Ok(Self::from_grid(Arc::new(BucketGrid::new(points, spec)?)))
    }

    /// Creates an engine over an existing, possibly shared, grid.
    #[must_use]
    pub fn from_grid(grid: Arc<BucketGrid>) -> Self {
        Self {
            grid,
            heap: CellHeap::new(),
            results: Vec::new(),
            strategy: TraceStrategy::default(),
        }
    }

    /// Selects the boundary tracing algorithm.
    #[must_use]
    pub fn with_strategy(mut self, strategy: TraceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replaces the boundary tracing algorithm.
    pub fn set_strategy(&mut self, strategy: TraceStrategy) {
        self.strategy = strategy;
    }

    /// Boundary tracing algorithm in use.
    #[must_use]
    pub fn strategy(&self) -> TraceStrategy {
        self.strategy
    }

    /// The indexed grid.
    #[must_use]
    pub fn grid(&self) -> &BucketGrid {
        &self.grid
    }

    /// Handle to the shared grid.
    #[must_use]
    pub fn shared_grid(&self) -> Arc<BucketGrid> {
        Arc::clone(&self.grid)
    }

    /// New engine over the same grid with its own, empty scratch buffers.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self::from_grid(self.shared_grid()).with_strategy(self.strategy)
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Whether the index holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Results of the most recent successful query.
    #[must_use]
    pub fn results(&self) -> &[Neighbor] {
        &self.results
    }

    /// Sorted, unique boundary cells traced by the most recent query.
    #[must_use]
    pub fn boundary_cells(&self) -> &[GridCell] {
        self.heap.as_slice()
    }

    /// Finds every point strictly closer than `radius` to
    /// `(center_x, center_y)` (column, row).
    ///
    /// Results come in no particular order and stay valid until the next
    /// query on this engine.
    ///
    /// An infinite radius returns every point. Circles that miss the grid
    /// return nothing, however far away their centre is.
    ///
    /// # Errors
    /// - [`RadialError::InvalidRadius`] for a negative or NaN radius.
    /// - [`RadialError::InvalidCenter`] for a non-finite centre.
    ///
    /// The previous results are left untouched on error.
    pub fn radius_query(&mut self, center_x: f32, center_y: f32, radius: f32) -> Result<&[Neighbor]> {
        self.run_query(center_x, center_y, radius)?;
        Ok(&self.results)
    }

    /// Like [`radius_query`](Self::radius_query) but returns an owned copy.
    ///
    /// # Errors
    /// Same as [`radius_query`](Self::radius_query).
    pub fn radius_query_to_vec(&mut self, center_x: f32, center_y: f32, radius: f32) -> Result<Vec<Neighbor>> {
        self.run_query(center_x, center_y, radius)?;
        Ok(self.results.clone())
    }

    /// Runs a query and writes the hits as positions in the original input
    /// passed to [`RadialCells::new`]. `out` is cleared first.
    ///
    /// # Errors
    /// Same as [`radius_query`](Self::radius_query); `out` is untouched on
    /// error.
    pub fn radius_query_original(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius: f32,
        out: &mut Vec<usize>,
    ) -> Result<()> {
        self.run_query(center_x, center_y, radius)?;
        out.clear();
        out.extend(self.results.iter().map(|hit| self.grid.original_index(hit.index)));
        Ok(())
    }

    fn check_query(center_x: f32, center_y: f32, radius: f32) -> Result<()> {
        // Negated comparison also catches NaN
        if !(radius >= 0.0) {
            warn!(radius, "rejected radius query");
            return Err(RadialError::InvalidRadius(radius));
        }
        if !center_x.is_finite() || !center_y.is_finite() {
            warn!(center_x, center_y, "rejected radius query");
            return Err(RadialError::InvalidCenter { x: center_x, y: center_y });
        }
        Ok(())
    }

    fn run_query(&mut self, center_x: f32, center_y: f32, radius: f32) -> Result<()> {
        Self::check_query(center_x, center_y, radius)?;
        self.results.clear();
        self.heap.reset();
        // Nothing is strictly closer than zero
        if radius == 0.0 || misses_grid(&self.grid, center_x, center_y, radius) {
            return Ok(());
        }
        let offset = center_x.abs().max(center_y.abs());
        if (offset + radius) / self.grid.step() > MAX_SPAN_CELLS {
            self.scan_all(center_x, center_y, radius);
            return Ok(());
        }

        let grid = &*self.grid;
        self.strategy.trace(grid, &mut self.heap, center_x, center_y, radius);
        push_cardinal_cells(grid, &mut self.heap, center_x, center_y, radius);
        self.heap.sort_dedup_in_place();
        let boundary = self.heap.as_slice();

        let points = grid.points();
        let r2 = radius * radius;

        // Boundary cells: exact test per point
        for &cell in boundary {
            let range = grid.cell_range(cell);
            let start = range.start;
            for (i, pt) in points[range].iter().enumerate() {
                let d2 = squared_distance(pt, center_x, center_y);
                if d2 < r2 {
                    self.results.push(Neighbor {
                        index: start + i,
                        distance: distance(d2),
                    });
                }
            }
        }

        // Cells strictly between two boundary cells of one row lie inside the
        // circle, so whole column spans are taken without distance tests.
        let rows = grid.rows();
        let last_col = grid.cols() as i32 - 1;
        for pair in boundary.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            if cur.r < 0 {
                continue;
            }
            if cur.r as usize >= rows {
                break;
            }
            if prev.r != cur.r || cur.c - prev.c <= 1 {
                continue;
            }
            let (start_col, end_col) = (prev.c + 1, cur.c - 1);
            if end_col < 0 || start_col > last_col {
                continue;
            }
            let first = start_col.max(0) as usize;
            let last = end_col.min(last_col) as usize;
            let range = grid.row_range(first, last, cur.r as usize);
            let start = range.start;
            for (i, pt) in points[range].iter().enumerate() {
                self.results.push(Neighbor {
                    index: start + i,
                    distance: distance(squared_distance(pt, center_x, center_y)),
                });
            }
        }

        trace!(
            center_x,
            center_y,
            radius,
            boundary = boundary.len(),
            hits = self.results.len(),
            "radius query"
        );
        Ok(())
    }

    /// Exact test of every point, for circles too wide to trace.
    fn scan_all(&mut self, center_x: f32, center_y: f32, radius: f32) {
        let r2 = radius * radius;
        for (index, pt) in self.grid.points().iter().enumerate() {
            let d2 = squared_distance(pt, center_x, center_y);
            if d2 < r2 {
                self.results.push(Neighbor {
                    index,
                    distance: distance(d2),
                });
            }
        }
        debug!(
            center_x,
            center_y,
            radius,
            hits = self.results.len(),
            "radius query scanned every point"
        );
    }
}

/// Whether the circle lies entirely beyond one edge of the grid.
///
/// Each comparison bounds the rounded `dx` or `dy` of every stored point from
/// below by `radius`, so no point can pass the `d2 < r2` test.
fn misses_grid(grid: &BucketGrid, center_x: f32, center_y: f32, radius: f32) -> bool {
    -center_x >= radius
        || center_x - grid.width() >= radius
        || -center_y >= radius
        || center_y - grid.height() >= radius
}

#[inline]
fn squared_distance(pt: &Point, center_x: f32, center_y: f32) -> f32 {
    let dy = pt.row - center_y;
    let dx = pt.col - center_x;
    dy * dy + dx * dx
}

#[inline]
fn distance(d2: f32) -> f32 {
    if d2 >= f32::MIN_POSITIVE { fast_sqrt(d2) } else { 0.0 }
}
