//! # radialcells - Bucket Grid Radius Queries
//!
//! A Rust library providing a static spatial index over a bounded 2D point set
//! that answers "all points within radius r of (x, y)" queries.
//!
//! ## Features
//!
//! - **Bucket Grid Storage**: Points are sorted into uniform cells, each cell a contiguous slice
//! - **Boundary Tracing**: Only cells on the circle's edge are distance tested
//! - **Row-Gap Inclusion**: Cells enclosed by the boundary are copied without per-point tests
//! - **Allocation-Free Queries**: Scratch buffers are owned by the engine and reused
//!
//! ## Quick Start
//!
//! ```rust
//! use radialcells::prelude::*;
//!
//! // Points are (row, col), i.e. (y, x), inside [0, height) x [0, width)
//! let points = vec![
//!     Point::new(5.0, 5.0),    // Point 0
//!     Point::new(5.0, 15.0),   // Point 1
//!     Point::new(95.0, 95.0),  // Point 2
//! ];
//!
//! // 100 x 100 area cut into 10 x 10 cells
//! let spec = GridSpec::new(100.0, 100.0, 10.0).unwrap();
//! let mut cells = RadialCells::new(points, spec).unwrap();
//!
//! // Query centre is (x, y) = (col, row)
//! let hits = cells.radius_query(5.0, 5.0, 11.0).unwrap().to_vec();
//! assert_eq!(hits.len(), 2);
//!
//! // Hit indices refer to the grid's bucket-ordered storage
//! for hit in hits {
//!     let p = cells.grid().point(hit.index);
//!     println!("({}, {}) at distance {:.2}", p.row, p.col, hit.distance);
//! }
//!
//! // Or translate them back to input positions
//! let mut input_ids = Vec::new();
//! cells.radius_query_original(5.0, 5.0, 11.0, &mut input_ids).unwrap();
//! input_ids.sort_unstable();
//! assert_eq!(input_ids, vec![0, 1]);
//! ```
//!
//! ## How It Works
//!
//! Construction bucket sorts the points into a `rows x cols` grid, storing for
//! every cell an offset and a size into one reordered point array. Cells of a
//! row are adjacent in that array, so any run of cells within a row is a single
//! slice.
//!
//! A query walks the circle's edge one grid vertex at a time and collects the
//! cells the edge passes through. Those boundary cells are sorted by
//! (row, col) in place and their points are tested exactly. Between two
//! boundary cells of the same row every cell lies fully inside the circle, so
//! its points are included as a whole slice. Work is proportional to
//! `radius / step` plus the number of points found, not to the size of the grid.

pub mod cell_heap;
pub mod error;
pub mod fast_sqrt;
pub mod grid;
pub mod prelude;
pub mod radial_cells;
pub mod tracer;

#[cfg(test)]
mod component_tests;

pub use cell_heap::CellHeap;
pub use error::{RadialError, Result};
pub use fast_sqrt::fast_sqrt;
pub use grid::{BucketGrid, GridCell, GridSpec, Point, Snap};
pub use radial_cells::{Neighbor, RadialCells};
pub use tracer::TraceStrategy;
