//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use radialcells::prelude::*;
//! ```

pub use crate::{BucketGrid, GridSpec, Neighbor, Point, RadialCells, RadialError, TraceStrategy};
