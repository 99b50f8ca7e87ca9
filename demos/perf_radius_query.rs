//! Performance profiling example for radius_query
//!
//! This example performs intensive radius queries on a bucket grid holding
//! 1 million random points. Designed to be used with low-level profilers like `samply`:
//!
//! ```bash
//! cargo run --release --example perf_radius_query
//! samply record cargo run --release --example perf_radius_query
//! ```

use radialcells::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const NUM_POINTS: usize = 1_000_000;
const NUM_QUERIES: usize = 10_000;
const SIDE: f32 = 1000.0;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    println!("Building bucket grid with {NUM_POINTS} random points...");
    let mut rng = rand::rngs::StdRng::seed_from_u64(12345);
    let points: Vec<Point> = (0..NUM_POINTS)
        .map(|_| Point::new(rng.random_range(0.0..SIDE), rng.random_range(0.0..SIDE)))
        .collect();

    let build_start = Instant::now();
    let spec = GridSpec::new(SIDE, SIDE, 5.0).expect("valid grid spec");
    let mut cells = RadialCells::new(points, spec).expect("points inside the grid");
    let build_duration = build_start.elapsed();

    let mut found = 0_usize;
    let query_start = Instant::now();

    for _ in 0..NUM_QUERIES {
        let center_x = rng.random_range(0.0..SIDE);
        let center_y = rng.random_range(0.0..SIDE);
        let radius = 5.0;
        found += cells.radius_query(center_x, center_y, radius).map_or(0, <[Neighbor]>::len);
    }

    let query_duration = query_start.elapsed();

    println!("Grid built in {:.2}ms", build_duration.as_secs_f64() * 1000.0);
    println!(
        "Completed {} queries in {:.2}ms ({:.2}µs per query), {} hits",
        NUM_QUERIES,
        query_duration.as_secs_f64() * 1000.0,
        query_duration.as_secs_f64() * 1_000_000.0 / NUM_QUERIES as f64,
        found
    );
}
