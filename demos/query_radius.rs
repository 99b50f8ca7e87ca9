//! Find points within a radius of a query centre.
//!
//! This example builds a small bucket grid, runs a few radius queries and
//! shows the build and query logs. Set `RUST_LOG=trace` to see per-query
//! statistics:
//!
//! ```bash
//! RUST_LOG=trace cargo run --example query_radius
//! ```

use radialcells::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    // Points are (row, col) = (y, x)
    let points = vec![
        Point::new(5.0, 5.0),   // Point 0
        Point::new(5.0, 15.0),  // Point 1: 10 away from (5, 5)
        Point::new(95.0, 95.0), // Point 2: far corner
    ];
    let spec = GridSpec::new(100.0, 100.0, 10.0).expect("valid grid spec");
    let mut cells = RadialCells::new(points, spec).expect("points inside the grid");

    println!("=== Radius Query Example ===\n");

    let mut ids = Vec::new();

    // Query 1: only the coincident point
    println!("Query 1: Points within radius 6 of (5, 5):");
    cells.radius_query_original(5.0, 5.0, 6.0, &mut ids).expect("query");
    ids.sort_unstable();
    println!("  Found {} points: {:?}", ids.len(), ids);
    assert_eq!(ids, vec![0], "Only point 0 is within 6");
    println!("  ✓ Correct!\n");

    // Query 2: the point exactly 10 away is excluded at radius 10
    println!("Query 2: Points within radius 10 of (5, 5):");
    cells.radius_query_original(5.0, 5.0, 10.0, &mut ids).expect("query");
    println!("  Found {} points: {:?}", ids.len(), ids);
    assert_eq!(ids, vec![0], "Points on the circle are excluded");
    println!("  ✓ Correct!\n");

    // Query 3: radius 11 reaches point 1
    println!("Query 3: Points within radius 11 of (5, 5):");
    let hits = cells.radius_query_to_vec(5.0, 5.0, 11.0).expect("query");
    for hit in &hits {
        let p = cells.grid().point(hit.index);
        println!("  slot {} at ({}, {}), distance {:.3}", hit.index, p.row, p.col, hit.distance);
    }
    assert_eq!(hits.len(), 2, "Expected points 0 and 1");
    println!("  ✓ Correct!\n");

    // Query 4: empty area
    println!("Query 4: Points within radius 5 of (50, 50):");
    let hits = cells.radius_query(50.0, 50.0, 5.0).expect("query");
    println!("  Found {} points", hits.len());
    assert!(hits.is_empty(), "Nothing near the middle");
    println!("  ✓ Correct!\n");

    // Invalid input is reported, not panicked on
    println!("=== Error Handling ===\n");
    match cells.radius_query(5.0, 5.0, -1.0) {
        Ok(_) => println!("  unexpected success"),
        Err(err) => println!("  negative radius: {err}"),
    }
    match RadialCells::new(vec![Point::new(100.0, 0.0)], spec) {
        Ok(_) => println!("  unexpected success"),
        Err(err) => println!("  point on the far edge: {err}"),
    }
}
