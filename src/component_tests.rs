//! Component tests for RadialCells - each public operation and the documented
//! query scenarios, run against both tracing strategies where it matters.

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::{GridCell, RadialError};

    const STRATEGIES: [TraceStrategy; 2] = [TraceStrategy::ArcWalk, TraceStrategy::AxisCrossing];

    fn build(points: &[(f32, f32)], strategy: TraceStrategy) -> RadialCells {
        let pts = points.iter().map(|&p| Point::from(p)).collect();
        RadialCells::new(pts, GridSpec::new(100.0, 100.0, 10.0).expect("spec"))
            .expect("build")
            .with_strategy(strategy)
    }

    /// Query and return hits as sorted input positions
    fn query_ids(cells: &mut RadialCells, cx: f32, cy: f32, r: f32) -> Vec<usize> {
        let mut ids = Vec::new();
        cells.radius_query_original(cx, cy, r, &mut ids).expect("query");
        ids.sort_unstable();
        ids
    }

    // ============================================================================
    // CONSTRUCTION TESTS
    // ============================================================================

    #[test]
    fn test_build_empty() {
        let mut cells = build(&[], TraceStrategy::ArcWalk);
        assert!(cells.is_empty());
        assert!(cells.radius_query(50.0, 50.0, 30.0).expect("query").is_empty());
    }

    #[test]
    fn test_build_accepts_origin() {
        let cells = build(&[(0.0, 0.0)], TraceStrategy::ArcWalk);
        assert_eq!(cells.len(), 1);
    }

    #[test]
    fn test_build_rejects_far_edges() {
        let spec = GridSpec::new(100.0, 100.0, 10.0).expect("spec");
        let row_edge = RadialCells::new(vec![Point::new(100.0, 0.0)], spec);
        assert!(
            matches!(row_edge, Err(RadialError::OutOfBoundsPoint { index: 0, .. })),
            "row == height must be rejected"
        );
        let col_edge = RadialCells::new(vec![Point::new(0.0, 5.0), Point::new(0.0, 100.0)], spec);
        assert!(
            matches!(col_edge, Err(RadialError::OutOfBoundsPoint { index: 1, .. })),
            "col == width must be rejected"
        );
    }

    #[test]
    fn test_build_rejects_bad_spec() {
        assert!(matches!(GridSpec::new(100.0, 100.0, -1.0), Err(RadialError::InvalidSpec { .. })));
    }

    // ============================================================================
    // BASIC SCENARIO TESTS
    // ============================================================================

    #[test]
    fn test_three_point_scenario() {
        for strategy in STRATEGIES {
            let mut cells = build(&[(5.0, 5.0), (5.0, 15.0), (95.0, 95.0)], strategy);
            assert_eq!(query_ids(&mut cells, 5.0, 5.0, 6.0), vec![0], "{strategy:?}: radius 6");
            assert_eq!(query_ids(&mut cells, 5.0, 5.0, 11.0), vec![0, 1], "{strategy:?}: radius 11");
            assert!(query_ids(&mut cells, 50.0, 50.0, 5.0).is_empty(), "{strategy:?}: empty area");
        }
    }

    #[test]
    fn test_point_on_circle_excluded() {
        for strategy in STRATEGIES {
            let mut cells = build(&[(5.0, 5.0), (5.0, 15.0)], strategy);
            assert_eq!(query_ids(&mut cells, 5.0, 5.0, 10.0), vec![0], "{strategy:?}: distance == radius");
            assert_eq!(query_ids(&mut cells, 5.0, 5.0, 10.5), vec![0, 1], "{strategy:?}: just inside");
        }
    }

    #[test]
    fn test_points_on_circle_at_grid_lines_excluded() {
        for strategy in STRATEGIES {
            // Centre (x 30, y 20); the other three points sit exactly 20 away
            let mut cells = build(&[(20.0, 30.0), (20.0, 50.0), (40.0, 30.0), (0.0, 30.0)], strategy);
            assert_eq!(query_ids(&mut cells, 30.0, 20.0, 20.0), vec![0], "{strategy:?}");
        }
    }

    #[test]
    fn test_zero_radius_with_coincident_point() {
        for strategy in STRATEGIES {
            let mut cells = build(&[(5.0, 5.0), (20.0, 20.0)], strategy);
            assert!(query_ids(&mut cells, 5.0, 5.0, 0.0).is_empty(), "{strategy:?}: inside a cell");
            assert!(query_ids(&mut cells, 20.0, 20.0, 0.0).is_empty(), "{strategy:?}: on a vertex");
        }
    }

    #[test]
    fn test_small_radius_inside_one_cell() {
        for strategy in STRATEGIES {
            let mut cells = build(&[(44.0, 44.0), (45.0, 46.5), (48.0, 48.0)], strategy);
            assert_eq!(query_ids(&mut cells, 45.0, 45.0, 2.0), vec![0, 1], "{strategy:?}");
        }
    }

    #[test]
    fn test_invalid_radius_is_error() {
        let mut cells = build(&[(5.0, 5.0)], TraceStrategy::ArcWalk);
        assert_eq!(cells.radius_query(5.0, 5.0, -0.5).unwrap_err(), RadialError::InvalidRadius(-0.5));
    }

    // ============================================================================
    // ROW-GAP INCLUSION TESTS
    // ============================================================================

    #[test]
    fn test_dense_row_interior_cells_included() {
        // One point in the middle of every cell of row 5
        let row: Vec<(f32, f32)> = (0..10).map(|c| (55.0, c as f32 * 10.0 + 5.0)).collect();
        for strategy in STRATEGIES {
            let mut cells = build(&row, strategy);
            assert_eq!(
                query_ids(&mut cells, 50.0, 55.0, 30.0),
                vec![2, 3, 4, 5, 6, 7],
                "{strategy:?}: all points with |col - 50| < 30"
            );

            let boundary: Vec<i32> = cells.boundary_cells().iter().filter(|c| c.r == 5).map(|c| c.c).collect();
            for interior in 3..=6 {
                assert!(
                    !boundary.contains(&interior),
                    "{strategy:?}: column {interior} should be reached through the row gap"
                );
            }
        }
    }

    #[test]
    fn test_full_grid_uses_bulk_path() {
        let pts: Vec<(f32, f32)> = (0..10)
            .flat_map(|r| (0..10).map(move |c| (r as f32 * 10.0 + 5.0, c as f32 * 10.0 + 5.0)))
            .collect();
        for strategy in STRATEGIES {
            let mut cells = build(&pts, strategy);
            let hits = cells.radius_query_to_vec(50.0, 50.0, 32.0).expect("query");
            assert_eq!(hits.len(), 32, "{strategy:?}: cell centres within 32 of (50, 50)");

            let grid = cells.grid();
            let boundary = cells.boundary_cells();
            let bulk = hits
                .iter()
                .filter(|h| boundary.binary_search(&grid.cell_of(grid.point(h.index))).is_err())
                .count();
            assert!(bulk > 0, "{strategy:?}: interior cells should come from row gaps");
        }
    }

    #[test]
    fn test_row_gap_clamped_at_grid_edge() {
        // Circle hangs over the left edge; row 5 gap runs from outside the grid
        let row: Vec<(f32, f32)> = (0..10).map(|c| (55.0, c as f32 * 10.0 + 5.0)).collect();
        for strategy in STRATEGIES {
            let mut cells = build(&row, strategy);
            assert_eq!(query_ids(&mut cells, 2.0, 55.0, 24.0), vec![0, 1, 2], "{strategy:?}");
            assert_eq!(query_ids(&mut cells, 98.0, 55.0, 24.0), vec![7, 8, 9], "{strategy:?}");
        }
    }

    #[test]
    fn test_single_column_grid_keeps_interior_column() {
        // Boundary cells of row 5 fall on both sides of the only column
        let spec = GridSpec::new(10.0, 100.0, 10.0).expect("spec");
        for strategy in STRATEGIES {
            let mut cells = RadialCells::new(vec![Point::new(50.0, 5.0)], spec)
                .expect("build")
                .with_strategy(strategy);
            assert_eq!(query_ids(&mut cells, 5.0, 50.0, 25.0), vec![0], "{strategy:?}");
        }
    }

    #[test]
    fn test_row_gap_beyond_grid_edge_skipped() {
        // Row 5 is bounded by cells -9 and 0; the gap between lies left of the grid
        let row: Vec<(f32, f32)> = (0..10).map(|c| (55.0, c as f32 * 10.0 + 5.0)).collect();
        for strategy in STRATEGIES {
            let mut cells = build(&row, strategy);
            assert!(query_ids(&mut cells, -40.0, 55.0, 45.0).is_empty(), "{strategy:?}: point on the circle");
            assert_eq!(query_ids(&mut cells, -40.0, 55.0, 46.0), vec![0], "{strategy:?}: first column only");
        }
    }

    // ============================================================================
    // BUFFER REUSE TESTS
    // ============================================================================

    #[test]
    fn test_results_overwritten_by_next_query() {
        let mut cells = build(&[(5.0, 5.0), (95.0, 95.0)], TraceStrategy::ArcWalk);
        let first = cells.radius_query_to_vec(5.0, 5.0, 3.0).expect("query");
        assert_eq!(first.len(), 1);
        assert!(cells.radius_query(50.0, 50.0, 3.0).expect("query").is_empty());
        assert!(cells.results().is_empty(), "buffer holds only the latest query");
        assert_eq!(first.len(), 1, "copied results survive later queries");
    }

    #[test]
    fn test_boundary_cells_cover_grid_edges() {
        let mut cells = build(&[], TraceStrategy::ArcWalk);
        let _ = cells.radius_query(0.0, 0.0, 15.0).expect("query");
        assert!(
            cells.boundary_cells().iter().any(|&GridCell { r, c }| r < 0 || c < 0),
            "tracing is not clipped to the grid"
        );
    }

    #[test]
    fn test_grid_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BucketGrid>();
        assert_send_sync::<RadialCells>();
    }
}
