//! Boundary tracing: which grid cells does a circle's edge pass through?
//!
//! The default [`TraceStrategy::ArcWalk`] follows the circle one grid vertex
//! at a time, so the number of cells it emits grows with `radius / step`
//! rather than with the area of the circle. [`TraceStrategy::AxisCrossing`]
//! intersects the circle with every grid line in its bounding box instead.
//!
//! Both strategies shrink the radius by [`RADIUS_EPS`] before tracing, which
//! biases boundary membership slightly inwards and keeps rounding noise on
//! the exact boundary from producing spurious cells.
//!
//! Emitted cells are unordered, may repeat and may lie outside the grid. The
//! only guarantee the query engine relies on is completeness: every in-grid
//! cell crossed by the (shrunk) circle is present once the four
//! [cardinal cells](push_cardinal_cells) are added.

use crate::cell_heap::CellHeap;
use crate::grid::{BucketGrid, GridCell, Snap};

/// Amount the radius is shrunk by before tracing.
pub const RADIUS_EPS: f32 = 1e-6;

/// Algorithm used to collect boundary cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TraceStrategy {
    /// Incremental walk along four quarter arcs (default).
    #[default]
    ArcWalk,
    /// Intersection of the circle with every vertical and horizontal grid
    /// line it spans.
    AxisCrossing,
}

impl TraceStrategy {
    /// Resets `heap` and fills it with the boundary cells of the circle.
    pub fn trace(self, grid: &BucketGrid, heap: &mut CellHeap, center_x: f32, center_y: f32, radius: f32) {
        match self {
            Self::ArcWalk => trace_arc_walk(grid, heap, center_x, center_y, radius),
            Self::AxisCrossing => trace_axis_crossings(grid, heap, center_x, center_y, radius),
        }
    }
}

/// One quarter of the circle.
///
/// The walk sits on a grid vertex. If the vertex is inside the circle it
/// moves by `on_inside`, otherwise by `on_outside`, and after each move it
/// records the cell touching the vertex on the `shift` side.
struct Arc {
    on_inside: (f32, f32),
    on_outside: (f32, f32),
    shift: (f32, f32),
}

impl Arc {
    fn walk(
        &self,
        grid: &BucketGrid,
        heap: &mut CellHeap,
        inside: impl Fn(f32, f32) -> bool,
        (mut x, mut y): (f32, f32),
        past_stop: impl Fn(f32, f32) -> bool,
    ) {
        loop {
            let (dx, dy) = if inside(x, y) { self.on_inside } else { self.on_outside };
            x += dx;
            y += dy;
            if past_stop(x, y) {
                break;
            }
            heap.push(grid.point_as_cell(y + self.shift.1, x + self.shift.0));
        }
    }
}

/// Collects boundary cells by walking the four quarter arcs
/// left->top, top->right, right->bottom and bottom->left.
///
/// Each arc starts on the grid line next to one cardinal point of the circle
/// and stops once it passes the line of the following cardinal point, shifted
/// by half a cell.
pub fn trace_arc_walk(grid: &BucketGrid, heap: &mut CellHeap, center_x: f32, center_y: f32, radius: f32) {
    heap.reset();

    let radius = radius - RADIUS_EPS;
    let r2 = radius * radius;
    let step = grid.step();
    let half = step / 2.0;
    let inside = |x: f32, y: f32| {
        let dx = x - center_x;
        let dy = y - center_y;
        dx * dx + dy * dy < r2
    };

    // left -> top
    let start = (grid.anchor(center_x - radius, Snap::Next), grid.anchor(center_y, Snap::Floor));
    let stop = grid.anchor(center_x, Snap::Next) + half;
    Arc {
        on_inside: (0.0, -step),
        on_outside: (step, 0.0),
        shift: (-half, half),
    }
    .walk(grid, heap, inside, start, |x, _| x > stop);

    // top -> right
    let start = (grid.anchor(center_x, Snap::Next), grid.anchor(center_y - radius, Snap::Next));
    let stop = grid.anchor(center_y, Snap::Next) + half;
    Arc {
        on_inside: (step, 0.0),
        on_outside: (0.0, step),
        shift: (-half, -half),
    }
    .walk(grid, heap, inside, start, |_, y| y > stop);

    // right -> bottom
    let start = (grid.anchor(center_x + radius, Snap::Floor), grid.anchor(center_y, Snap::Next));
    let stop = grid.anchor(center_x, Snap::Floor) - half;
    Arc {
        on_inside: (0.0, step),
        on_outside: (-step, 0.0),
        shift: (half, -half),
    }
    .walk(grid, heap, inside, start, |x, _| x < stop);

    // bottom -> left
    let start = (grid.anchor(center_x, Snap::Floor), grid.anchor(center_y + radius, Snap::Floor));
    let stop = grid.anchor(center_y, Snap::Floor) - half;
    Arc {
        on_inside: (-step, 0.0),
        on_outside: (0.0, -step),
        shift: (half, half),
    }
    .walk(grid, heap, inside, start, |_, y| y < stop);
}

/// Collects boundary cells from the circle's intersections with grid lines.
///
/// For every vertical line crossing the circle the two intersection points
/// are mapped to the cells on both sides of the line; horizontal lines are
/// handled the same way. Lines are limited to the grid's own lines, but the
/// cells are not clipped, so a row that the circle leaves through the grid's
/// edge still gets a boundary cell on that side.
pub fn trace_axis_crossings(grid: &BucketGrid, heap: &mut CellHeap, center_x: f32, center_y: f32, radius: f32) {
    heap.reset();

    let radius = radius - RADIUS_EPS;
    let r2 = radius * radius;
    let step = grid.step();
    let half = step / 2.0;
    let last_x = grid.cols() as f32 * step;
    let last_y = grid.rows() as f32 * step;

    let mut x = grid.anchor(center_x - radius, Snap::Next).max(0.0);
    let end = grid.anchor(center_x + radius, Snap::Floor).min(last_x);
    while x <= end {
        let left = grid.to_cell(x - half);
        let right = grid.to_cell(x + half);
        let (top, bottom) = crossings(x, center_x, center_y, r2);
        for r in [grid.to_cell(top), grid.to_cell(bottom)] {
            heap.push(GridCell::new(r, left));
            heap.push(GridCell::new(r, right));
        }
        x += step;
    }

    let mut y = grid.anchor(center_y - radius, Snap::Next).max(0.0);
    let end = grid.anchor(center_y + radius, Snap::Floor).min(last_y);
    while y <= end {
        let above = grid.to_cell(y - half);
        let below = grid.to_cell(y + half);
        let (lo, hi) = crossings(y, center_y, center_x, r2);
        for c in [grid.to_cell(lo), grid.to_cell(hi)] {
            heap.push(GridCell::new(above, c));
            heap.push(GridCell::new(below, c));
        }
        y += step;
    }
}

/// Where the line `axis = line` meets the circle, along the other axis.
fn crossings(line: f32, center_along: f32, center_across: f32, r2: f32) -> (f32, f32) {
    let d = line - center_along;
    // Clamped so a tangent line at the rounding limit yields one point, not NaN
    let h = (r2 - d * d).max(0.0).sqrt();
    (center_across - h, center_across + h)
}

/// Pushes the cells holding the circle's four cardinal points.
///
/// A cardinal cell can be crossed by the circle without any of its corners
/// falling inside it, which no tracer detects on its own. Each point is
/// snapped towards the centre, so a cardinal point lying exactly on a grid
/// line selects the cell that actually overlaps the disc.
///
/// Needed for every radius, not just radii below one step: on a 10-step grid
/// the circle at (5, 30.5) with radius 11 dips into row 1 between two
/// vertices, and without these cells the point (row 19.8, col 5) is lost.
pub fn push_cardinal_cells(grid: &BucketGrid, heap: &mut CellHeap, center_x: f32, center_y: f32, radius: f32) {
    let row = grid.to_cell(center_y);
    let col = grid.to_cell(center_x);
    heap.push(GridCell::new(row, grid.to_cell(center_x - radius)));
    heap.push(GridCell::new(grid.to_cell(center_y - radius), col));
    heap.push(GridCell::new(row, grid.to_cell_before(center_x + radius)));
    heap.push(GridCell::new(grid.to_cell_before(center_y + radius), col));
}
