//! Approximate square root for result distances.
//!
//! Uses the classic inverse square root bit trick with one Newton-Raphson
//! refinement and inverts the result. Relative error stays below about 0.2%
//! for normal positive inputs, which is plenty for reporting distances.
//! Set membership in queries never depends on this value; it is decided on
//! squared distances.

const MAGIC: i32 = 0x5f37_59df;

/// Approximates `x.sqrt()` for a positive, normal, finite `x`.
///
/// The result for zero, subnormal, negative or non-finite inputs is
/// unspecified (it never panics). Radius queries only pass squared Euclidean
/// distances here.
///
/// # Example
/// ```
/// use radialcells::fast_sqrt;
/// let d = fast_sqrt(100.0);
/// assert!((d - 10.0).abs() < 0.02);
/// ```
#[inline]
#[must_use]
pub fn fast_sqrt(x: f32) -> f32 {
    let half = 0.5 * x;
    let bits = x.to_bits().cast_signed();
    let mut y = f32::from_bits(MAGIC.wrapping_sub(bits >> 1).cast_unsigned());
    y *= 1.5 - half * y * y;
    1.0 / y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_error(x: f32) -> f32 {
        let exact = x.sqrt();
        (fast_sqrt(x) - exact).abs() / exact
    }

    #[test]
    fn test_perfect_squares() {
        for v in [1.0_f32, 4.0, 9.0, 16.0, 25.0, 100.0, 10_000.0] {
            assert!(rel_error(v) < 2e-3, "relative error too large for {v}");
        }
    }

    #[test]
    fn test_error_bound_across_magnitudes() {
        let mut x = 1e-30_f32;
        while x < 1e30 {
            assert!(rel_error(x) < 2e-3, "relative error too large for {x}");
            x *= 3.7;
        }
    }

    #[test]
    fn test_monotone_enough_for_sorting_nearby_values() {
        // Approximation is never off by more than the gap between
        // squares of integers that are far apart.
        assert!(fast_sqrt(100.0) < fast_sqrt(144.0), "10 should stay below 12");
        assert!(fast_sqrt(0.25) < fast_sqrt(1.0), "0.5 should stay below 1");
    }

    #[test]
    fn test_does_not_panic_on_unsupported_inputs() {
        let _ = fast_sqrt(0.0);
        let _ = fast_sqrt(-1.0);
        let _ = fast_sqrt(f32::NAN);
        let _ = fast_sqrt(f32::INFINITY);
        let _ = fast_sqrt(-0.0);
    }
}
