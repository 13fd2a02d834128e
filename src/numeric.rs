//! Small numeric routines: float ranges, interpolation, differentiation, root finding
//! and extremum search.
//!
//! Every iterative routine carries an explicit iteration bound so a pathological
//! function cannot spin forever.

use crate::errors::GeometryError;

/// Upper bound on bisection steps in [`root`]
pub const MAX_BISECTION_ITERATIONS: usize = 200;

/// Upper bound on golden-section steps in [`minimum`]/[`maximum`]
pub const MAX_GOLDEN_ITERATIONS: usize = 200;

/// Upper bound on values produced by [`zrange`]
const MAX_ZRANGE_LEN: usize = 100_000;

const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Float range from `start` through `stop` (inclusive, within 10% of a step).
///
/// Values are computed as `start + i * step` so error does not accumulate. Returns just
/// `[start]` if `step` is not positive or the range is empty.
pub fn zrange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let mut vals = vec![start];
    if !(step > 0.0) || !step.is_finite() || !(stop > start) {
        return vals;
    }
    let mut last = start;
    while (last - stop).abs() / step > 0.1 && last < stop && vals.len() < MAX_ZRANGE_LEN {
        last = start + step * vals.len() as f64;
        vals.push(last);
    }
    vals
}

/// `n` evenly spaced values from `start` to `stop`
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![stop];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
        .collect()
}

/// Linear interpolation of `x` between `(x1, y1)` and `(x2, y2)`
pub fn interpolate(x1: f64, x2: f64, y1: f64, y2: f64, x: f64) -> f64 {
    ((y2 - y1) * x + x2 * y1 - x1 * y2) / (x2 - x1)
}

/// Numerical derivative using a symmetric difference.
///
/// The step is scaled to the magnitude of `x` so the estimate stays stable for both
/// tiny and huge arguments.
pub fn derivative(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    let h = 1e-6 * x.abs().max(1.0);
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Find a root of `f` in `[a, b]` by bisection.
///
/// `f(a)` and `f(b)` must have opposite signs (or one must be zero).
pub fn root(f: impl Fn(f64) -> f64, a: f64, b: f64, tol: f64) -> Result<f64, GeometryError> {
    let (mut lo, mut hi) = (a, b);
    let mut flo = f(lo);
    let fhi = f(hi);
    if flo == 0.0 {
        return Ok(lo);
    }
    if fhi == 0.0 {
        return Ok(hi);
    }
    if !(flo.is_finite() && fhi.is_finite()) || flo.signum() == fhi.signum() {
        return Err(GeometryError::NoRoot { lo: a, hi: b });
    }

    for _ in 0..MAX_BISECTION_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if (hi - lo).abs() / 2.0 <= tol {
            return Ok(mid);
        }
        let fmid = f(mid);
        if fmid == 0.0 {
            return Ok(mid);
        }
        if fmid.signum() == flo.signum() {
            lo = mid;
            flo = fmid;
        } else {
            hi = mid;
        }
    }
    Ok((lo + hi) / 2.0)
}

/// x value of the minimum of `f` in `[a, b]` by golden-section search.
///
/// Assumes `f` is unimodal on the interval. Otherwise the result is some local
/// minimum, not necessarily the global one.
pub fn minimum(f: impl Fn(f64) -> f64, a: f64, b: f64, tol: f64) -> f64 {
    let (mut a, mut b) = if a <= b { (a, b) } else { (b, a) };
    let mut c = b - (b - a) * INV_PHI;
    let mut d = a + (b - a) * INV_PHI;
    let mut fc = f(c);
    let mut fd = f(d);
    for _ in 0..MAX_GOLDEN_ITERATIONS {
        if (b - a).abs() <= tol {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - (b - a) * INV_PHI;
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + (b - a) * INV_PHI;
            fd = f(d);
        }
    }
    (a + b) / 2.0
}

/// x value of the maximum of `f` in `[a, b]`; see [`minimum`]
pub fn maximum(f: impl Fn(f64) -> f64, a: f64, b: f64, tol: f64) -> f64 {
    minimum(|x| -f(x), a, b, tol)
}

/// Relative closeness with an absolute floor, for comparing tick positions
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()) || (a - b).abs() <= 1e-12
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== zrange / linspace tests ====================

    #[test]
    fn zrange_includes_stop() {
        assert_eq!(zrange(-1.0, 1.0, 0.5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(zrange(0.0, 100.0, 20.0), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn zrange_degenerate_step() {
        assert_eq!(zrange(0.0, 1.0, 0.0), vec![0.0]);
        assert_eq!(zrange(2.0, 1.0, 0.5), vec![2.0]);
    }

    #[test]
    fn linspace_endpoints_exact() {
        let v = linspace(0.1, 0.7, 7);
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], 0.1);
        assert_eq!(v[6], 0.7);
        assert_eq!(linspace(3.0, 5.0, 1), vec![5.0]);
    }

    // ==================== Calculus tests ====================

    #[test]
    fn derivative_scales_with_x() {
        assert!((derivative(|x| x * x, 3.0) - 6.0).abs() < 1e-6);
        assert!((derivative(|x| x * x, 1e8) - 2e8).abs() / 2e8 < 1e-6);
    }

    #[test]
    fn root_bisection() {
        let r = root(|x| x * x - 2.0, 0.0, 2.0, 1e-12).unwrap();
        assert!((r - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn root_requires_sign_change() {
        assert_eq!(
            root(|x| x * x + 1.0, -1.0, 1.0, 1e-9),
            Err(GeometryError::NoRoot { lo: -1.0, hi: 1.0 })
        );
    }

    #[test]
    fn golden_section_extrema() {
        let xmin = minimum(|x| (x - 1.5).powi(2), -4.0, 4.0, 1e-9);
        assert!((xmin - 1.5).abs() < 1e-6);
        let xmax = maximum(|x| x.sin(), 0.0, 3.0, 1e-9);
        assert!((xmax - std::f64::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
