//! Hobby's algorithm: smooth cubic splines through a sequence of points.
//!
//! The turning angle at each interior point is distributed between the two adjacent
//! segments by solving a tridiagonal system for the departure angles. The curl
//! parameter `omega` sets the end conditions (0 is straightest, 1 is most curled).

use glam::DVec2;

use crate::errors::GeometryError;
use crate::types::Point;

/// Default curl at the two open ends
pub const DEFAULT_OMEGA: f64 = 0.5;

/// Signed angle from `v` to `w`
fn angle_between(w: DVec2, v: DVec2) -> f64 {
    (w.y * v.x - w.x * v.y).atan2(v.x * w.x + v.y * w.y)
}

/// Velocity function with Hobby's constant `c = 2/3`
fn rho(alpha: f64, beta: f64) -> f64 {
    const C: f64 = 2.0 / 3.0;
    2.0 / (1.0 + C * beta.cos() + (1.0 - C) * alpha.cos())
}

/// Unit vector along `v` rotated by `theta`
fn rotate_unit(v: DVec2, theta: f64) -> DVec2 {
    DVec2::from_angle(theta).rotate(v).normalize()
}

/// Solve a tridiagonal system `a[i] x[i-1] + b[i] x[i] + c[i] x[i+1] = d[i]`
fn thomas(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> Vec<f64> {
    let n = b.len();
    let mut cp = vec![0.0; n];
    let mut dp = vec![0.0; n];
    cp[0] = c[0] / b[0];
    dp[0] = d[0] / b[0];
    for i in 1..n {
        let denom = b[i] - cp[i - 1] * a[i];
        cp[i] = c[i] / denom;
        dp[i] = (d[i] - dp[i - 1] * a[i]) / denom;
    }
    let mut x = vec![0.0; n];
    x[n - 1] = dp[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = dp[i] - cp[i] * x[i + 1];
    }
    x
}

/// Control points of a cubic spline through `points`.
///
/// Returns `3(n-1) + 1` points: each input point followed by the two control points
/// of the segment leaving it, then the final input point.
pub fn hobby_control_points(points: &[Point], omega: f64) -> Result<Vec<Point>, GeometryError> {
    if points.len() < 2 {
        return Err(GeometryError::TooFewPoints {
            needed: 2,
            got: points.len(),
        });
    }
    let n = points.len() - 1;
    let chords: Vec<DVec2> = points.windows(2).map(|w| w[1] - w[0]).collect();
    let d: Vec<f64> = chords.iter().map(|c| c.length()).collect();

    let mut gamma = vec![0.0; n + 1];
    for i in 1..n {
        gamma[i] = angle_between(chords[i], chords[i - 1]);
    }

    let mut a = vec![0.0; n + 1];
    let mut b = vec![0.0; n + 1];
    let mut c = vec![0.0; n + 1];
    let mut rhs = vec![0.0; n + 1];
    b[0] = 2.0 + omega;
    c[0] = 2.0 * omega + 1.0;
    rhs[0] = -c[0] * gamma[1];
    for i in 1..n {
        a[i] = 1.0 / d[i - 1];
        b[i] = (2.0 * d[i - 1] + 2.0 * d[i]) / (d[i - 1] * d[i]);
        c[i] = 1.0 / d[i];
        rhs[i] = -(2.0 * gamma[i] * d[i] + gamma[i + 1] * d[i - 1]) / (d[i - 1] * d[i]);
    }
    a[n] = 2.0 * omega + 1.0;
    b[n] = 2.0 + omega;

    let alpha = thomas(&a, &b, &c, &rhs);
    let mut beta: Vec<f64> = (1..=n).map(|i| -gamma[i] - alpha[i]).collect();
    beta[n - 1] = -alpha[n];

    let mut ctrl = Vec::with_capacity(3 * n + 1);
    for i in 0..n {
        let lead = rho(alpha[i], beta[i]) * d[i] / 3.0;
        let trail = rho(beta[i], alpha[i]) * d[i] / 3.0;
        ctrl.push(points[i]);
        ctrl.push(points[i] + rotate_unit(chords[i], alpha[i]) * lead);
        ctrl.push(points[i + 1] - rotate_unit(chords[i], -beta[i]) * trail);
    }
    ctrl.push(points[n]);
    Ok(ctrl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::Spline;
    use crate::types::pt;

    #[test]
    fn needs_two_points() {
        assert_eq!(
            hobby_control_points(&[pt(1.0, 1.0)], DEFAULT_OMEGA),
            Err(GeometryError::TooFewPoints { needed: 2, got: 1 })
        );
    }

    #[test]
    fn straight_points_stay_straight() {
        let ctrl = hobby_control_points(&[pt(0.0, 0.0), pt(3.0, 0.0)], DEFAULT_OMEGA).unwrap();
        assert_eq!(ctrl.len(), 4);
        assert!(ctrl.iter().all(|p| p.y.abs() < 1e-12));
        assert!((ctrl[1].x - 1.0).abs() < 1e-12);
        assert!((ctrl[2].x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn spline_passes_through_points() {
        let pts = [pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 0.0), pt(3.0, 1.0)];
        let spline = Spline::hobby(&pts, DEFAULT_OMEGA).unwrap();
        assert_eq!(spline.points().len(), 10);
        for (i, p) in pts.iter().enumerate() {
            assert_eq!(spline.points()[3 * i], *p);
        }
    }

    #[test]
    fn symmetric_arch_has_symmetric_controls() {
        let pts = [pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 0.0)];
        let ctrl = hobby_control_points(&pts, DEFAULT_OMEGA).unwrap();
        // Mirror of the first control point about x = 1 is the last control point
        assert!((ctrl[1].x - (2.0 - ctrl[5].x)).abs() < 1e-9);
        assert!((ctrl[1].y - ctrl[5].y).abs() < 1e-9);
        // The curve leaves the apex horizontally
        assert!((ctrl[3].y - ctrl[4].y).abs() < 1e-9);
    }
}
