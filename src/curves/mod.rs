//! Curve evaluators: explicit functions, Bezier splines and Hobby curves.

pub mod function;
pub mod hobby;
pub mod spline;

use crate::errors::GeometryError;
use crate::geometry::{Line, intersect};
use crate::types::Point;

pub use function::Function;
pub use hobby::hobby_control_points;
pub use spline::Spline;

/// Anything that gives a single y for each x
pub trait Evaluator {
    fn y(&self, x: f64) -> f64;

    fn tangent_slope(&self, x: f64) -> f64;

    fn xy(&self, x: f64) -> Point {
        Point::new(x, self.y(x))
    }
}

impl Evaluator for Line {
    fn y(&self, x: f64) -> f64 {
        self.y_at(x)
    }

    fn tangent_slope(&self, _x: f64) -> f64 {
        self.slope()
    }
}

/// Where two evaluators cross within `[x1, x2]`
pub fn intersection(
    a: &dyn Evaluator,
    b: &dyn Evaluator,
    x1: f64,
    x2: f64,
) -> Result<Point, GeometryError> {
    intersect::functions(|x| a.y(x), |x| b.y(x), x1, x2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_meets_line() {
        let parabola = Function::new(|x| x * x);
        let line = Line::from_slope_intercept(0.0, 4.0);
        let p = intersection(&parabola, &line, 0.0, 10.0).unwrap();
        assert!((p.x - 2.0).abs() < 1e-3);
        assert!((p.y - 4.0).abs() < 1e-2);
    }

    #[test]
    fn line_evaluator_slope() {
        let l = Line::from_slope_intercept(3.0, 1.0);
        assert_eq!(Evaluator::tangent_slope(&l, 100.0), 3.0);
        assert_eq!(l.xy(2.0), Point::new(2.0, 7.0));
    }
}
