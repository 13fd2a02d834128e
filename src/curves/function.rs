//! Explicit functions `y = f(x)`.

use std::fmt;
use std::rc::Rc;

use crate::errors::GeometryError;
use crate::geometry::Line;
use crate::geometry::line::normal_slope;
use crate::numeric::{derivative, linspace, maximum, minimum, root};
use crate::types::{DataRange, Point, pt};

use super::Evaluator;

/// Default number of samples used to draw a function
pub const DEFAULT_SAMPLES: usize = 200;

const EXTREMUM_TOL: f64 = 1e-9;

/// A function of x with an optional plotting domain
#[derive(Clone)]
pub struct Function {
    func: Rc<dyn Fn(f64) -> f64>,
    domain: Option<(f64, f64)>,
    samples: usize,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("domain", &self.domain)
            .field("samples", &self.samples)
            .finish_non_exhaustive()
    }
}

impl Function {
    pub fn new(func: impl Fn(f64) -> f64 + 'static) -> Self {
        Function {
            func: Rc::new(func),
            domain: None,
            samples: DEFAULT_SAMPLES,
        }
    }

    /// Restrict plotting to `[xmin, xmax]`
    pub fn domain(mut self, xmin: f64, xmax: f64) -> Self {
        self.domain = Some((xmin.min(xmax), xmin.max(xmax)));
        self
    }

    /// Number of points used to draw the function
    pub fn samples(mut self, n: usize) -> Self {
        self.samples = n.max(2);
        self
    }

    pub fn get_domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    pub fn sample_count(&self) -> usize {
        self.samples
    }

    pub fn y(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    /// Evenly spaced points over `domain`, or the configured domain when `None`
    pub fn sample(&self, domain: Option<(f64, f64)>) -> Vec<Point> {
        match domain.or(self.domain) {
            Some((x1, x2)) => linspace(x1, x2, self.samples)
                .into_iter()
                .map(|x| pt(x, self.y(x)))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn tangent_slope(&self, x: f64) -> f64 {
        derivative(|x| self.y(x), x)
    }

    fn anchor(&self, x: f64) -> Point {
        let y = self.y(x);
        pt(x, if y.is_finite() { y } else { 0.0 })
    }

    /// Tangent line at `x`
    pub fn tangent(&self, x: f64) -> Line {
        Line::from_point_slope(self.anchor(x), self.tangent_slope(x))
    }

    /// Normal line at `x`
    pub fn normal(&self, x: f64) -> Line {
        Line::from_point_slope(self.anchor(x), normal_slope(self.tangent_slope(x)))
    }

    /// Maximum on `[x1, x2]`; the function must be unimodal there
    pub fn local_max(&self, x1: f64, x2: f64) -> Point {
        let x = maximum(|x| self.y(x), x1, x2, EXTREMUM_TOL);
        pt(x, self.y(x))
    }

    /// Minimum on `[x1, x2]`; the function must be unimodal there
    pub fn local_min(&self, x1: f64, x2: f64) -> Point {
        let x = minimum(|x| self.y(x), x1, x2, EXTREMUM_TOL);
        pt(x, self.y(x))
    }

    /// x in `[x1, x2]` where the function equals `y`
    pub fn x_at(&self, y: f64, x1: f64, x2: f64) -> Result<f64, GeometryError> {
        let tol = (x2 - x1).abs() * 1e-10;
        root(|x| self.y(x) - y, x1, x2, tol)
    }

    /// Extent over the configured domain; unbounded without one
    pub fn datarange(&self) -> DataRange {
        match self.domain {
            Some((x1, x2)) => {
                let ys = DataRange::of_points(self.sample(None));
                DataRange {
                    xmin: Some(x1),
                    xmax: Some(x2),
                    ..ys
                }
            }
            None => DataRange::unbounded(),
        }
    }
}

impl Evaluator for Function {
    fn y(&self, x: f64) -> f64 {
        Function::y(self, x)
    }

    fn tangent_slope(&self, x: f64) -> f64 {
        Function::tangent_slope(self, x)
    }
}
