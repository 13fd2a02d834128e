//! Contour extraction by marching squares.
//!
//! Each grid cell is classified by which of its four corners lie below the level. The
//! sixteen cases reduce to seven edge pairs (each case and its complement cross the same
//! edges). The two saddle cases are ambiguous and emit nothing.

use crate::errors::ConfigError;
use crate::log::debug;
use crate::numeric::zrange;
use crate::types::{Point, pt};

/// Which contour levels to extract
#[derive(Clone, Debug, PartialEq)]
pub enum Levels {
    /// `n` evenly spaced levels between the data's minimum and maximum
    Count(usize),
    /// Explicit level values
    Values(Vec<f64>),
}

impl Default for Levels {
    fn default() -> Self {
        Levels::Count(7)
    }
}

impl Levels {
    /// Concrete level values for data spanning `[zmin, zmax]`
    pub fn resolve(&self, zmin: f64, zmax: f64) -> Vec<f64> {
        match self {
            Levels::Count(n) => {
                let step = (zmax - zmin) / (*n as f64 + 1.0);
                zrange(zmin, zmax, step)
            }
            Levels::Values(v) => v.clone(),
        }
    }
}

/// Segments of one contour level
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSegments {
    pub level: f64,
    pub segments: Vec<(Point, Point)>,
}

/// Validated rectangular grid of samples, `z` stored row-major (`z[row][col]` is the
/// value at `(x[col], y[row])`)
struct Grid<'a> {
    x: &'a [f64],
    y: &'a [f64],
    z: Vec<f64>,
}

impl<'a> Grid<'a> {
    fn new(x: &'a [f64], y: &'a [f64], z: &[Vec<f64>]) -> Result<Self, ConfigError> {
        if z.len() != y.len() {
            return Err(ConfigError::MismatchedLengths {
                what: "contour rows vs y values",
                left: z.len(),
                right: y.len(),
            });
        }
        if let Some(row) = z.iter().find(|row| row.len() != x.len()) {
            return Err(ConfigError::MismatchedLengths {
                what: "contour row vs x values",
                left: row.len(),
                right: x.len(),
            });
        }
        if x.len() < 2 || y.len() < 2 {
            return Err(ConfigError::EmptyData {
                what: "contour (at least 2x2 samples)",
            });
        }
        Ok(Grid {
            x,
            y,
            z: z.iter().flatten().copied().collect(),
        })
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.z[row * self.x.len() + col]
    }

    fn level_segments(&self, level: f64) -> Vec<(Point, Point)> {
        let mut segments = Vec::new();
        for row in 0..self.y.len() - 1 {
            let (y0, h) = (self.y[row], self.y[row + 1] - self.y[row]);
            for col in 0..self.x.len() - 1 {
                let (x0, w) = (self.x[col], self.x[col + 1] - self.x[col]);
                let ll = self.at(row, col);
                let lr = self.at(row, col + 1);
                let ul = self.at(row + 1, col);
                let ur = self.at(row + 1, col + 1);

                let below = |v: f64| usize::from(v < level);
                let case = below(ll) + 2 * below(lr) + 4 * below(ur) + 8 * below(ul);

                let left = || pt(x0, y0 + h * (level - ll) / (ul - ll));
                let right = || pt(x0 + w, y0 + h * (level - lr) / (ur - lr));
                let bottom = || pt(x0 + w * (level - ll) / (lr - ll), y0);
                let top = || pt(x0 + w * (level - ul) / (ur - ul), y0 + h);

                let seg = match case {
                    1 | 14 => (left(), bottom()),
                    2 | 13 => (right(), bottom()),
                    3 | 12 => (left(), right()),
                    4 | 11 => (top(), right()),
                    6 | 9 => (top(), bottom()),
                    7 | 8 => (left(), top()),
                    // 0 and 15 have no crossing; saddles 5 and 10 are ambiguous
                    _ => continue,
                };
                segments.push(seg);
            }
        }
        segments
    }
}

/// Extract contour segments from `z` sampled on the grid `x` by `y`
pub fn marching_squares(
    x: &[f64],
    y: &[f64],
    z: &[Vec<f64>],
    levels: &Levels,
) -> Result<Vec<LevelSegments>, ConfigError> {
    let grid = Grid::new(x, y, z)?;
    let (zmin, zmax) = z_extent(z).unwrap_or((0.0, 0.0));
    let values = levels.resolve(zmin, zmax);
    debug!(levels = values.len(), zmin, zmax, "extracting contours");

    Ok(values
        .into_iter()
        .map(|level| LevelSegments {
            level,
            segments: grid.level_segments(level),
        })
        .collect())
}

/// Minimum and maximum of the finite values in `z`
pub fn z_extent(z: &[Vec<f64>]) -> Option<(f64, f64)> {
    let (lo, hi) = z
        .iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    (lo <= hi).then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump() -> (Vec<f64>, Vec<f64>, Vec<Vec<f64>>) {
        (
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0],
            vec![
                vec![0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0],
            ],
        )
    }

    #[test]
    fn single_peak_forms_diamond() {
        let (x, y, z) = bump();
        let out = marching_squares(&x, &y, &z, &Levels::Values(vec![0.5])).unwrap();
        assert_eq!(out.len(), 1);
        let segs = &out[0].segments;
        assert_eq!(segs.len(), 4);
        // Every endpoint sits halfway along an edge touching the center
        for (a, b) in segs {
            for p in [a, b] {
                let d = (p.x - 1.0).abs() + (p.y - 1.0).abs();
                assert!((d - 0.5).abs() < 1e-12, "{p:?}");
            }
        }
    }

    #[test]
    fn levels_outside_data_are_empty() {
        let (x, y, z) = bump();
        let out = marching_squares(&x, &y, &z, &Levels::Values(vec![-1.0, 2.0])).unwrap();
        assert!(out.iter().all(|l| l.segments.is_empty()));
    }

    #[test]
    fn count_levels_are_increasing() {
        let levels = Levels::Count(3).resolve(0.0, 8.0);
        assert_eq!(levels, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn saddle_is_skipped() {
        let x = vec![0.0, 1.0];
        let y = vec![0.0, 1.0];
        let z = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let out = marching_squares(&x, &y, &z, &Levels::Values(vec![0.5])).unwrap();
        assert!(out[0].segments.is_empty());
    }

    #[test]
    fn straight_crossing() {
        let x = vec![0.0, 2.0];
        let y = vec![0.0, 1.0];
        let z = vec![vec![0.0, 4.0], vec![0.0, 4.0]];
        let out = marching_squares(&x, &y, &z, &Levels::Values(vec![1.0])).unwrap();
        assert_eq!(out[0].segments, vec![(pt(0.5, 1.0), pt(0.5, 0.0))]);
    }

    #[test]
    fn shape_is_validated() {
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 1.0];
        let z = vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0]];
        assert!(matches!(
            marching_squares(&x, &y, &z, &Levels::default()),
            Err(ConfigError::MismatchedLengths { .. })
        ));
        let z = vec![vec![0.0, 1.0, 2.0]];
        assert!(matches!(
            marching_squares(&x, &y, &z, &Levels::default()),
            Err(ConfigError::MismatchedLengths { .. })
        ));
        assert_eq!(z_extent(&[vec![3.0, f64::NAN, -1.0]]), Some((-1.0, 3.0)));
    }
}
