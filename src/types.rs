//! Value types shared by the geometry, layout and render layers.
//!
//! Points are `glam::DVec2`. Rectangles and ranges are plain `Copy` structs with no
//! identity; an affine [`Transform`] is always derived from a pair of [`ViewBox`]es.

use std::fmt;

use glam::DVec2;

/// A point (or vector) in any 2D coordinate space
pub type Point = DVec2;

/// Shorthand constructor for [`Point`]
#[inline]
pub const fn pt(x: f64, y: f64) -> Point {
    DVec2::new(x, y)
}

/// Measured width and height of a piece of text or a box
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Axis-aligned rectangle `(x, y, w, h)`, with `(x, y)` the lower-left corner in a
/// y-up space
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl ViewBox {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        ViewBox { x, y, w, h }
    }

    /// Smallest box covering two corner points
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        ViewBox::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        DVec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn aspect(&self) -> f64 {
        self.w / self.h
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.top()
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {} x {})", self.x, self.y, self.w, self.h)
    }
}

/// Extent of a component's data along each axis.
///
/// A bound is `None` when the component does not constrain that axis (a horizontal
/// guide line has no x extent, a function without a domain has neither).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DataRange {
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
}

impl DataRange {
    /// A range constraining both axes
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        DataRange {
            xmin: Some(xmin),
            xmax: Some(xmax),
            ymin: Some(ymin),
            ymax: Some(ymax),
        }
    }

    /// A range that constrains nothing
    pub const fn unbounded() -> Self {
        DataRange {
            xmin: None,
            xmax: None,
            ymin: None,
            ymax: None,
        }
    }

    pub fn x_only(xmin: f64, xmax: f64) -> Self {
        DataRange {
            xmin: Some(xmin),
            xmax: Some(xmax),
            ..DataRange::unbounded()
        }
    }

    pub fn y_only(ymin: f64, ymax: f64) -> Self {
        DataRange {
            ymin: Some(ymin),
            ymax: Some(ymax),
            ..DataRange::unbounded()
        }
    }

    /// Range covering a set of points, skipping non-finite coordinates
    pub fn of_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut range = DataRange::unbounded();
        for p in points {
            if p.x.is_finite() {
                range.xmin = Some(range.xmin.map_or(p.x, |v| v.min(p.x)));
                range.xmax = Some(range.xmax.map_or(p.x, |v| v.max(p.x)));
            }
            if p.y.is_finite() {
                range.ymin = Some(range.ymin.map_or(p.y, |v| v.min(p.y)));
                range.ymax = Some(range.ymax.map_or(p.y, |v| v.max(p.y)));
            }
        }
        range
    }

    pub fn x(&self) -> Option<(f64, f64)> {
        Some((self.xmin?, self.xmax?))
    }

    pub fn y(&self) -> Option<(f64, f64)> {
        Some((self.ymin?, self.ymax?))
    }
}

/// Fully resolved extent of a diagram's data, all bounds finite
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Extent {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Extent {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    pub fn viewbox(&self) -> ViewBox {
        ViewBox::new(
            self.xmin,
            self.ymin,
            self.xmax - self.xmin,
            self.ymax - self.ymin,
        )
    }
}

/// Affine map between two viewboxes: independent x/y scale and shift
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    xscale: f64,
    yscale: f64,
    xshift: f64,
    yshift: f64,
}

impl Transform {
    /// Map `src` onto `dst`
    pub fn new(src: ViewBox, dst: ViewBox) -> Self {
        let xscale = dst.w / src.w;
        let yscale = dst.h / src.h;
        Transform {
            xscale,
            yscale,
            xshift: dst.x - src.x * xscale,
            yshift: dst.y - src.y * yscale,
        }
    }

    pub const IDENTITY: Transform = Transform {
        xscale: 1.0,
        yscale: 1.0,
        xshift: 0.0,
        yshift: 0.0,
    };

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        DVec2::new(p.x * self.xscale + self.xshift, p.y * self.yscale + self.yshift)
    }

    #[inline]
    pub fn apply_x(&self, x: f64) -> f64 {
        x * self.xscale + self.xshift
    }

    #[inline]
    pub fn apply_y(&self, y: f64) -> f64 {
        y * self.yscale + self.yshift
    }

    /// Map a distance along x (no shift)
    #[inline]
    pub fn scale_x(&self, dx: f64) -> f64 {
        dx * self.xscale
    }

    /// Map a distance along y (no shift)
    #[inline]
    pub fn scale_y(&self, dy: f64) -> f64 {
        dy * self.yscale
    }

    pub fn inverse(&self) -> Transform {
        Transform {
            xscale: 1.0 / self.xscale,
            yscale: 1.0 / self.yscale,
            xshift: -self.xshift / self.xscale,
            yshift: -self.yshift / self.yscale,
        }
    }
}
