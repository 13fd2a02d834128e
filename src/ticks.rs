//! Tick placement for linear, logarithmic and polar axes.
//!
//! [`make_ticks`] picks a "nice" step for a data span. [`make_axis_ticks`] wraps it with
//! the per-axis configuration a diagram carries (manual values, labels, minor divisions,
//! padding) and produces the [`AxisTicks`] the layout and render passes consume.

use crate::format::NumberFormat;
use crate::log::debug;
use crate::numeric::{approx_eq, linspace, zrange};

/// Default upper bound on major ticks per axis
pub const DEFAULT_MAX_TICKS: usize = 9;

/// Major ticks on a polar radius axis
pub const POLAR_RADIUS_TICKS: usize = 6;

/// Fraction of a tick step added beyond the outer ticks
pub const DEFAULT_PAD: f64 = 0.2;

const STEP_INCREMENTS: [f64; 4] = [1.0, 2.0, 2.5, 5.0];

const POLAR_THETA: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

const POLAR_RADIAN_LABELS: [&str; 8] = ["0", "π/4", "π/2", "3π/4", "π", "5π/4", "3π/2", "7π/4"];

/// Ticks of a single axis
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTicks {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
    pub minor: Option<Vec<f64>>,
    /// Data range the axis spans, after tick snapping and padding
    pub range: (f64, f64),
}

/// Tick sets for both axes of a diagram
#[derive(Clone, Debug, PartialEq)]
pub struct Ticks {
    pub x: AxisTicks,
    pub y: AxisTicks,
}

/// User-supplied tick positions
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ManualTicks {
    pub values: Vec<f64>,
    pub names: Option<Vec<String>>,
    pub minor: Option<Vec<f64>>,
}

/// Per-axis tick configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TickConfig {
    pub manual: Option<ManualTicks>,
    /// Minor divisions between consecutive major ticks; 0 disables minor ticks
    pub minor_divisions: usize,
    pub max_ticks: usize,
    pub format: NumberFormat,
    /// Padding in fractions of a tick step, `None` to end the axis at the outer ticks
    pub pad: Option<f64>,
}

impl Default for TickConfig {
    fn default() -> Self {
        TickConfig {
            manual: None,
            minor_divisions: 0,
            max_ticks: DEFAULT_MAX_TICKS,
            format: NumberFormat::default(),
            pad: Some(DEFAULT_PAD),
        }
    }
}

/// Nicely spaced tick positions covering `[vmin, vmax]` with at most `max_ticks` values.
///
/// Steps are tried from `{1, 2, 2.5, 5} x 10^(N-1)` where `N` is the rounded order of
/// magnitude of the span. If none fits, `max_ticks` evenly spaced values are returned.
pub fn make_ticks(vmin: f64, vmax: f64, max_ticks: usize, format: &NumberFormat) -> Vec<f64> {
    let (vmin, vmax) = if vmin <= vmax { (vmin, vmax) } else { (vmax, vmin) };
    let raw_span = vmax - vmin;
    if !raw_span.is_finite() || raw_span == 0.0 {
        return zrange(-1.0, 1.0, 0.5);
    }
    let lo = format.round_trip(vmin);
    let hi = format.round_trip(vmax);

    // Bounds closer than the display precision collapse when rounded
    let span = if hi > lo { hi - lo } else { raw_span };
    let n = span.log10().round() as i32;

    // Snap from whichever of the raw and displayed bounds is further out
    let lo = lo.min(vmin);
    let hi = hi.max(vmax);
    for inc in STEP_INCREMENTS {
        let step = inc * 10f64.powi(n - 1);
        let start = (lo / step).floor() * step;
        let stop = (hi / step).ceil() * step;
        let ticks = zrange(start, stop, step);
        if ticks.len() <= max_ticks {
            debug!(vmin, vmax, step, count = ticks.len(), "selected tick step");
            return ticks;
        }
    }
    debug!(vmin, vmax, max_ticks, "no nice tick step, spacing evenly");
    linspace(vmin, vmax, max_ticks.max(2))
}

/// Ticks for one axis whose data spans `range`
pub fn make_axis_ticks(range: (f64, f64), config: &TickConfig) -> AxisTicks {
    let (mut lo, mut hi) = range;
    let manual = config.manual.as_ref().filter(|m| !m.values.is_empty());

    let positions = match manual {
        Some(m) => {
            lo = m.values.iter().copied().fold(lo, f64::min);
            hi = m.values.iter().copied().fold(hi, f64::max);
            m.values.clone()
        }
        None => {
            let ticks = make_ticks(lo, hi, config.max_ticks, &config.format);
            lo = ticks[0];
            hi = ticks[ticks.len() - 1];
            ticks
        }
    };

    let labels = match manual.and_then(|m| m.names.clone()) {
        Some(names) => names,
        None => positions.iter().map(|&v| config.format.format(v)).collect(),
    };

    let minor = match manual.and_then(|m| m.minor.clone()) {
        Some(minor) => Some(minor),
        None if config.minor_divisions > 0 && positions.len() > 1 => {
            let step = (positions[1] - positions[0]) / config.minor_divisions as f64;
            Some(zrange(positions[0], positions[positions.len() - 1], step))
        }
        None => None,
    };

    let range = match config.pad {
        Some(pad) => {
            let delta = if positions.len() > 1 {
                positions[1] - positions[0]
            } else {
                pad * (hi - lo)
            };
            (lo - delta * pad, hi + delta * pad)
        }
        None => (lo, hi),
    };

    AxisTicks {
        positions,
        labels,
        minor,
        range,
    }
}

/// Decade ticks for an axis whose data has already been mapped through `log10`.
///
/// `ticks` are linear ticks over the log-space range. The result spans whole decades,
/// labels each with its value `10^v`, and places minor ticks at `k * 10^v` within each
/// decade: `2, 4, 6, 8` for 5 divisions, `5` for 2, and `1..9` otherwise. A divisions
/// value of 0 disables minor ticks.
pub fn log_ticks(ticks: &[f64], divisions: usize) -> AxisTicks {
    let (first, last) = match (ticks.first(), ticks.last()) {
        (Some(&f), Some(&l)) => (f.floor() as i32, l.ceil() as i32),
        _ => (0, 1),
    };
    let values: Vec<f64> = (first..=last.max(first)).map(f64::from).collect();
    let g = NumberFormat::default();
    let labels = values.iter().map(|&v| g.format(10f64.powf(v))).collect();

    let minor = (divisions > 0).then(|| {
        let multiples: &[f64] = match divisions {
            5 => &[2.0, 4.0, 6.0, 8.0],
            2 => &[5.0],
            _ => &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        };
        values
            .iter()
            .skip(1)
            .flat_map(|&major| {
                multiples
                    .iter()
                    .map(move |k| (k * 10f64.powf(major) / 10.0).log10())
            })
            .collect()
    });

    let range = (values[0], values[values.len() - 1]);
    AxisTicks {
        positions: values,
        labels,
        minor,
        range,
    }
}

/// Minor ticks that do not coincide with a major tick
pub fn minor_ticks(major: &[f64], minor: &[f64]) -> Vec<f64> {
    minor
        .iter()
        .copied()
        .filter(|&m| !major.iter().any(|&t| approx_eq(m, t)))
        .collect()
}

/// Theta ticks of a polar diagram, every 45 degrees
pub fn polar_theta_ticks(degrees: bool) -> AxisTicks {
    let labels = if degrees {
        POLAR_THETA.iter().map(|t| format!("{t}°")).collect()
    } else {
        POLAR_RADIAN_LABELS.iter().map(|s| s.to_string()).collect()
    };
    AxisTicks {
        positions: POLAR_THETA.to_vec(),
        labels,
        minor: None,
        range: (0.0, 360.0),
    }
}

/// Radius ticks of a polar diagram: always start at zero, no padding
pub fn polar_radius_ticks(rmax: f64, config: &TickConfig) -> AxisTicks {
    let config = TickConfig {
        max_ticks: POLAR_RADIUS_TICKS,
        minor_divisions: 0,
        pad: None,
        ..config.clone()
    };
    let mut ticks = make_axis_ticks((0.0, rmax), &config);
    ticks.range.0 = 0.0;
    ticks
}
