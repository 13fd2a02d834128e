//! Text-size estimates.
//!
//! Without a font rasterizer the width of a string is approximated by summing
//! per-character advance widths (in thousandths of an inch at 12pt) for a generic sans
//! or serif face.

use crate::style::FontFamily;
use crate::types::Size;

const DIGITS: &str = "0123456789";

/// Advance width of `c` in a Times-like face
fn serif_width(c: char) -> u32 {
    match c {
        _ if "lij:.,;t".contains(c) => 47,
        '|' => 37,
        _ if "![]fI/\\".contains(c) => 55,
        _ if "`-(){}r".contains(c) => 60,
        _ if "sJ°".contains(c) => 68,
        _ if "\"zcae?1".contains(c) => 74,
        _ if "*^kvxyμbdhnopqug#$_α".contains(c) || DIGITS.contains(c) => 85,
        _ if "+<>=~FSP".contains(c) => 95,
        _ if "ELZT".contains(c) => 105,
        _ if "BRC".contains(c) => 112,
        _ if "DAwHUKVXYNQGO".contains(c) => 122,
        _ if "&mΩ".contains(c) => 130,
        '%' => 140,
        _ if "MW@∠".contains(c) => 155,
        _ => 60,
    }
}

/// Advance width of `c` in an Arial-like face
fn sans_width(c: char) -> u32 {
    match c {
        _ if "lij|' ".contains(c) => 37,
        _ if "![]fI.,:;/\\t".contains(c) => 50,
        _ if "`-(){}r\"".contains(c) => 60,
        _ if "*^zcsJkvxyμ°".contains(c) => 85,
        _ if "aebdhnopqug#$L+<>=?_~FZTα".contains(c) || DIGITS.contains(c) => 95,
        _ if "BSPEAKVXY&UwNRCHD".contains(c) => 112,
        _ if "QGOMm%@Ω".contains(c) => 140,
        _ if "W∠".contains(c) => 155,
        _ => 75,
    }
}

/// Estimated rendered size of `text` at `font_size`
pub fn estimate_text_size(text: &str, font_size: f64, font: FontFamily) -> Size {
    let width: u32 = match font {
        FontFamily::Serif => text.chars().map(serif_width).sum(),
        FontFamily::SansSerif => text.chars().map(sans_width).sum(),
    };
    Size::new(f64::from(width) * 72.0 / 1000.0 * (font_size / 12.0), font_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_uniform() {
        let a = estimate_text_size("10", 12.0, FontFamily::SansSerif);
        let b = estimate_text_size("88", 12.0, FontFamily::SansSerif);
        assert_eq!(a, b);
        assert!((a.width - 2.0 * 95.0 * 0.072).abs() < 1e-12);
        assert_eq!(a.height, 12.0);
    }

    #[test]
    fn width_scales_with_font_size() {
        let small = estimate_text_size("Title", 12.0, FontFamily::Serif);
        let big = estimate_text_size("Title", 24.0, FontFamily::Serif);
        assert!((big.width - 2.0 * small.width).abs() < 1e-9);
    }

    #[test]
    fn empty_text_has_no_width() {
        assert_eq!(estimate_text_size("", 14.0, FontFamily::SansSerif).width, 0.0);
    }
}
