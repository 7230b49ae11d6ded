use smart_leds::RGB8;

use crate::state::Trend;

pub type Rgb = RGB8;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const AMBER: Rgb = Rgb {
    r: 255,
    g: 140,
    b: 0,
};

/// Color shown on the matrix for a trend.
pub const fn trend_color(trend: Trend) -> Rgb {
    match trend {
        Trend::Rising => RED,
        Trend::Falling => BLUE,
        Trend::Stable => GREEN,
        Trend::Unknown => AMBER,
    }
}

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale every channel of a color.
#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}
