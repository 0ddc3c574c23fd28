//! Device-independent colors and their CSS rendering.

use serde::Deserialize;

use crate::math::round;
use crate::style::format_number;

/// An RGB color with channels in `[0, 1]`, as the design tool stores paint colors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel.
    pub const fn with_alpha(self, a: f64) -> Rgba {
        Rgba { r: self.r, g: self.g, b: self.b, a }
    }
}

/// An RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Scale to CSS ranges: integer channels in `[0, 255]`, alpha rounded to 2 decimals.
    pub fn to_css(&self) -> CssRgba {
        CssRgba {
            r: scale_channel(self.r),
            g: scale_channel(self.g),
            b: scale_channel(self.b),
            a: round(self.a, 2),
        }
    }

    /// Format as `rgba(r, g, b, a)`.
    pub fn to_css_string(&self) -> String {
        self.to_css().to_string()
    }

    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

fn scale_channel(value: f64) -> u8 {
    round(value * 255.0, 0).clamp(0.0, 255.0) as u8
}

/// A color scaled to CSS ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl std::fmt::Display for CssRgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, format_number(self.a))
    }
}
