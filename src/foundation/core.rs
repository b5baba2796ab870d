use std::fmt;

use crate::foundation::error::{BadgeError, BadgeResult};

pub use kurbo::{Point, Rect};

/// Largest accepted canvas edge in pixels.
pub const MAX_CANVAS_DIM: u32 = 4096;

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Reference badge size.
    pub const STANDARD: Canvas = Canvas {
        width: 600,
        height: 400,
    };

    /// Compact badge size.
    pub const COMPACT: Canvas = Canvas {
        width: 500,
        height: 300,
    };

    /// Create a validated canvas with both edges in `1..=MAX_CANVAS_DIM`.
    pub fn new(width: u32, height: u32) -> BadgeResult<Self> {
        if width == 0 || height == 0 {
            return Err(BadgeError::validation("canvas width/height must be > 0"));
        }
        if width > MAX_CANVAS_DIM || height > MAX_CANVAS_DIM {
            return Err(BadgeError::validation(format!(
                "canvas too large: {width}x{height} (max {MAX_CANVAS_DIM}x{MAX_CANVAS_DIM})"
            )));
        }
        Ok(Self { width, height })
    }

    /// Uniform layout scale relative to [`Canvas::STANDARD`].
    pub fn scale(self) -> f64 {
        let sx = f64::from(self.width) / f64::from(Self::STANDARD.width);
        let sy = f64::from(self.height) / f64::from(Self::STANDARD.height);
        sx.min(sy)
    }

    /// Full-canvas rectangle.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> BadgeResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(BadgeError::validation(format!(
                "hex color must be #RRGGBB, got \"{s}\""
            )));
        }

        let byte = |pair: &str| {
            u8::from_str_radix(pair, 16)
                .map_err(|_| BadgeError::validation(format!("invalid hex byte \"{pair}\"")))
        };
        Ok(Self::new(byte(&s[0..2])?, byte(&s[2..4])?, byte(&s[4..6])?))
    }

    /// Channels as straight RGBA8 with full opacity.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
