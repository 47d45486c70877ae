use palette::{Hsl, IntoColor, Srgb};

use crate::error::{ColorError, Result};

/// Canonicalize a user-supplied hex color to `#rrggbb` (lowercase).
///
/// Surrounding whitespace and a single leading `#` are accepted. Anything
/// other than exactly six ASCII hex digits afterwards is rejected.
pub fn normalize(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidColorFormat(input.to_string()));
    }
    Ok(format!("#{}", digits.to_ascii_lowercase()))
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from wide channel values, clamping each into `0..=255`.
    pub fn from_clamped(r: i32, g: i32, b: i32) -> Self {
        let clamp = |c: i32| c.clamp(0, 255) as u8;
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }

    /// Parse a hex color string like `#ff8800`, `FF8800` or ` #Ff8800 `.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let canonical = normalize(hex)?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&canonical[range], 16)
                .map_err(|_| ColorError::InvalidColorFormat(hex.to_string()))
        };
        Ok(Self {
            r: channel(1..3)?,
            g: channel(3..5)?,
            b: channel(5..7)?,
        })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `rgb(r, g, b)` in the same shape the remote color service reports.
    pub fn to_rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// `hsl(h, s%, l%)` with whole-number components.
    pub fn to_hsl_string(self) -> String {
        let srgb: Srgb<f32> = Srgb::new(self.r, self.g, self.b).into_format();
        let hsl: Hsl = srgb.into_color();
        let hue = hsl.hue.into_positive_degrees().round() as u32 % 360;
        format!(
            "hsl({}, {}%, {}%)",
            hue,
            (hsl.saturation * 100.0).round() as u32,
            (hsl.lightness * 100.0).round() as u32
        )
    }

    /// WCAG 2.0 relative luminance.
    ///
    /// Linearizes each sRGB channel, then computes the weighted sum.
    pub fn relative_luminance(self) -> f32 {
        fn linearize(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG 2.0 contrast ratio between two colors, in [1, 21].
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f32 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn readable_text(self) -> Color {
        let black = Color::new(0, 0, 0);
        let white = Color::new(255, 255, 255);
        if Color::contrast_ratio(&self, &black) >= Color::contrast_ratio(&self, &white) {
            black
        } else {
            white
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
