//! Colors and the fixed color cycle.
//!
//! Pins and subdivision depths both pick their stroke from the same 7-color
//! palette: `color_at(i)` is `PALETTE[i % 7]`.

use std::str::FromStr;

use crate::error::ColorError;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const ORANGE: Rgb = Rgb::new(0xFF, 0xA5, 0x00);
    pub const YELLOW: Rgb = Rgb::new(0xFF, 0xFF, 0x00);
    pub const GREEN: Rgb = Rgb::new(0x00, 0x80, 0x00);
    pub const AQUA: Rgb = Rgb::new(0x00, 0xFF, 0xFF);
    pub const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xFF);
    pub const PURPLE: Rgb = Rgb::new(0x80, 0x00, 0x80);
    pub const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse any CSS color string svgtypes understands
    /// (`"orange"`, `"#ffa500"`, `"rgb(255, 165, 0)"`). Alpha is dropped.
    pub fn parse(text: &str) -> Result<Rgb, ColorError> {
        let color = svgtypes::Color::from_str(text.trim())
            .map_err(|e| ColorError(format!("{}: {}", text, e)))?;
        Ok(Rgb::new(color.red, color.green, color.blue))
    }

    /// `#rrggbb` form, as written into SVG attributes.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::parse(s)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The color cycle, in order.
pub const PALETTE: [Rgb; 7] = [
    Rgb::BLACK,
    Rgb::ORANGE,
    Rgb::YELLOW,
    Rgb::GREEN,
    Rgb::AQUA,
    Rgb::BLUE,
    Rgb::PURPLE,
];

/// Palette names, index-aligned with [`PALETTE`].
pub const PALETTE_NAMES: [&str; 7] = [
    "black", "orange", "yellow", "green", "aqua", "blue", "purple",
];

/// Color for a running index (pin count, recursion depth).
#[inline]
pub fn color_at(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_every_seven() {
        for i in 0..21 {
            assert_eq!(color_at(i), color_at(i + 7));
        }
        assert_eq!(color_at(0), Rgb::BLACK);
        assert_eq!(color_at(6), Rgb::PURPLE);
        assert_eq!(color_at(8), Rgb::ORANGE);
    }

    #[test]
    fn palette_colors_are_distinct() {
        for i in 0..PALETTE.len() {
            for j in (i + 1)..PALETTE.len() {
                assert_ne!(PALETTE[i], PALETTE[j], "{} vs {}", PALETTE_NAMES[i], PALETTE_NAMES[j]);
            }
        }
    }

    #[test]
    fn names_parse_to_palette_entries() {
        for (name, color) in PALETTE_NAMES.iter().zip(PALETTE.iter()) {
            assert_eq!(Rgb::parse(name).unwrap(), *color, "{}", name);
        }
    }

    #[test]
    fn hex_round_trip() {
        let c: Rgb = "#1a2B3c".parse().unwrap();
        assert_eq!(c, Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(c.to_hex(), "#1a2b3c");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Rgb::parse("not-a-color").is_err());
    }
}
