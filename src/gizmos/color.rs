//! # Draw Colors
//!
//! RGB colors for gizmo primitives. The drawer keeps one current color and
//! applies it to everything drawn until it is changed, so colors here are
//! plain values: named constants, packed hex, or parsed strings.

use std::str::FromStr;

use thiserror::Error;

/// An RGB draw color with components in `0.0..=1.0`.
///
/// Accepted forms mirror what the drawing API takes:
///
/// ```
/// use etch::gizmos::Color;
///
/// let a = Color::RED;
/// let b = Color::from(0xff0000);
/// let c: Color = "red".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a, c);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
    pub const GRAY: Color = Color::new(0.5, 0.5, 0.5);
    pub const ORANGE: Color = Color::new(1.0, 0.5, 0.0);

    /// Creates a color from components in `0.0..=1.0`.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Returns the color as an `[r, g, b]` array, the layout used by
    /// per-vertex color buffers.
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<[f32; 3]> for Color {
    fn from(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Color> for [f32; 3] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

/// Error returned when a color string is neither a known name nor a
/// `#rrggbb` value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown color: {0:?}")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6 {
                if let Ok(value) = u32::from_str_radix(hex, 16) {
                    return Ok(Self::from_hex(value));
                }
            }
            return Err(ParseColorError(s.to_string()));
        }

        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::BLACK),
            "red" => Ok(Self::RED),
            "green" => Ok(Self::GREEN),
            "blue" => Ok(Self::BLUE),
            "yellow" => Ok(Self::YELLOW),
            "cyan" => Ok(Self::CYAN),
            "magenta" => Ok(Self::MAGENTA),
            "gray" | "grey" => Ok(Self::GRAY),
            "orange" => Ok(Self::ORANGE),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Color::from(0xffffff), Color::WHITE);
        assert_eq!(Color::from(0xff0000), Color::RED);
        assert_eq!(Color::from(0x00ff00), Color::GREEN);
        assert_eq!(Color::from(0x0000ff), Color::BLUE);
    }

    #[test]
    fn test_named_parsing() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("White".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("grey".parse::<Color>().unwrap(), Color::GRAY);
        assert_eq!("#00ffff".parse::<Color>().unwrap(), Color::CYAN);
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert!("mauve-ish".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(Color::default(), Color::WHITE);
    }
}
