use std::ops::{Add, AddAssign, Mul};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32, // Red component (0.0 - 1.0)
    pub g: f32, // Green component (0.0 - 1.0)
    pub b: f32, // Blue component (0.0 - 1.0)
}

impl Color {
    /// Create a new color with RGB components normalized.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value, the way scene colors are written.
    pub const fn from_hex_u32(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self { r, g, b }
    }

    /// Create a color from a hexadecimal string.
    /// Accepts formats like "#RRGGBB" or "RRGGBB".
    pub fn from_hex(hex: &str) -> Result<Self, &'static str> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return Err("Hex string should be 6 characters long (RRGGBB).");
        }
        let packed = u32::from_str_radix(hex, 16).map_err(|_| "Invalid hex color")?;
        Ok(Self::from_hex_u32(packed))
    }

    /// Build a color from 8-bit channels, as decoded from an image.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Pack into minifb's `0x00RRGGBB` layout, clamping out of range channels.
    pub fn to_u32(&self) -> u32 {
        let r = (self.r.clamp(0.0, 1.0) * 255.0) as u32;
        let g = (self.g.clamp(0.0, 1.0) * 255.0) as u32;
        let b = (self.b.clamp(0.0, 1.0) * 255.0) as u32;
        (r << 16) | (g << 8) | b
    }

    pub fn lerp(&self, end: &Color, t: f32) -> Color {
        Color {
            r: self.r + (end.r - self.r) * t,
            g: self.g + (end.g - self.g) * t,
            b: self.b + (end.b - self.b) * t,
        }
    }

    pub fn clamped(&self) -> Color {
        Color::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

/// Component-wise modulation
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

// Predefined colors
impl Color {
    pub const BLACK: Color = Color::from_hex_u32(0x000000);
    pub const WHITE: Color = Color::from_hex_u32(0xFFFFFF);
    pub const TOMATO: Color = Color::from_hex_u32(0xFF6347);
    pub const GRID_CENTER: Color = Color::from_hex_u32(0x444444);
    pub const GRID_LINE: Color = Color::from_hex_u32(0x888888);
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE // Default to white color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_u32_matches_string_form() {
        let a = Color::from_hex_u32(0xff6347);
        let b = Color::from_hex("#FF6347").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_u32(), 0xff6347);
    }

    #[test]
    fn rejects_short_hex() {
        assert!(Color::from_hex("fff").is_err());
    }

    #[test]
    fn to_u32_clamps_overbright() {
        let c = Color::new(2.0, -1.0, 0.5);
        assert_eq!(c.to_u32() >> 16, 0xFF);
        assert_eq!((c.to_u32() >> 8) & 0xFF, 0);
    }

    #[test]
    fn modulation_is_component_wise() {
        let c = Color::new(0.5, 1.0, 0.25) * Color::new(0.5, 0.5, 1.0);
        assert_eq!(c, Color::new(0.25, 0.5, 0.25));
    }
}
