//! Named scene colors.
//!
//! Colors are authored as sRGB hex and handed to the display surface in
//! linear space.

use glam::Vec3;

/// Colors used by the default scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    /// Deep emerald, `#002B19`.
    EmeraldDark,
    /// Emerald, `#006B3E`.
    EmeraldLight,
    /// Metallic gold, `#FFD700`.
    GoldMetallic,
    /// Rose gold, `#E0BFB8`.
    GoldRose,
    /// Red velvet, `#8A0303`.
    RedVelvet,
    /// Warm white for the tiny lights, `#FFF9C4`.
    WarmWhite,
}

impl NamedColor {
    /// sRGB hex value.
    pub fn hex(self) -> u32 {
        match self {
            NamedColor::EmeraldDark => 0x002B19,
            NamedColor::EmeraldLight => 0x006B3E,
            NamedColor::GoldMetallic => 0xFFD700,
            NamedColor::GoldRose => 0xE0BFB8,
            NamedColor::RedVelvet => 0x8A0303,
            NamedColor::WarmWhite => 0xFFF9C4,
        }
    }

    /// Linear RGB.
    pub fn linear(self) -> Vec3 {
        srgb_hex(self.hex())
    }
}

/// Decode a `0xRRGGBB` sRGB value into linear RGB.
pub fn srgb_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xFF) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

/// sRGB transfer function, inverse.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_hex_extremes() {
        assert_eq!(srgb_hex(0x000000), Vec3::ZERO);
        let white = srgb_hex(0xFFFFFF);
        assert!((white - Vec3::ONE).length() < 1e-5);
    }

    #[test]
    fn test_gold_channels() {
        let gold = NamedColor::GoldMetallic.linear();
        assert!((gold.x - 1.0).abs() < 1e-5);
        assert!(gold.y > 0.6 && gold.y < 0.7);
        assert_eq!(gold.z, 0.0);
    }

    #[test]
    fn test_srgb_mid_gray() {
        // sRGB 0.5 is roughly 0.214 linear
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
    }
}
