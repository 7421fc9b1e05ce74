use regex::Regex;
use std::sync::OnceLock;

use crate::geometry::lerp;

fn hex_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("static hex color pattern")
    })
}

/// `#rgb` / `#rrggbb`, leading `#` optional.
pub fn is_valid_hex_color(color: &str) -> bool {
    hex_color_regex().is_match(color)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color; short forms expand each digit (`#f80` → `#ff8800`).
    pub fn from_hex(color: &str) -> Option<Rgb> {
        let caps = hex_color_regex().captures(color)?;
        let digits = caps.get(1)?.as_str();
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        if digits.len() == 3 {
            let mut out = [0u8; 3];
            for (i, ch) in digits.chars().enumerate() {
                let d = ch.to_digit(16)? as u8;
                out[i] = d * 16 + d;
            }
            Some(Rgb::new(out[0], out[1], out[2]))
        } else {
            Some(Rgb::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ))
        }
    }

    /// Channel-wise linear interpolation, rounded to the nearest integer.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| lerp(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_unit_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// Gradient factor driven by the Y rotation phase, in [0, 1].
#[inline]
pub fn gradient_t(rotation_y: f64) -> f64 {
    (rotation_y.sin() + 1.0) / 2.0
}

/// Resolves the displayed color between `start` and `end` for the given Y angle.
/// Unparseable endpoints fall back to white.
pub fn gradient_color(start: &str, end: &str, rotation_y: f64) -> Rgb {
    let a = Rgb::from_hex(start).unwrap_or(Rgb::WHITE);
    let b = Rgb::from_hex(end).unwrap_or(Rgb::WHITE);
    a.lerp(b, gradient_t(rotation_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_pattern_accepts_short_long_and_bare() {
        for ok in ["#fff", "#FFFFFF", "#a1B2c3", "abc", "123456"] {
            assert!(is_valid_hex_color(ok), "{ok} should be valid");
        }
        for bad in ["", "#", "#ff", "#ffff", "#gggggg", "##fff", "#1234567", "red"] {
            assert!(!is_valid_hex_color(bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn short_hex_expands_digits() {
        assert_eq!(Rgb::from_hex("#f80"), Some(Rgb::new(255, 136, 0)));
        assert_eq!(Rgb::from_hex("4ecdc4"), Some(Rgb::new(0x4e, 0xcd, 0xc4)));
    }
}
