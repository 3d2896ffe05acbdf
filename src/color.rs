//! RGB colors for galaxy particles.
//!
//! Colors are given by the user as strings (`"#ff6030"`, `"#f63"`,
//! `"0x1b3984"`, `"orange"`) and resolved into [`Color`] before generation.
//!
//! ```ignore
//! let inside: Color = "#ff6030".parse()?;
//! let outside: Color = "navy".parse()?;
//! let mid = inside.lerp(outside, 0.5);
//! ```

use std::str::FromStr;

use glam::Vec3;

use crate::error::ColorParseError;

/// An RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub fn from_rgb_u32(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::from_rgb_u8(r, g, b)
    }

    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Linear interpolation toward `other`, per channel.
    ///
    /// `t = 0` returns `self`, `t = 1` returns `other`.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Channels quantized back to bytes, used for UI swatches.
    pub fn to_rgb_u8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

impl From<Color> for Vec3 {
    fn from(c: Color) -> Self {
        c.to_vec3()
    }
}

/// Opaque clear color.
impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: 1.0,
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ColorParseError {
            input: s.to_string(),
        };

        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"));

        if let Some(hex) = hex {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(err());
            }
            return match hex.len() {
                6 => u32::from_str_radix(hex, 16)
                    .map(Color::from_rgb_u32)
                    .map_err(|_| err()),
                // #rgb shorthand: each digit is doubled
                3 => {
                    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16);
                    match (digit(0), digit(1), digit(2)) {
                        (Ok(r), Ok(g), Ok(b)) => Ok(Color::from_rgb_u8(r, g, b)),
                        _ => Err(err()),
                    }
                }
                _ => Err(err()),
            };
        }

        let name = trimmed.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, hex)| Color::from_rgb_u32(*hex))
            .ok_or_else(err)
    }
}

/// CSS color keywords accepted in place of a hex code.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aqua", 0x00ffff),
    ("black", 0x000000),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("coral", 0xff7f50),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkorange", 0xff8c00),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dodgerblue", 0x1e90ff),
    ("fuchsia", 0xff00ff),
    ("gold", 0xffd700),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("grey", 0x808080),
    ("hotpink", 0xff69b4),
    ("indigo", 0x4b0082),
    ("lavender", 0xe6e6fa),
    ("lightblue", 0xadd8e6),
    ("lime", 0x00ff00),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("midnightblue", 0x191970),
    ("navy", 0x000080),
    ("olive", 0x808000),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("purple", 0x800080),
    ("red", 0xff0000),
    ("royalblue", 0x4169e1),
    ("salmon", 0xfa8072),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("steelblue", 0x4682b4),
    ("teal", 0x008080),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("white", 0xffffff),
    ("yellow", 0xffff00),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-6 && (a.g - b.g).abs() < 1e-6 && (a.b - b.b).abs() < 1e-6
    }

    #[test]
    fn test_parse_hex_forms() {
        let long: Color = "#ff6030".parse().unwrap();
        assert!(approx(long, Color::from_rgb_u8(0xff, 0x60, 0x30)));

        let short: Color = "#f63".parse().unwrap();
        assert!(approx(short, Color::from_rgb_u8(0xff, 0x66, 0x33)));

        let prefixed: Color = "0x1B3984".parse().unwrap();
        assert!(approx(prefixed, Color::from_rgb_u8(0x1b, 0x39, 0x84)));
    }

    #[test]
    fn test_parse_named() {
        let navy: Color = " Navy ".parse().unwrap();
        assert!(approx(navy, Color::from_rgb_u32(0x000080)));
        assert!(approx("white".parse().unwrap(), Color::WHITE));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#ff60".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("notacolor".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());

        let err = "#12".parse::<Color>().unwrap_err();
        assert_eq!(err.input, "#12");
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::new(1.0, 0.2, 0.0);
        let b = Color::new(0.0, 0.4, 1.0);
        assert!(approx(a.lerp(b, 0.0), a));
        assert!(approx(a.lerp(b, 1.0), b));
        assert!(approx(a.lerp(b, 0.5), Color::new(0.5, 0.3, 0.5)));
    }

    #[test]
    fn test_rgb_u32_round_trips_to_bytes() {
        assert_eq!(Color::from_rgb_u32(0xff6030).to_rgb_u8(), [0xff, 0x60, 0x30]);
        assert_eq!(Color::from_rgb_u32(0x1b3984).to_rgb_u8(), [0x1b, 0x39, 0x84]);
    }
}
