//! RGBA color values.

use std::fmt;

/// An 8-bit-per-channel RGBA color.
///
/// Components written by scripts are clamped to `0..=255`, never wrapped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Build from unclamped script integers.
    pub fn from_components(r: i64, g: i64, b: i64, a: i64) -> Self {
        Color::new(clamp(r), clamp(g), clamp(b), clamp(a))
    }

    /// Split a packed `0xRRGGBB` integer; alpha is opaque.
    pub fn from_packed(rgb: i64) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as u8;
        Color::new(channel(16), channel(8), channel(0), 255)
    }

    /// Read a component by member name (`r`, `g`, `b`, `a`).
    pub fn component(self, name: &str) -> Option<u8> {
        match name {
            "r" => Some(self.r),
            "g" => Some(self.g),
            "b" => Some(self.b),
            "a" => Some(self.a),
            _ => None,
        }
    }

    /// Combine all four channels pairwise, clamping the result.
    #[must_use]
    pub fn zip_with(self, other: Color, f: impl Fn(i64, i64) -> i64) -> Color {
        Color::from_components(
            f(i64::from(self.r), i64::from(other.r)),
            f(i64::from(self.g), i64::from(other.g)),
            f(i64::from(self.b), i64::from(other.b)),
            f(i64::from(self.a), i64::from(other.a)),
        )
    }

    /// Scale the color channels, keeping alpha.
    #[must_use]
    pub fn scale(self, f: impl Fn(f64) -> f64) -> Color {
        let apply = |c: u8| clamp_real(f(f64::from(c)));
        Color::new(apply(self.r), apply(self.g), apply(self.b), self.a)
    }

    fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether any channel is zero, which makes it unusable as a divisor.
    pub fn has_zero_channel(self) -> bool {
        self.channels().contains(&0)
    }
}

fn clamp(value: i64) -> u8 {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to 0..=255"
    )]
    let c = value.clamp(0, 255) as u8;
    c
}

fn clamp_real(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to 0.0..=255.0 and NaN handled above"
    )]
    let c = value.clamp(0.0, 255.0) as u8;
    c
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{},{},{},{}|", self.r, self.g, self.b, self.a)
    }
}
