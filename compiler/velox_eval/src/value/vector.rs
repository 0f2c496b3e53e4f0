//! Two-component real vectors.

use std::fmt;

use super::format_real;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    pub fn component(self, name: &str) -> Option<f64> {
        match name {
            "x" => Some(self.x),
            "y" => Some(self.y),
            _ => None,
        }
    }

    #[must_use]
    pub fn zip_with(self, other: Vector2, f: impl Fn(f64, f64) -> f64) -> Vector2 {
        Vector2::new(f(self.x, other.x), f(self.y, other.y))
    }

    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Vector2 {
        Vector2::new(f(self.x), f(self.y))
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", format_real(self.x), format_real(self.y))
    }
}
