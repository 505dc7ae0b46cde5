//! Procedural textures: pure functions of a surface UV coordinate.

use orb_math::{Color, Vec2};

/// A 2D-coordinate-to-color function.
#[derive(Debug, Clone, PartialEq)]
pub enum Texture {
    /// Same color everywhere.
    Constant(Color),
    /// Alternating cells of two colors; `frequency` cells per unit of UV.
    Checker {
        even: Color,
        odd: Color,
        frequency: f32,
    },
}

impl Texture {
    pub fn constant(color: Color) -> Self {
        Texture::Constant(color)
    }

    pub fn checker(even: Color, odd: Color, frequency: f32) -> Self {
        Texture::Checker {
            even,
            odd,
            frequency,
        }
    }

    /// Sample the texture at a UV coordinate.
    pub fn evaluate(&self, uv: Vec2) -> Color {
        match self {
            Texture::Constant(color) => *color,
            Texture::Checker {
                even,
                odd,
                frequency,
            } => {
                let cell = (uv * *frequency).floor();
                let parity = (cell.x as i64 + cell.y as i64).rem_euclid(2);
                if parity == 0 {
                    *even
                } else {
                    *odd
                }
            }
        }
    }
}

impl From<Color> for Texture {
    fn from(color: Color) -> Self {
        Texture::Constant(color)
    }
}
