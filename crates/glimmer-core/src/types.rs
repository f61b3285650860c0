//! Spatial, color, and matrix types

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::error::{GlimmerError, Result};

/// A 4x4 matrix stored column-major: `m[col][row]`
pub type Mat4 = [[f32; 4]; 4];

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// +Z, the direction a default camera looks
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            *self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Linear RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#rrggbb` or `rrggbb`. Anything else is rejected.
    pub fn parse_hex(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GlimmerError::InvalidColor(format!(
                "'{s}' is not a #rrggbb hex color"
            )));
        }
        let hex = u32::from_str_radix(digits, 16)
            .map_err(|e| GlimmerError::InvalidColor(format!("'{s}': {e}")))?;
        Ok(Self::from_hex(hex))
    }

    /// Scale the RGB channels, leaving alpha untouched
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    pub fn with_alpha(&self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    pub fn rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Every channel is finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.to_array().iter().all(|c| c.is_finite() && *c >= 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Multiply two 4x4 column-major matrices (`a * b`)
pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for (col, out_col) in result.iter_mut().enumerate() {
        for (row, out) in out_col.iter_mut().enumerate() {
            *out = (0..4).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    result
}

/// Invert a 4x4 column-major matrix by Gauss-Jordan elimination.
///
/// Returns `None` for singular matrices.
pub fn mat4_inverse(m: &Mat4) -> Option<Mat4> {
    // Work row-major on an augmented [m | I] matrix
    let mut aug = [[0.0f32; 8]; 4];
    for row in 0..4 {
        for col in 0..4 {
            aug[row][col] = m[col][row];
        }
        aug[row][4 + row] = 1.0;
    }

    for pivot in 0..4 {
        let best = (pivot..4)
            .max_by(|&a, &b| aug[a][pivot].abs().total_cmp(&aug[b][pivot].abs()))
            .unwrap_or(pivot);
        if aug[best][pivot].abs() < 1e-10 {
            return None;
        }
        aug.swap(pivot, best);

        let inv_p = 1.0 / aug[pivot][pivot];
        for v in aug[pivot].iter_mut() {
            *v *= inv_p;
        }
        for row in 0..4 {
            if row == pivot {
                continue;
            }
            let factor = aug[row][pivot];
            if factor != 0.0 {
                for col in 0..8 {
                    aug[row][col] -= factor * aug[pivot][col];
                }
            }
        }
    }

    let mut inv = [[0.0; 4]; 4];
    for row in 0..4 {
        for col in 0..4 {
            inv[col][row] = aug[row][4 + col];
        }
    }
    Some(inv)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: Mat4 = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    #[test]
    fn test_vec3_operations() {
        let v1 = Vec3::new(1.0, 2.0, 3.0);
        let v2 = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(v1 + v2, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(v2 - v1, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(v1 * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-v1, Vec3::new(-1.0, -2.0, -3.0));
        assert!((Vec3::ZERO.distance(&Vec3::new(3.0, 4.0, 0.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0xFF8844);
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.533).abs() < 0.01);
        assert!((c.b - 0.267).abs() < 0.01);
    }

    #[test]
    fn test_color_parse_hex() {
        let c = Color::parse_hex("#ffcc00").unwrap();
        assert!((c.g - 0.8).abs() < 0.01);
        assert!(Color::parse_hex("ffcc00").is_ok());
        assert!(Color::parse_hex("#ffcc0").is_err());
        assert!(Color::parse_hex("#gggggg").is_err());
        assert!(Color::parse_hex("").is_err());
    }

    #[test]
    fn test_scaled_keeps_alpha() {
        let c = Color::new(1.0, 0.5, 0.25, 0.8).scaled(0.5);
        assert_eq!(c, Color::new(0.5, 0.25, 0.125, 0.8));
    }

    #[test]
    fn test_mat4_mul_identity() {
        let m: Mat4 = [
            [1.0, 2.0, 3.0, 0.0],
            [4.0, 5.0, 6.0, 0.0],
            [7.0, 8.0, 10.0, 0.0],
            [1.0, 2.0, 3.0, 1.0],
        ];
        assert_eq!(mat4_mul(&m, &IDENTITY), m);
        assert_eq!(mat4_mul(&IDENTITY, &m), m);
    }

    #[test]
    fn test_mat4_inverse_round_trip() {
        let m: Mat4 = [
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 3.0, 0.0],
            [0.0, -1.0, 0.0, 0.0],
            [5.0, -2.0, 7.0, 1.0],
        ];
        let inv = mat4_inverse(&m).unwrap();
        let product = mat4_mul(&m, &inv);
        for col in 0..4 {
            for row in 0..4 {
                assert!((product[col][row] - IDENTITY[col][row]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_mat4_inverse_singular() {
        let zero = [[0.0; 4]; 4];
        assert!(mat4_inverse(&zero).is_none());
    }
}
