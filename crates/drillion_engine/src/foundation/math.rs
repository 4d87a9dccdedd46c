//! Math utilities and types
//!
//! Provides the 2D math types used by the collision engine and the game
//! code built on top of it.

pub use nalgebra::{Matrix3, Vector2};
use serde::{Deserialize, Serialize};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 matrix type (homogeneous 2D transforms)
pub type Mat3 = Matrix3<f32>;

/// 2D affine transform stored as six coefficients.
///
/// A point `(x, y)` maps to `(a*x + b*y + c, d*x + e*y + f)`; `[a b; d e]` is
/// the linear part and `(c, f)` the translation.
///
/// Composition is associative but not commutative. [`multiply`](Self::multiply)
/// and [`right_multiply`](Self::right_multiply) put the new transform on
/// opposite sides and are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2 {
    /// Row 0, column 0
    pub a: f32,
    /// Row 0, column 1
    pub b: f32,
    /// X translation
    pub c: f32,
    /// Row 1, column 0
    pub d: f32,
    /// Row 1, column 1
    pub e: f32,
    /// Y translation
    pub f: f32,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2 {
    /// Create a transform from its six coefficients
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Identity transform
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    /// Pure translation
    pub const fn from_translation(x: f32, y: f32) -> Self {
        Self::new(1.0, 0.0, x, 0.0, 1.0, y)
    }

    /// Rotation by `angle` (CCW radians) followed by translation to `position`
    pub fn from_position_angle(position: Vec2, angle: f32) -> Self {
        let mut transform = Self::identity();
        transform.rotate(angle);
        transform.translate(position.x, position.y);
        transform
    }

    /// `self := self ∘ other`: `other` becomes the inner transform and is
    /// applied to points before `self`.
    pub fn multiply(&mut self, other: &Self) {
        *self = Self::new(
            self.a * other.a + self.b * other.d,
            self.a * other.b + self.b * other.e,
            self.a * other.c + self.b * other.f + self.c,
            self.d * other.a + self.e * other.d,
            self.d * other.b + self.e * other.e,
            self.d * other.c + self.e * other.f + self.f,
        );
    }

    /// `self := other ∘ self`: `other` is applied to points after `self`.
    pub fn right_multiply(&mut self, other: &Self) {
        *self = Self::new(
            other.a * self.a + other.b * self.d,
            other.a * self.b + other.b * self.e,
            other.a * self.c + other.b * self.f + other.c,
            other.d * self.a + other.e * self.d,
            other.d * self.b + other.e * self.e,
            other.d * self.c + other.e * self.f + other.f,
        );
    }

    /// Add a world-space offset to the translation
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.c += dx;
        self.f += dy;
    }

    /// Rotate counter-clockwise by `angle` radians (applied before the current transform)
    pub fn rotate(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        self.multiply(&Self::new(cos, -sin, 0.0, sin, cos, 0.0));
    }

    /// Scale the local axes (applied before the current transform)
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.multiply(&Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0));
    }

    /// Transform a point (linear part plus translation)
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.a * point.x + self.b * point.y + self.c,
            self.d * point.x + self.e * point.y + self.f,
        )
    }

    /// Transform a direction; translation is ignored
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        Vec2::new(
            self.a * vector.x + self.b * vector.y,
            self.d * vector.x + self.e * vector.y,
        )
    }

    /// Determinant of the linear part. Negative means the transform mirrors,
    /// which flips polygon winding.
    pub fn determinant(&self) -> f32 {
        self.a * self.e - self.b * self.d
    }

    /// Translation component
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.c, self.f)
    }

    /// Component-wise linear interpolation between two transforms.
    ///
    /// Only meant for render smoothing between simulation steps; the result is
    /// not guaranteed to be a rigid transform.
    pub fn mix(source: &Self, target: &Self, t: f32) -> Self {
        Self::new(
            utils::mix(source.a, target.a, t),
            utils::mix(source.b, target.b, t),
            utils::mix(source.c, target.c, t),
            utils::mix(source.d, target.d, t),
            utils::mix(source.e, target.e, t),
            utils::mix(source.f, target.f, t),
        )
    }

    /// Convert to a homogeneous 3x3 matrix
    pub fn to_matrix(&self) -> Mat3 {
        Mat3::new(
            self.a, self.b, self.c,
            self.d, self.e, self.f,
            0.0, 0.0, 1.0,
        )
    }

    /// Build from a homogeneous 3x3 matrix; the projective row is ignored
    pub fn from_matrix(matrix: &Mat3) -> Self {
        Self::new(
            matrix[(0, 0)],
            matrix[(0, 1)],
            matrix[(0, 2)],
            matrix[(1, 0)],
            matrix[(1, 1)],
            matrix[(1, 2)],
        )
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2};

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Linear interpolation
    pub fn mix(a: f32, b: f32, t: f32) -> f32 {
        a + t * (b - a)
    }

    /// Vertices of a regular polygon approximating a circle, wound counter-clockwise
    pub fn generate_circle_vertices(count: usize, center: Vec2, radius: f32, angle: f32) -> Vec<Vec2> {
        (0..count)
            .map(|i| {
                let a = angle + i as f32 / count as f32 * constants::TAU;
                center + Vec2::new(a.cos(), a.sin()) * radius
            })
            .collect()
    }

    /// 2D cross product (z component of the 3D cross product)
    pub fn cross(u: Vec2, v: Vec2) -> f32 {
        u.x * v.y - v.x * u.y
    }
}
