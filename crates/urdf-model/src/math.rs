//! Value types: vectors, rotations, transforms and colors.
//!
//! These are plain `Copy` records that mirror the URDF text encoding
//! exactly. Quaternion operations follow the Hamilton convention and keep
//! the degenerate cases explicit: normalizing a zero quaternion yields the
//! identity, inverting one yields zero. Conversions to `nalgebra` types are
//! provided for downstream kinematics code.

use std::ops::{Add, Mul};

use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Vector3
// ============================================================================

/// A 3D vector in meters (positions, sizes, axes, scales).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vector3 {
    /// Create a vector from components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[must_use]
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Unit X axis, the default joint axis.
    #[must_use]
    pub const fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Euclidean length.
    #[must_use]
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

// ============================================================================
// Rotation
// ============================================================================

/// Orientation as a quaternion `(x, y, z, w)`.
///
/// Rotations built by [`Rotation::from_rpy`] are unit length. [`Rotation::new`]
/// stores its components verbatim; call [`Rotation::normalize`] to restore
/// the invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rotation {
    /// Vector part, X.
    pub x: f64,
    /// Vector part, Y.
    pub y: f64,
    /// Vector part, Z.
    pub z: f64,
    /// Scalar part.
    pub w: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    /// Create from raw components without normalizing.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The identity rotation `(0, 0, 0, 1)`.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Build from fixed-axis roll (X), pitch (Y), yaw (Z) in radians.
    #[must_use]
    pub fn from_rpy(roll: f64, pitch: f64, yaw: f64) -> Self {
        let (sr, cr) = (roll / 2.0).sin_cos();
        let (sp, cp) = (pitch / 2.0).sin_cos();
        let (sy, cy) = (yaw / 2.0).sin_cos();

        Self::new(
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        )
        .normalized()
    }

    /// Squared norm of the four components.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Norm of the four components.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Scale to unit length. A zero quaternion becomes the identity.
    pub fn normalize(&mut self) {
        let s = self.norm();
        if s == 0.0 {
            *self = Self::identity();
        } else {
            self.x /= s;
            self.y /= s;
            self.z /= s;
            self.w /= s;
        }
    }

    /// Normalized copy.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// `conj(q) / |q|^2`. A zero quaternion is returned unchanged.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let n = self.norm_squared();
        if n > 0.0 {
            Self::new(-self.x / n, -self.y / n, -self.z / n, self.w / n)
        } else {
            *self
        }
    }

    /// Decompose into `(roll, pitch, yaw)` radians.
    ///
    /// Pitch snaps to exactly `±π/2` at gimbal lock.
    #[must_use]
    pub fn rpy(&self) -> (f64, f64, f64) {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        let (sqx, sqy, sqz, sqw) = (x * x, y * y, z * z, w * w);

        let roll = (2.0 * (y * z + w * x)).atan2(sqw - sqx - sqy + sqz);
        let s = -2.0 * (x * z - w * y);
        let pitch = if s <= -1.0 {
            -std::f64::consts::FRAC_PI_2
        } else if s >= 1.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            s.asin()
        };
        let yaw = (2.0 * (x * y + w * z)).atan2(sqw + sqx - sqy - sqz);

        (roll, pitch, yaw)
    }

    /// Convert to a `nalgebra` unit quaternion (renormalizing).
    #[must_use]
    pub fn to_unit_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_quaternion(Quaternion::new(self.w, self.x, self.y, self.z))
    }
}

impl Mul for Rotation {
    type Output = Self;

    /// Hamilton product. `a * b` applies `b` first.
    fn mul(self, o: Self) -> Self {
        Self::new(
            self.w * o.x + self.x * o.w + self.y * o.z - self.z * o.y,
            self.w * o.y - self.x * o.z + self.y * o.w + self.z * o.x,
            self.w * o.z + self.x * o.y - self.y * o.x + self.z * o.w,
            self.w * o.w - self.x * o.x - self.y * o.y - self.z * o.z,
        )
    }
}

impl Mul<Vector3> for Rotation {
    type Output = Vector3;

    /// Rotate a vector: `q * v * q⁻¹`.
    fn mul(self, v: Vector3) -> Vector3 {
        let p = Self::new(v.x, v.y, v.z, 0.0);
        let r = self * (p * self.inverse());
        Vector3::new(r.x, r.y, r.z)
    }
}

impl From<UnitQuaternion<f64>> for Rotation {
    fn from(q: UnitQuaternion<f64>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

// ============================================================================
// Transform
// ============================================================================

/// A pose: position plus orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Translation in meters.
    pub position: Vector3,
    /// Orientation.
    pub rotation: Rotation,
}

impl Transform {
    /// Create from position and rotation.
    #[must_use]
    pub const fn new(position: Vector3, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// The identity transform.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(Vector3::zeros(), Rotation::identity())
    }

    /// Convert to a `nalgebra` isometry.
    #[must_use]
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::new(self.position.x, self.position.y, self.position.z),
            self.rotation.to_unit_quaternion(),
        )
    }
}

// ============================================================================
// Color
// ============================================================================

/// RGBA color. Components are stored as given, not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Color {
    /// Create from components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}
