//! 4-wide lane types for packet tracing.
//!
//! Structure-of-Arrays layout, one ray per lane:
//! - x: [x0, x1, x2, x3]
//! - y: [y0, y1, y2, y3]
//! - z: [z0, z1, z2, z3]
//!
//! Each operation mirrors the evaluation order of the matching scalar glam
//! operation, so lane `i` of a result is bit-for-bit what the scalar code
//! computes for input `i`. Comparison results are masks: all bits set for a
//! true lane, all bits clear for a false one.

use crate::{Ray, Vec3};
use std::ops::{Add, Sub};
use wide::{f32x4, i32x4};

/// Number of lanes in a packet.
pub const LANES: usize = 4;

/// 4 3D vectors packed for SIMD processing.
#[derive(Clone, Copy, Debug)]
pub struct Vec3x4 {
    pub x: f32x4,
    pub y: f32x4,
    pub z: f32x4,
}

impl Vec3x4 {
    /// Create from 4 separate Vec3 values.
    #[inline]
    pub fn from_vecs(v: [Vec3; LANES]) -> Self {
        Self {
            x: f32x4::new([v[0].x, v[1].x, v[2].x, v[3].x]),
            y: f32x4::new([v[0].y, v[1].y, v[2].y, v[3].y]),
            z: f32x4::new([v[0].z, v[1].z, v[2].z, v[3].z]),
        }
    }

    /// All lanes set to the same vector.
    #[inline]
    pub fn splat(v: Vec3) -> Self {
        Self {
            x: f32x4::splat(v.x),
            y: f32x4::splat(v.y),
            z: f32x4::splat(v.z),
        }
    }

    /// Per-lane `dot`, same association as `Vec3::dot`.
    #[inline]
    pub fn dot(self, rhs: Self) -> f32x4 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Per-lane squared length.
    #[inline]
    pub fn length_squared(self) -> f32x4 {
        self.dot(self)
    }

    /// Per-lane `cross`, same operand order as `Vec3::cross`.
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - rhs.y * self.z,
            y: self.z * rhs.x - rhs.z * self.x,
            z: self.x * rhs.y - rhs.x * self.y,
        }
    }

    /// Scale each lane by its own factor.
    #[inline]
    pub fn scale(self, s: f32x4) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Extract one lane as a scalar vector.
    #[inline]
    pub fn lane(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.x.as_array_ref()[i],
            self.y.as_array_ref()[i],
            self.z.as_array_ref()[i],
        )
    }
}

impl Add for Vec3x4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Vec3x4 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Four independent rays, kept both as scalars and in lane layout.
#[derive(Clone, Copy, Debug)]
pub struct RayPacket {
    rays: [Ray; LANES],
    pub origin: Vec3x4,
    pub direction: Vec3x4,
}

impl RayPacket {
    pub fn new(rays: [Ray; LANES]) -> Self {
        Self {
            origin: Vec3x4::from_vecs(rays.map(|r| r.origin())),
            direction: Vec3x4::from_vecs(rays.map(|r| r.direction())),
            rays,
        }
    }

    #[inline]
    pub fn ray(&self, i: usize) -> &Ray {
        &self.rays[i]
    }

    #[inline]
    pub fn rays(&self) -> &[Ray; LANES] {
        &self.rays
    }

    /// Per-lane `Ray::at`.
    #[inline]
    pub fn at(&self, t: f32x4) -> Vec3x4 {
        self.origin + self.direction.scale(t)
    }
}

/// Flip the sign bit of every lane, the exact lane form of scalar `-x`.
#[inline]
pub fn negate(v: f32x4) -> f32x4 {
    v ^ f32x4::splat(-0.0)
}

/// True when no lane of the mask is set.
#[inline]
pub fn mask_none(mask: f32x4) -> bool {
    mask.none()
}

/// Per-lane booleans of a comparison mask.
#[inline]
pub fn mask_lanes(mask: f32x4) -> [bool; LANES] {
    let bits = mask.move_mask();
    std::array::from_fn(|i| bits & (1 << i) != 0)
}

/// Reinterpret a comparison mask as integer lanes (-1 for true, 0 for false).
#[inline]
pub fn lane_bits(mask: f32x4) -> i32x4 {
    bytemuck::cast(mask)
}
