//! Vector helpers on top of glam's `Vec3`.

use crate::Vec3;

/// Epsilon guarding near-zero divisions and near-parallel or
/// near-degenerate geometry.
pub const ZERO: f32 = 1e-6;

/// Color type alias (linear RGB, typically 0-1).
pub type Color = Vec3;

/// Extra vector operations used by the tracer.
pub trait Vec3Ext {
    /// True when every component is strictly smaller than [`ZERO`] in magnitude.
    fn near_zero(&self) -> bool;

    /// Mirror `self` about the normal `n`: `v - 2 * dot(n, v) * n`.
    fn reflect(&self, n: Vec3) -> Vec3;

    /// Unit vector in the same direction, `v / |v|`.
    fn unit(&self) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < ZERO && self.y.abs() < ZERO && self.z.abs() < ZERO
    }

    #[inline]
    fn reflect(&self, n: Vec3) -> Vec3 {
        *self - 2.0 * n.dot(*self) * n
    }

    #[inline]
    fn unit(&self) -> Vec3 {
        *self / self.length()
    }
}
