//! Random sampling helpers.
//!
//! Every function draws from an explicit generator. Callers seed one
//! generator per render (or per worker) and thread it through the scatter
//! and jitter calls, so no global state is shared.

use crate::{vector::ZERO, Vec3};
use rand::{Rng, RngCore};

/// Generate a random f32 in [0.0, 1.0).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Generate a random f32 in [min, max).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Vector with each component uniform in [min, max).
pub fn random_vec3(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        gen_range(rng, min, max),
        gen_range(rng, min, max),
        gen_range(rng, min, max),
    )
}

/// Uniform point inside the unit ball.
///
/// Rejection sampling of the [-1, 1] cube; sampling the cube directly
/// would skew directions towards its corners.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3(rng, -1.0, 1.0);
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

/// Uniformly distributed unit vector.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        if len_sq > ZERO * ZERO {
            return p / len_sq.sqrt();
        }
    }
}
