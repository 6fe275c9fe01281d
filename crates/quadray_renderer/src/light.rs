//! Scene lights.
//!
//! Lights carry a scalar intensity only; color comes from materials.

use quadray_math::{Ray, Vec3, ZERO};

/// Constant light that reaches every surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub intensity: f32,
}

/// Light emitted from a point, subject to shadowing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
}

/// The closed set of light types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Point(PointLight),
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Light::Ambient(AmbientLight { intensity })
    }

    pub fn point(position: Vec3, intensity: f32) -> Self {
        Light::Point(PointLight {
            position,
            intensity,
        })
    }

    /// Ray from `point` that reaches the light exactly at `t = 1`.
    ///
    /// `None` for lights that cannot be occluded.
    pub fn shadow_ray(&self, point: Vec3) -> Option<Ray> {
        match self {
            Light::Ambient(_) => None,
            Light::Point(light) => Some(Ray::new(point, light.position - point)),
        }
    }

    /// Unoccluded contribution at `point` with surface `normal`.
    pub fn illuminate(&self, normal: Vec3, point: Vec3) -> f32 {
        match self {
            Light::Ambient(light) => light.intensity,
            Light::Point(light) => light.illuminate(normal, point),
        }
    }
}

impl PointLight {
    /// Lambert cosine term scaled by intensity, never negative.
    pub fn illuminate(&self, normal: Vec3, point: Vec3) -> f32 {
        let to_light = self.position - point;
        let lengths = normal.length() * to_light.length();
        if lengths <= ZERO {
            return 0.0;
        }

        (self.intensity * normal.dot(to_light) / lengths).max(0.0)
    }
}
