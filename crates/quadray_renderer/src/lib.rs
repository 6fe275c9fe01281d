//! quadray - scalar and packet CPU path tracing.
//!
//! Every primitive answers intersection queries twice: once per ray and
//! once for a packet of four rays traced in SIMD lanes. The packet form
//! returns, lane for lane, exactly what four scalar calls would.
//!
//! Scene data is immutable while rendering. Randomness and trace counters
//! are threaded through explicitly.

mod camera;
mod canvas;
mod hittable;
mod light;
pub mod loader;
mod material;
mod mesh;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod stats;
mod triangle;

#[cfg(test)]
mod test_util;

pub use camera::Camera;
pub use canvas::{color_to_rgba, linear_to_gamma, Canvas};
pub use hittable::{HitRecord, Hittable, Primitive};
pub use light::{AmbientLight, Light, PointLight};
pub use loader::{default_scene, load_scene, parse_scene, LoadError, SceneDescription};
pub use material::{Lambertian, Material, Metal, ScatterResult, VertexColor};
pub use mesh::Mesh;
pub use plane::Plane;
pub use renderer::{
    ray_color, ray_color_packet, render, render_pixel, sky_gradient, RenderConfig,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use stats::TraceStats;
pub use triangle::Triangle;

/// Re-export the math types used in the public API
pub use quadray_math::{Color, Interval, Ray, Vec3};
