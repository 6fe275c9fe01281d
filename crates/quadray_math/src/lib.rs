//! quadray math - vectors, rays and 4-wide lanes.

// Re-export glam and wide for convenience
pub use glam::*;
pub use wide::{f32x4, i32x4, CmpGe, CmpGt, CmpLe, CmpLt};

mod interval;
mod lanes;
mod ray;
pub mod random;
mod vector;

pub use interval::{Interval, IntervalX4};
pub use lanes::{lane_bits, mask_lanes, mask_none, negate, RayPacket, Vec3x4, LANES};
pub use ray::Ray;
pub use vector::{Color, Vec3Ext, ZERO};
