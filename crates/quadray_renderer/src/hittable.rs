//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Mesh, Plane, Sphere, Triangle};
use quadray_math::{Interval, Ray, RayPacket, Vec3, LANES};

/// Absorbing placeholder referenced by records that hold no hit.
static NO_MATERIAL: Material = Material::absorbing();

/// Record of a ray-object intersection.
///
/// A record is a transient value: every successful hit overwrites all of it.
/// `t == f32::INFINITY` marks a record that holds no hit.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Barycentric weight of the second triangle vertex
    pub u: f32,
    /// Barycentric weight of the third triangle vertex
    pub v: f32,
    /// Barycentric weight of the first triangle vertex (`1 - u - v`)
    pub w: f32,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl Default for HitRecord<'_> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &NO_MATERIAL,
            u: 0.0,
            v: 0.0,
            w: 1.0,
            t: f32::INFINITY,
            front_face: false,
        }
    }
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("p", &self.p)
            .field("normal", &self.normal)
            .field("t", &self.t)
            .field("front_face", &self.front_face)
            .field("uvw", &(self.u, self.v, self.w))
            .finish()
    }
}

impl<'a> HitRecord<'a> {
    /// True if this record holds an intersection.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.t < f32::INFINITY
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    #[inline]
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }

    /// Store barycentric weights; `w` is derived so the three sum to one.
    #[inline]
    pub fn set_barycentrics(&mut self, u: f32, v: f32) {
        self.w = 1.0 - u - v;
        self.u = u;
        self.v = v;
    }
}

/// Trait for objects that can be hit by rays.
///
/// Both forms accept `t` in the closed window `[min, max]` and write a
/// record only when they find a hit inside it. Lane `i` of `hit_packet`
/// must produce exactly what `hit` produces for `rays.ray(i)` and
/// `ray_t[i]`.
pub trait Hittable {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns true if hit, and fills in the hit record.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;

    /// Test four rays at once. Returns which lanes were written.
    fn hit_packet<'a>(
        &'a self,
        rays: &RayPacket,
        ray_t: &[Interval; LANES],
        recs: &mut [HitRecord<'a>; LANES],
    ) -> [bool; LANES];
}

/// The closed set of scene primitives.
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Mesh(Mesh),
}

impl Hittable for Primitive {
    #[inline]
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t, rec),
            Primitive::Plane(p) => p.hit(ray, ray_t, rec),
            Primitive::Triangle(t) => t.hit(ray, ray_t, rec),
            Primitive::Mesh(m) => m.hit(ray, ray_t, rec),
        }
    }

    #[inline]
    fn hit_packet<'a>(
        &'a self,
        rays: &RayPacket,
        ray_t: &[Interval; LANES],
        recs: &mut [HitRecord<'a>; LANES],
    ) -> [bool; LANES] {
        match self {
            Primitive::Sphere(s) => s.hit_packet(rays, ray_t, recs),
            Primitive::Plane(p) => p.hit_packet(rays, ray_t, recs),
            Primitive::Triangle(t) => t.hit_packet(rays, ray_t, recs),
            Primitive::Mesh(m) => m.hit_packet(rays, ray_t, recs),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<Plane> for Primitive {
    fn from(p: Plane) -> Self {
        Primitive::Plane(p)
    }
}

impl From<Triangle> for Primitive {
    fn from(t: Triangle) -> Self {
        Primitive::Triangle(t)
    }
}

impl From<Mesh> for Primitive {
    fn from(m: Mesh) -> Self {
        Primitive::Mesh(m)
    }
}
