//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use quadray_math::{
    f32x4, mask_lanes, mask_none, CmpGe, CmpGt, CmpLe, Interval, IntervalX4, Ray, RayPacket, Vec3,
    Vec3x4, LANES, ZERO,
};
use std::sync::Arc;

/// A triangle primitive.
///
/// Barycentrics are recorded as `(w, u, v)` for vertices `(a, b, c)`.
#[derive(Clone)]
pub struct Triangle {
    /// Vertices
    a: Vec3,
    b: Vec3,
    c: Vec3,
    /// Pre-computed edges `b - a` and `c - a`
    edge1: Vec3,
    edge2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    material: Arc<Material>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The outward normal follows the winding `a -> b -> c`.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, material: Arc<Material>) -> Self {
        let edge1 = b - a;
        let edge2 = c - a;
        let normal = edge1.cross(edge2).normalize_or_zero();

        Self {
            a,
            b,
            c,
            edge1,
            edge2,
            normal,
            material,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Move the triangle by `offset`. Edges and normal are unchanged.
    pub fn translate(&mut self, offset: Vec3) {
        self.a += offset;
        self.b += offset;
        self.c += offset;
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let p = ray.direction().cross(self.edge2);
        let determinant = p.dot(self.edge1);

        // Ray is parallel to triangle
        if determinant.abs() <= ZERO {
            return false;
        }

        let inv_det = 1.0 / determinant;
        let t_vec = ray.origin() - self.a;
        let u = p.dot(t_vec) * inv_det;
        let q = t_vec.cross(self.edge1);
        let v = q.dot(ray.direction()) * inv_det;

        let inside = u >= 0.0 && v >= 0.0 && u + v <= 1.0;
        if !inside {
            return false;
        }

        let t = q.dot(self.edge2) * inv_det;
        if !ray_t.contains(t) {
            return false;
        }

        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, self.normal);
        rec.set_barycentrics(u, v);
        rec.material = self.material.as_ref();

        true
    }

    fn hit_packet<'a>(
        &'a self,
        rays: &RayPacket,
        ray_t: &[Interval; LANES],
        recs: &mut [HitRecord<'a>; LANES],
    ) -> [bool; LANES] {
        let edge1 = Vec3x4::splat(self.edge1);
        let edge2 = Vec3x4::splat(self.edge2);

        let p = rays.direction.cross(edge2);
        let determinant = p.dot(edge1);

        let mut mask = determinant.abs().cmp_gt(f32x4::splat(ZERO));
        if mask_none(mask) {
            return [false; LANES];
        }

        let inv_det = f32x4::ONE / determinant;
        let t_vec = rays.origin - Vec3x4::splat(self.a);
        let u = p.dot(t_vec) * inv_det;
        let q = t_vec.cross(edge1);
        let v = q.dot(rays.direction) * inv_det;

        let inside = u.cmp_ge(f32x4::ZERO) & v.cmp_ge(f32x4::ZERO) & (u + v).cmp_le(f32x4::ONE);
        mask = mask & inside;
        if mask_none(mask) {
            return [false; LANES];
        }

        let t = q.dot(edge2) * inv_det;
        mask = mask & IntervalX4::from_intervals(ray_t).contains(t);
        if mask_none(mask) {
            return [false; LANES];
        }

        let points = rays.at(t);
        let (ts, us, vs) = (t.to_array(), u.to_array(), v.to_array());
        let hits = mask_lanes(mask);
        for (i, rec) in recs.iter_mut().enumerate() {
            if !hits[i] {
                continue;
            }
            rec.t = ts[i];
            rec.p = points.lane(i);
            rec.set_face_normal(rays.ray(i), self.normal);
            rec.set_barycentrics(us[i], vs[i]);
            rec.material = self.material.as_ref();
        }

        hits
    }
}
