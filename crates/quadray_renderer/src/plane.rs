//! Infinite plane primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use quadray_math::{
    f32x4, mask_lanes, mask_none, CmpGt, Interval, IntervalX4, Ray, RayPacket, Vec3, Vec3x4,
    LANES, ZERO,
};
use std::sync::Arc;

/// An infinite plane through `point` with the given outward `normal`.
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Arc<Material>,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3, material: Arc<Material>) -> Self {
        Self {
            point,
            normal,
            material,
        }
    }
}

impl Hittable for Plane {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let denom = ray.direction().dot(self.normal);

        // Parallel to the plane
        if denom.abs() <= ZERO {
            return false;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.contains(t) {
            return false;
        }

        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, self.normal);
        rec.set_barycentrics(0.0, 0.0);
        rec.material = self.material.as_ref();

        true
    }

    fn hit_packet<'a>(
        &'a self,
        rays: &RayPacket,
        ray_t: &[Interval; LANES],
        recs: &mut [HitRecord<'a>; LANES],
    ) -> [bool; LANES] {
        let normal = Vec3x4::splat(self.normal);
        let denom = rays.direction.dot(normal);

        let mut mask = denom.abs().cmp_gt(f32x4::splat(ZERO));
        if mask_none(mask) {
            return [false; LANES];
        }

        let t = (Vec3x4::splat(self.point) - rays.origin).dot(normal) / denom;
        mask = mask & IntervalX4::from_intervals(ray_t).contains(t);
        if mask_none(mask) {
            return [false; LANES];
        }

        let points = rays.at(t);
        let ts = t.to_array();
        let hits = mask_lanes(mask);
        for (i, rec) in recs.iter_mut().enumerate() {
            if !hits[i] {
                continue;
            }
            rec.t = ts[i];
            rec.p = points.lane(i);
            rec.set_face_normal(rays.ray(i), self.normal);
            rec.set_barycentrics(0.0, 0.0);
            rec.material = self.material.as_ref();
        }

        hits
    }
}
