//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use quadray_math::{
    f32x4, mask_lanes, mask_none, negate, CmpGe, Interval, IntervalX4, Ray, RayPacket, Vec3,
    Vec3x4, LANES,
};
use std::sync::Arc;

/// A sphere primitive.
///
/// Only the near root of the quadratic is considered, so rays starting
/// inside the sphere pass through it. Spheres are one-sided for rays that
/// originate outside them.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// A sphere that is only used for culling and never shaded.
    pub fn bounds(center: Vec3, radius: f32) -> Self {
        Self::new(center, radius, Arc::new(Material::absorbing()))
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Discriminant-only test: could the ray's line touch the sphere at all?
    ///
    /// No root is solved, so this also passes for spheres behind the ray.
    pub fn could_hit(&self, ray: &Ray) -> bool {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        half_b * half_b - a * c >= 0.0
    }

    /// Lane form of [`Sphere::could_hit`].
    pub fn could_hit_packet(&self, rays: &RayPacket) -> [bool; LANES] {
        mask_lanes(self.discriminant_packet(rays).2.cmp_ge(f32x4::ZERO))
    }

    /// Returns (a, half_b, discriminant) for every lane.
    #[inline]
    fn discriminant_packet(&self, rays: &RayPacket) -> (f32x4, f32x4, f32x4) {
        let oc = rays.origin - Vec3x4::splat(self.center);
        let a = rays.direction.length_squared();
        let half_b = oc.dot(rays.direction);
        let c = oc.length_squared() - f32x4::splat(self.radius * self.radius);

        (a, half_b, half_b * half_b - a * c)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return false;
        }

        // Near root only; no fallback to the far root
        let root = (-half_b - discriminant.sqrt()) / a;
        if !ray_t.contains(root) {
            return false;
        }

        rec.t = root;
        rec.p = ray.at(root);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
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
        let (a, half_b, discriminant) = self.discriminant_packet(rays);

        let mut mask = discriminant.cmp_ge(f32x4::ZERO);
        if mask_none(mask) {
            return [false; LANES];
        }

        let root = (negate(half_b) - discriminant.sqrt()) / a;
        mask = mask & IntervalX4::from_intervals(ray_t).contains(root);
        if mask_none(mask) {
            return [false; LANES];
        }

        let points = rays.at(root);
        let roots = root.to_array();
        let hits = mask_lanes(mask);
        for (i, rec) in recs.iter_mut().enumerate() {
            if !hits[i] {
                continue;
            }
            rec.t = roots[i];
            rec.p = points.lane(i);
            let outward_normal = (rec.p - self.center) / self.radius;
            rec.set_face_normal(rays.ray(i), outward_normal);
            rec.set_barycentrics(0.0, 0.0);
            rec.material = self.material.as_ref();
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_packet_matches_scalar, random_packets};
    use crate::Lambertian;
    use quadray_math::ZERO;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey() -> Arc<Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)).into())
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(ZERO, f32::INFINITY), &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-6);
        assert!((rec.p - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-6);
        assert!((rec.normal - Vec3::Z).length() < 1e-6);
        assert!(rec.front_face);
        assert!(std::ptr::eq(rec.material, &*sphere.material));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, Interval::new(ZERO, f32::INFINITY), &mut rec));
        assert!(!rec.is_hit());
    }

    #[test]
    fn test_sphere_near_root_only() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        // Near root at 0.5 is outside the window; the far root at 1.5 is not used
        assert!(!sphere.hit(&ray, Interval::new(1.0, f32::INFINITY), &mut rec));

        // From inside, the near root is behind the origin
        let inside = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::X);
        assert!(!sphere.hit(&inside, Interval::new(ZERO, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_sphere_window_not_overwritten_on_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord {
            t: 0.25,
            ..HitRecord::default()
        };

        assert!(!sphere.hit(&ray, Interval::new(ZERO, 0.25), &mut rec));
        assert_eq!(rec.t, 0.25);
    }

    #[test]
    fn test_sphere_normal_faces_ray() {
        let mut rng = StdRng::seed_from_u64(3);
        let center = Vec3::new(0.3, -0.2, -4.0);
        let sphere = Sphere::new(center, 1.25, grey());

        for _ in 0..500 {
            let origin = center + quadray_math::random::random_unit_vector(&mut rng) * 6.0;
            let ray = Ray::new(origin, center - origin);
            let mut rec = HitRecord::default();

            assert!(sphere.hit(&ray, Interval::new(ZERO, f32::INFINITY), &mut rec));
            let radial = (rec.p - center).normalize();
            assert!(rec.normal.cross(radial).length() < 1e-4);
            assert!(rec.normal.dot(ray.direction()) <= 0.0);
        }
    }

    #[test]
    fn test_could_hit() {
        let sphere = Sphere::bounds(Vec3::new(0.0, 0.0, -1.0), 0.5);
        assert!(sphere.could_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)));
        // Behind the origin still counts: no root is solved
        assert!(sphere.could_hit(&Ray::new(Vec3::ZERO, Vec3::Z)));
        assert!(!sphere.could_hit(&Ray::new(Vec3::ZERO, Vec3::Y)));

        let packet = RayPacket::new([
            Ray::new(Vec3::ZERO, Vec3::NEG_Z),
            Ray::new(Vec3::ZERO, Vec3::Y),
            Ray::new(Vec3::ZERO, Vec3::Z),
            Ray::new(Vec3::ZERO, Vec3::X),
        ]);
        assert_eq!(sphere.could_hit_packet(&packet), [true, false, true, false]);
    }

    #[test]
    fn test_sphere_packet_matches_scalar() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let sphere = Sphere::new(Vec3::new(0.2, 0.1, -2.0), 1.0, grey());

        for (packet, windows) in random_packets(&mut rng, sphere.center(), 2000) {
            assert_packet_matches_scalar(&sphere, &packet, &windows);
        }
    }
}
