//! Scene aggregate: nearest-hit queries and light gathering.

use crate::{HitRecord, Hittable, Light, Primitive};
use quadray_math::{Interval, Ray, RayPacket, Vec3, LANES, ZERO};

/// A read-only view over the caller's primitives and lights.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    objects: &'a [Primitive],
    lights: &'a [Light],
}

impl<'a> Scene<'a> {
    pub fn new(objects: &'a [Primitive], lights: &'a [Light]) -> Self {
        Self { objects, lights }
    }

    pub fn objects(&self) -> &'a [Primitive] {
        self.objects
    }

    pub fn lights(&self) -> &'a [Light] {
        self.lights
    }

    /// Closest front-facing hit within `ray_t`.
    ///
    /// Surfaces are one-sided: a back-face hit is dropped even when it is
    /// closer than every front-face hit. On equal `t` the earlier object wins.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;
        let mut window = ray_t;
        let mut rec = HitRecord::default();

        for object in self.objects {
            if object.hit(ray, window, &mut rec)
                && rec.front_face
                && closest.map_or(true, |c| rec.t < c.t)
            {
                window.max = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    /// Lane form of [`Scene::hit`]. Lanes without a hit keep `t == f32::INFINITY`.
    pub fn hit_packet(
        &self,
        rays: &RayPacket,
        ray_t: &[Interval; LANES],
    ) -> [HitRecord<'a>; LANES] {
        let mut closest = [HitRecord::default(); LANES];
        let mut found = [false; LANES];
        let mut window = *ray_t;

        for object in self.objects {
            let mut recs = [HitRecord::default(); LANES];
            let hits = object.hit_packet(rays, &window, &mut recs);
            for i in 0..LANES {
                if hits[i] && recs[i].front_face && (!found[i] || recs[i].t < closest[i].t) {
                    found[i] = true;
                    window[i].max = recs[i].t;
                    closest[i] = recs[i];
                }
            }
        }

        closest
    }

    /// Total light reaching `point`, before any clamping.
    ///
    /// Point lights are skipped when something lies strictly between the
    /// surface and the light.
    pub fn light_intensity(&self, normal: Vec3, point: Vec3) -> f32 {
        self.lights
            .iter()
            .map(|light| match light.shadow_ray(point) {
                Some(shadow) if self.occluded(&shadow) => 0.0,
                _ => light.illuminate(normal, point),
            })
            .sum()
    }

    fn occluded(&self, shadow: &Ray) -> bool {
        let between = Interval::new(ZERO, 1.0);
        self.hit(shadow, between)
            .is_some_and(|rec| between.surrounds(rec.t))
    }
}
