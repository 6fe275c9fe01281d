//! Shared helpers for the packet differential tests.

use crate::{HitRecord, Hittable};
use quadray_math::random::{gen_f32, gen_range, random_in_unit_sphere, random_unit_vector};
use quadray_math::{Interval, Ray, RayPacket, Vec3, LANES, ZERO};
use rand::RngCore;

/// Random packets of rays aimed roughly at `target`, with varied windows.
///
/// Most rays pass near the target so that hits, misses, edge cases and
/// window rejections all show up; a few point anywhere.
pub fn random_packets(
    rng: &mut dyn RngCore,
    target: Vec3,
    count: usize,
) -> Vec<(RayPacket, [Interval; LANES])> {
    (0..count)
        .map(|_| {
            let rays: [Ray; LANES] = std::array::from_fn(|_| random_ray(rng, target));
            let windows: [Interval; LANES] = std::array::from_fn(|_| random_window(rng));
            (RayPacket::new(rays), windows)
        })
        .collect()
}

fn random_ray(rng: &mut dyn RngCore, target: Vec3) -> Ray {
    let origin = target + random_unit_vector(rng) * gen_range(rng, 1.0, 6.0);
    let direction = if gen_f32(rng) < 0.125 {
        random_unit_vector(rng)
    } else {
        (target + random_in_unit_sphere(rng) * 1.5 - origin) * gen_range(rng, 0.25, 2.0)
    };
    Ray::new(origin, direction)
}

fn random_window(rng: &mut dyn RngCore) -> Interval {
    match (gen_f32(rng) * 4.0) as u32 {
        0 => Interval::new(ZERO, gen_range(rng, 0.5, 4.0)),
        1 => Interval::new(gen_range(rng, 0.5, 2.0), f32::INFINITY),
        2 => Interval::EMPTY,
        _ => Interval::new(ZERO, f32::INFINITY),
    }
}

/// Lane `i` of the packet query must equal a scalar query on ray `i`.
pub fn assert_packet_matches_scalar<H: Hittable>(
    object: &H,
    rays: &RayPacket,
    windows: &[Interval; LANES],
) {
    let mut recs = [HitRecord::default(); LANES];
    let hits = object.hit_packet(rays, windows, &mut recs);

    for i in 0..LANES {
        let mut rec = HitRecord::default();
        let hit = object.hit(rays.ray(i), windows[i], &mut rec);

        assert_eq!(hit, hits[i], "lane {i}: {:?} in {:?}", rays.ray(i), windows[i]);
        assert_eq!(rec.t.to_bits(), recs[i].t.to_bits(), "lane {i} t");
        assert_eq!(rec.p, recs[i].p, "lane {i} p");
        assert_eq!(rec.normal, recs[i].normal, "lane {i} normal");
        assert_eq!(rec.front_face, recs[i].front_face, "lane {i} front_face");
        assert_eq!(
            (rec.u.to_bits(), rec.v.to_bits(), rec.w.to_bits()),
            (recs[i].u.to_bits(), recs[i].v.to_bits(), recs[i].w.to_bits()),
            "lane {i} barycentrics"
        );
        assert!(std::ptr::eq(rec.material, recs[i].material), "lane {i} material");
    }
}
