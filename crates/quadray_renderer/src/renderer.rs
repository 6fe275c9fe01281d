//! Path tracing integrator and sample loop.
//!
//! Each camera path is traced iteratively with a running throughput:
//! - a miss returns the sky seen along the current ray
//! - an absorbed ray returns the surface tint
//! - a scattered ray continues until the depth budget runs out
//!
//! The packet variant traces four independent paths per call. Lanes that
//! finish early stop updating their own color while the others continue.

use std::array;
use std::time::Instant;

use crate::{Camera, Canvas, Scene, TraceStats};
use quadray_math::{random::gen_f32, Color, Interval, Ray, RayPacket, LANES, ZERO};
use rand::RngCore;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Trace samples four at a time through the packet path
    pub packet: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            packet: true,
        }
    }
}

/// Vertical sky gradient, white at the horizon to light blue at the zenith.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Compute the color seen along a camera ray.
///
/// `depth` bounds the number of surface interactions. A path still bouncing
/// when the budget is spent sees the sky along its last ray.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    rng: &mut dyn RngCore,
    stats: &mut TraceStats,
) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;
    stats.rays += 1;

    for _ in 0..depth {
        let Some(rec) = scene.hit(&ray, Interval::new(ZERO, f32::INFINITY)) else {
            stats.escaped += 1;
            return throughput * sky_gradient(&ray);
        };
        stats.hits += 1;

        let light = scene.light_intensity(rec.normal, rec.p).min(1.0);
        let result = rec.material.scatter(&ray, &rec, rng);
        throughput *= result.attenuation * light;

        match result.scattered {
            Some(scattered) => {
                stats.scatters += 1;
                ray = scattered;
            }
            None => {
                stats.absorbed += 1;
                return throughput;
            }
        }
    }

    stats.depth_exhausted += 1;
    throughput * sky_gradient(&ray)
}

/// Four-path form of [`ray_color`].
///
/// Intersection runs through [`Scene::hit_packet`]; finished lanes are given
/// an empty window so they never record another hit. The loop always runs
/// `depth` iterations; once every lane has finished, the remaining ones do
/// no scene queries.
pub fn ray_color_packet(
    rays: &[Ray; LANES],
    scene: &Scene,
    depth: u32,
    rng: &mut dyn RngCore,
    stats: &mut TraceStats,
) -> [Color; LANES] {
    let mut current = *rays;
    let mut throughput = [Color::ONE; LANES];
    let mut colors = [Color::ZERO; LANES];
    let mut active = [true; LANES];
    stats.packets += 1;
    stats.rays += LANES as u64;

    for _ in 0..depth {
        if !active.contains(&true) {
            continue;
        }

        let windows: [Interval; LANES] = array::from_fn(|i| {
            if active[i] {
                Interval::new(ZERO, f32::INFINITY)
            } else {
                Interval::EMPTY
            }
        });
        let recs = scene.hit_packet(&RayPacket::new(current), &windows);

        for (i, rec) in recs.iter().enumerate() {
            if !active[i] {
                continue;
            }
            if !rec.is_hit() {
                stats.escaped += 1;
                colors[i] = throughput[i] * sky_gradient(&current[i]);
                active[i] = false;
                continue;
            }
            stats.hits += 1;

            let light = scene.light_intensity(rec.normal, rec.p).min(1.0);
            let result = rec.material.scatter(&current[i], rec, rng);
            throughput[i] *= result.attenuation * light;

            match result.scattered {
                Some(scattered) => {
                    stats.scatters += 1;
                    current[i] = scattered;
                }
                None => {
                    stats.absorbed += 1;
                    colors[i] = throughput[i];
                    active[i] = false;
                }
            }
        }
    }

    for i in 0..LANES {
        if active[i] {
            stats.depth_exhausted += 1;
            colors[i] = throughput[i] * sky_gradient(&current[i]);
        }
    }

    colors
}

/// Jittered camera ray for pixel (x, y) of a `size` canvas, y = 0 at the bottom.
fn sample_ray(camera: &Camera, (x, y): (u32, u32), (w, h): (u32, u32), rng: &mut dyn RngCore) -> Ray {
    let s = (x as f32 + gen_f32(rng)) / (w.max(2) - 1) as f32;
    let t = (y as f32 + gen_f32(rng)) / (h.max(2) - 1) as f32;
    camera.get_ray(s, t)
}

/// Sum of all samples for one pixel; the canvas does the averaging.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    pixel: (u32, u32),
    size: (u32, u32),
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    stats: &mut TraceStats,
) -> Color {
    let mut pixel_color = Color::ZERO;
    let mut remaining = config.samples_per_pixel;

    if config.packet {
        while remaining >= LANES as u32 {
            let mut rays = [Ray::default(); LANES];
            for ray in &mut rays {
                *ray = sample_ray(camera, pixel, size, rng);
            }
            for color in ray_color_packet(&rays, scene, config.max_depth, rng, stats) {
                pixel_color += color;
            }
            remaining -= LANES as u32;
        }
    }

    for _ in 0..remaining {
        let ray = sample_ray(camera, pixel, size, rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, rng, stats);
    }

    pixel_color
}

/// Render the scene into `canvas`, one pixel at a time, top row first.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    canvas: &mut Canvas,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> TraceStats {
    let mut stats = TraceStats::default();
    let size = (canvas.width(), canvas.height());
    let start = Instant::now();

    for y in (0..size.1).rev() {
        log::debug!("Scanlines remaining: {}", y + 1);
        for x in 0..size.0 {
            let color = render_pixel(camera, scene, (x, y), size, config, rng, &mut stats);
            canvas.set_pixel(x, y, color, config.samples_per_pixel);
        }
    }

    stats.log_summary(start.elapsed());
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Light, Material, Metal, Plane, Primitive, Sphere};
    use quadray_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn mirror(albedo: f32) -> Arc<Material> {
        Arc::new(Metal::new(Color::splat(albedo), 0.0).into())
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));
        let level = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0)));

        assert_eq!(up, Color::new(0.5, 0.7, 1.0));
        assert_eq!(down, Color::ONE);
        assert!((level - Color::new(0.75, 0.85, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_depth_returns_sky() {
        let objects = [Primitive::from(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            mirror(0.5),
        ))];
        let scene = Scene::new(&objects, &[]);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(42);
        let mut stats = TraceStats::default();

        let color = ray_color(&ray, &scene, 0, &mut rng, &mut stats);
        assert_eq!(color, sky_gradient(&ray));
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.depth_exhausted, 1);
    }

    #[test]
    fn test_parallel_mirrors_stop_at_depth() {
        let objects = [
            Primitive::from(Plane::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z, mirror(0.9))),
            Primitive::from(Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z, mirror(0.9))),
        ];
        let lights = [Light::ambient(1.0)];
        let scene = Scene::new(&objects, &lights);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(42);

        for depth in [1, 10, 50] {
            let mut stats = TraceStats::default();
            let color = ray_color(&ray, &scene, depth, &mut rng, &mut stats);

            assert_eq!(stats.hits, depth as u64);
            assert_eq!(stats.scatters, depth as u64);
            assert_eq!(stats.depth_exhausted, 1);
            assert!(color.is_finite());
            assert!(color.min_element() >= 0.0);

            let expected = 0.9f32.powi(depth as i32) * Color::new(0.75, 0.85, 1.0);
            assert!((color - expected).length() < 1e-4);
        }
    }

    #[test]
    fn test_light_clamped_to_one() {
        let floor = || Primitive::from(Plane::new(Vec3::ZERO, Vec3::Y, mirror(0.5)));
        let ray = Ray::new(Vec3::Y, Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(42);
        let mut stats = TraceStats::default();

        let objects = [floor()];
        let bright = [Light::ambient(0.8), Light::ambient(0.8)];
        let color = ray_color(&ray, &Scene::new(&objects, &bright), 5, &mut rng, &mut stats);
        assert_eq!(color, 0.5 * Color::new(0.5, 0.7, 1.0));

        // Without lights every surface is black
        let color = ray_color(&ray, &Scene::new(&objects, &[]), 5, &mut rng, &mut stats);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_every_path_finishes_once() {
        let objects = [
            Primitive::from(Sphere::new(
                Vec3::new(0.0, -100.5, -1.0),
                100.0,
                Arc::new(Lambertian::new(Color::splat(0.5)).into()),
            )),
            Primitive::from(Sphere::new(
                Vec3::new(0.0, 0.0, -1.0),
                0.5,
                Arc::new(Metal::new(Color::splat(0.8), 1.0).into()),
            )),
        ];
        let lights = [Light::ambient(0.3), Light::point(Vec3::new(0.0, 5.0, 0.0), 1.0)];
        let scene = Scene::new(&objects, &lights);
        let mut rng = StdRng::seed_from_u64(7);
        let mut stats = TraceStats::default();

        for i in 0..200 {
            let x = (i % 20) as f32 / 10.0 - 1.0;
            let y = (i / 20) as f32 / 10.0 - 0.5;
            let ray = Ray::new(Vec3::ZERO, Vec3::new(x, y, -1.0));
            let color = ray_color(&ray, &scene, 8, &mut rng, &mut stats);
            assert!(color.is_finite());
            assert!(color.min_element() >= 0.0);
        }

        assert_eq!(stats.rays, 200);
        assert_eq!(stats.finished_paths(), 200);
        assert!(stats.hits > 0);
    }

    #[test]
    fn test_packet_matches_scalar_for_mirrors() {
        let objects = [
            Primitive::from(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, mirror(0.8))),
            Primitive::from(Plane::new(Vec3::new(0.0, -0.5, 0.0), Vec3::Y, mirror(0.6))),
        ];
        let lights = [Light::ambient(0.4), Light::point(Vec3::new(2.0, 3.0, 1.0), 0.5)];
        let scene = Scene::new(&objects, &lights);
        let rays = [
            Ray::new(Vec3::ZERO, Vec3::NEG_Z),
            Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.9, -1.0)),
            Ray::new(Vec3::ZERO, Vec3::new(0.2, -0.4, -1.0)),
            Ray::new(Vec3::ZERO, Vec3::new(-0.1, 0.1, -1.0)),
        ];
        let mut rng = StdRng::seed_from_u64(42);

        for depth in [0, 1, 3, 10] {
            let mut packet_stats = TraceStats::default();
            let packet = ray_color_packet(&rays, &scene, depth, &mut rng, &mut packet_stats);

            let mut scalar_stats = TraceStats::default();
            for (ray, color) in rays.iter().zip(packet) {
                let expected = ray_color(ray, &scene, depth, &mut rng, &mut scalar_stats);
                assert_eq!(color, expected);
            }

            assert_eq!(packet_stats.packets, 1);
            scalar_stats.packets = 1;
            assert_eq!(packet_stats, scalar_stats);
        }
    }

    #[test]
    fn test_packet_lanes_finished_early_stay_fixed() {
        // Every lane escapes on the first iteration; the other 49 change nothing
        let objects = [Primitive::from(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            mirror(0.8),
        ))];
        let scene = Scene::new(&objects, &[]);
        let rays = [
            Ray::new(Vec3::ZERO, Vec3::Y),
            Ray::new(Vec3::ZERO, Vec3::Z),
            Ray::new(Vec3::ZERO, Vec3::X),
            Ray::new(Vec3::ZERO, Vec3::NEG_Y),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let mut stats = TraceStats::default();

        let colors = ray_color_packet(&rays, &scene, 50, &mut rng, &mut stats);
        for (ray, color) in rays.iter().zip(colors) {
            assert_eq!(color, sky_gradient(ray));
        }
        assert_eq!(stats.escaped, 4);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.depth_exhausted, 0);
    }

    fn small_scene() -> (Vec<Primitive>, Vec<Light>) {
        let objects = vec![Primitive::from(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.7, 0.3, 0.3)).into()),
        ))];
        (objects, vec![Light::ambient(0.8)])
    }

    #[test]
    fn test_render_counts_samples() {
        let (objects, lights) = small_scene();
        let scene = Scene::new(&objects, &lights);
        let mut camera = Camera::new().with_resolution(4, 3);
        camera.initialize();

        let config = RenderConfig {
            samples_per_pixel: 5,
            max_depth: 4,
            packet: true,
        };
        let mut canvas = Canvas::new(4, 3);
        let mut rng = StdRng::seed_from_u64(42);
        let stats = render(&camera, &scene, &mut canvas, &config, &mut rng);

        assert_eq!(stats.rays, 4 * 3 * 5);
        assert_eq!(stats.packets, 4 * 3);
        assert_eq!(stats.finished_paths(), stats.rays);

        let scalar = RenderConfig {
            packet: false,
            ..config
        };
        let stats = render(&camera, &scene, &mut canvas, &scalar, &mut rng);
        assert_eq!(stats.rays, 4 * 3 * 5);
        assert_eq!(stats.packets, 0);
    }

    #[test]
    fn test_render_is_reproducible() {
        let (objects, lights) = small_scene();
        let scene = Scene::new(&objects, &lights);
        let mut camera = Camera::new().with_resolution(8, 6);
        camera.initialize();
        let config = RenderConfig {
            samples_per_pixel: 4,
            max_depth: 5,
            packet: true,
        };

        let mut first = Canvas::new(8, 6);
        render(&camera, &scene, &mut first, &config, &mut StdRng::seed_from_u64(3));
        let mut second = Canvas::new(8, 6);
        render(&camera, &scene, &mut second, &config, &mut StdRng::seed_from_u64(3));

        assert_eq!(first.as_bytes(), second.as_bytes());
        // Corner pixels see sky, the center sees the sphere
        assert_ne!(first.pixel(0, 5), first.pixel(4, 3));
    }
}
