//! Triangle mesh with a bounding-sphere cull.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Sphere, Triangle,
};
use quadray_math::{Interval, Ray, RayPacket, Vec3, LANES};
use std::sync::Arc;

/// A triangle mesh placed at `position`.
///
/// The mesh owns the materials its triangles use. Triangles hold shared
/// handles into that list, so a material lives as long as any triangle
/// referencing it.
pub struct Mesh {
    position: Vec3,
    bounds: Sphere,
    triangles: Vec<Triangle>,
    materials: Vec<Arc<Material>>,
}

impl Mesh {
    /// Create an empty mesh.
    ///
    /// `bounds_offset` is the bounding sphere's center relative to
    /// `position`. The sphere must enclose every triangle added later.
    pub fn new(position: Vec3, bounds_offset: Vec3, bounds_radius: f32) -> Self {
        Self {
            position,
            bounds: Sphere::bounds(position + bounds_offset, bounds_radius),
            triangles: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Add a triangle given in mesh-local coordinates.
    pub fn add_triangle(&mut self, mut triangle: Triangle) {
        triangle.translate(self.position);
        self.triangles.push(triangle);
    }

    /// Append a material to the mesh's own list and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(Arc::new(material));
        self.materials.len() - 1
    }

    /// Shared handle to one of the mesh's materials.
    pub fn material(&self, index: usize) -> Option<Arc<Material>> {
        self.materials.get(index).cloned()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn bounds(&self) -> &Sphere {
        &self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

impl Hittable for Mesh {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        if !self.bounds.could_hit(ray) {
            return false;
        }

        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;
        let mut temp = HitRecord::default();

        // Ties keep the earlier triangle
        for triangle in &self.triangles {
            if triangle.hit(ray, ray_t.with_max(closest_so_far), &mut temp)
                && (!hit_anything || temp.t < closest_so_far)
            {
                hit_anything = true;
                closest_so_far = temp.t;
                *rec = temp;
            }
        }

        hit_anything
    }

    fn hit_packet<'a>(
        &'a self,
        rays: &RayPacket,
        ray_t: &[Interval; LANES],
        recs: &mut [HitRecord<'a>; LANES],
    ) -> [bool; LANES] {
        let could_hit = self.bounds.could_hit_packet(rays);
        if !could_hit.iter().any(|&c| c) {
            return [false; LANES];
        }

        // Lanes that miss the bounds get an empty window, as the scalar path
        // skips them entirely
        let mut window: [Interval; LANES] =
            std::array::from_fn(|i| if could_hit[i] { ray_t[i] } else { Interval::EMPTY });
        let mut hit_anything = [false; LANES];
        let mut temp = [HitRecord::default(); LANES];

        for triangle in &self.triangles {
            let hits = triangle.hit_packet(rays, &window, &mut temp);
            for i in 0..LANES {
                if hits[i] && (!hit_anything[i] || temp[i].t < window[i].max) {
                    hit_anything[i] = true;
                    window[i].max = temp[i].t;
                    recs[i] = temp[i];
                }
            }
        }

        hit_anything
    }
}
