//! Surface scattering materials.

use crate::hittable::HitRecord;
use quadray_math::{random::random_unit_vector, Color, Ray, Vec3, Vec3Ext};
use rand::RngCore;

/// Outcome of a scatter event.
///
/// The attenuation is reported even when the ray is absorbed: the
/// integrator still tints the surface color with it.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Multiplicative color applied to the bounced contribution
    pub attenuation: Color,
    /// The bounced ray, `None` if the ray was absorbed
    pub scattered: Option<Ray>,
}

/// The closed set of surface materials.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    VertexColor(VertexColor),
}

impl Material {
    /// Black diffuse material, used where a surface is never shaded.
    pub const fn absorbing() -> Self {
        Material::Lambertian(Lambertian::new(Color::ZERO))
    }

    /// Scatter an incoming ray at the hit described by `rec`.
    #[inline]
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        match self {
            Material::Lambertian(m) => m.scatter(rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::VertexColor(m) => m.scatter(rec, rng),
        }
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub const fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        ScatterResult {
            attenuation: self.albedo,
            scattered: Some(Ray::new(rec.p, diffuse_direction(rec.normal, rng))),
        }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let mut reflected = ray_in.direction().reflect(rec.normal);
        if self.fuzz > 0.0 {
            reflected += self.fuzz * random_unit_vector(rng);
        }

        // Fuzz that pushes the reflection below the surface absorbs the ray
        let scattered = (reflected.dot(rec.normal) > 0.0).then(|| Ray::new(rec.p, reflected));
        ScatterResult {
            attenuation: self.albedo,
            scattered,
        }
    }
}

/// Debug material for triangles: diffuse scattering tinted by the hit's
/// barycentric coordinates.
///
/// `a`, `b` and `c` are the colors at the triangle's vertices `a`, `b`
/// and `c`, weighted by the record's `w`, `u` and `v` respectively.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexColor {
    a: Color,
    b: Color,
    c: Color,
}

impl VertexColor {
    pub fn new(a: Color, b: Color, c: Color) -> Self {
        Self { a, b, c }
    }

    /// Interpolated color at the hit.
    pub fn color_at(&self, rec: &HitRecord) -> Color {
        rec.u * self.b + rec.v * self.c + rec.w * self.a
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        ScatterResult {
            attenuation: self.color_at(rec),
            scattered: Some(Ray::new(rec.p, diffuse_direction(rec.normal, rng))),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<VertexColor> for Material {
    fn from(m: VertexColor) -> Self {
        Material::VertexColor(m)
    }
}

/// Cosine-weighted bounce direction around `normal`.
#[inline]
fn diffuse_direction(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let direction = normal + random_unit_vector(rng);

    // Catch degenerate scatter direction
    if direction.near_zero() {
        normal
    } else {
        direction
    }
}
