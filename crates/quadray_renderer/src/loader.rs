//! JSON scene files.
//!
//! A scene file lists shared materials, objects referencing them by index,
//! lights, and optional camera settings:
//!
//! ```json
//! {
//!   "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 90 },
//!   "materials": [{ "type": "lambertian", "albedo": [0.7, 0.3, 0.3] }],
//!   "objects": [{ "type": "sphere", "center": [0, 0, -1], "radius": 0.5, "material": 0 }],
//!   "lights": [{ "type": "ambient", "intensity": 0.5 }]
//! }
//! ```
//!
//! Meshes carry their own material list; their faces index into it.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use quadray_math::{Color, Vec3, ZERO};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    Camera, Lambertian, Light, Material, Mesh, Metal, Plane, Primitive, Sphere, Triangle,
    VertexColor,
};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material index {index} ({available} defined)")]
    UnknownMaterial { index: usize, available: usize },

    #[error("Degenerate {0}")]
    Degenerate(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Camera placement read from a scene file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
        }
    }
}

impl CameraSettings {
    /// Build an initialized camera for the given image size.
    pub fn camera(&self, width: u32, height: u32) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(width, height)
            .with_position(self.look_from, self.look_at, self.vup)
            .with_fov(self.vfov);
        camera.initialize();
        camera
    }
}

/// A loaded scene, ready to be borrowed by [`crate::Scene`].
pub struct SceneDescription {
    pub camera: CameraSettings,
    pub objects: Vec<Primitive>,
    pub lights: Vec<Light>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum MaterialDef {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    VertexColor {
        colors: [Color; 3],
    },
}

impl From<&MaterialDef> for Material {
    fn from(def: &MaterialDef) -> Self {
        match *def {
            MaterialDef::Lambertian { albedo } => Lambertian::new(albedo).into(),
            MaterialDef::Metal { albedo, fuzz } => Metal::new(albedo, fuzz).into(),
            MaterialDef::VertexColor { colors: [a, b, c] } => VertexColor::new(a, b, c).into(),
        }
    }
}

#[derive(Deserialize)]
struct BoundsDef {
    center: Vec3,
    radius: f32,
}

#[derive(Deserialize)]
struct FaceDef {
    vertices: [Vec3; 3],
    material: usize,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ObjectDef {
    Sphere {
        center: Vec3,
        radius: f32,
        material: usize,
    },
    Plane {
        point: Vec3,
        normal: Vec3,
        material: usize,
    },
    Triangle {
        vertices: [Vec3; 3],
        material: usize,
    },
    Mesh {
        #[serde(default)]
        position: Vec3,
        /// Bounding sphere relative to `position`; fitted to the faces if absent
        bounds: Option<BoundsDef>,
        #[serde(default)]
        materials: Vec<MaterialDef>,
        #[serde(default)]
        faces: Vec<FaceDef>,
    },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LightDef {
    Ambient { intensity: f32 },
    Point { position: Vec3, intensity: f32 },
}

#[derive(Deserialize)]
struct SceneFile {
    #[serde(default)]
    camera: CameraSettings,
    #[serde(default)]
    materials: Vec<MaterialDef>,
    #[serde(default)]
    objects: Vec<ObjectDef>,
    #[serde(default)]
    lights: Vec<LightDef>,
}

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let scene = parse_scene(&text)?;
    log::info!(
        "Loaded {}: {} objects, {} lights",
        path.display(),
        scene.objects.len(),
        scene.lights.len()
    );
    Ok(scene)
}

/// Parse a scene from JSON text.
pub fn parse_scene(text: &str) -> LoadResult<SceneDescription> {
    let file: SceneFile = serde_json::from_str(text)?;

    let materials: Vec<Arc<Material>> = file
        .materials
        .iter()
        .map(|def| Arc::new(Material::from(def)))
        .collect();

    let objects = file
        .objects
        .into_iter()
        .map(|def| build_object(def, &materials))
        .collect::<LoadResult<Vec<_>>>()?;

    let lights = file
        .lights
        .into_iter()
        .map(|def| match def {
            LightDef::Ambient { intensity } => Light::ambient(intensity),
            LightDef::Point {
                position,
                intensity,
            } => Light::point(position, intensity),
        })
        .collect();

    Ok(SceneDescription {
        camera: file.camera,
        objects,
        lights,
    })
}

fn lookup(materials: &[Arc<Material>], index: usize) -> LoadResult<Arc<Material>> {
    materials
        .get(index)
        .cloned()
        .ok_or(LoadError::UnknownMaterial {
            index,
            available: materials.len(),
        })
}

fn build_object(def: ObjectDef, materials: &[Arc<Material>]) -> LoadResult<Primitive> {
    let object = match def {
        ObjectDef::Sphere {
            center,
            radius,
            material,
        } => {
            if radius <= 0.0 {
                return Err(LoadError::Degenerate(format!(
                    "sphere at {center}: radius {radius}"
                )));
            }
            Sphere::new(center, radius, lookup(materials, material)?).into()
        }
        ObjectDef::Plane {
            point,
            normal,
            material,
        } => {
            if normal.length_squared() <= ZERO * ZERO {
                return Err(LoadError::Degenerate(format!("plane at {point}: zero normal")));
            }
            Plane::new(point, normal, lookup(materials, material)?).into()
        }
        ObjectDef::Triangle {
            vertices: [a, b, c],
            material,
        } => Triangle::new(a, b, c, lookup(materials, material)?).into(),
        ObjectDef::Mesh {
            position,
            bounds,
            materials: mesh_materials,
            faces,
        } => build_mesh(position, bounds, &mesh_materials, &faces)?.into(),
    };
    Ok(object)
}

/// Smallest sphere around the box enclosing every face, in mesh-local space.
fn fit_bounds(faces: &[FaceDef]) -> BoundsDef {
    if faces.is_empty() {
        return BoundsDef {
            center: Vec3::ZERO,
            radius: ZERO,
        };
    }

    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for v in faces.iter().flat_map(|face| face.vertices) {
        min = min.min(v);
        max = max.max(v);
    }

    let center = (min + max) * 0.5;
    let radius = faces
        .iter()
        .flat_map(|face| face.vertices)
        .map(|v| v.distance(center))
        .fold(0.0, f32::max);

    BoundsDef {
        center,
        radius: radius + ZERO,
    }
}

fn build_mesh(
    position: Vec3,
    bounds: Option<BoundsDef>,
    materials: &[MaterialDef],
    faces: &[FaceDef],
) -> LoadResult<Mesh> {
    if faces.is_empty() {
        log::warn!("Mesh at {} has no faces", position);
    }

    let bounds = match bounds {
        Some(bounds) if bounds.radius <= 0.0 => {
            return Err(LoadError::Degenerate(format!(
                "mesh at {position}: bounds radius {}",
                bounds.radius
            )));
        }
        Some(bounds) => bounds,
        None => fit_bounds(faces),
    };

    let mut mesh = Mesh::new(position, bounds.center, bounds.radius);
    for def in materials {
        mesh.add_material(def.into());
    }

    for face in faces {
        let material = mesh.material(face.material).ok_or(LoadError::UnknownMaterial {
            index: face.material,
            available: mesh.material_count(),
        })?;
        let [a, b, c] = face.vertices;
        mesh.add_triangle(Triangle::new(a, b, c, material));
    }

    log::debug!(
        "Built mesh at {}: {} triangles, {} materials",
        position,
        mesh.triangle_count(),
        mesh.material_count()
    );
    Ok(mesh)
}

/// The built-in demo scene: a ground sphere, three spheres in a row, a
/// vertex-colored quad behind them, and an ambient plus a point light.
pub fn default_scene() -> SceneDescription {
    let ground = Arc::new(Material::from(Lambertian::new(Color::new(0.8, 0.8, 0.0))));
    let center = Arc::new(Material::from(Lambertian::new(Color::new(0.7, 0.3, 0.3))));
    let left = Arc::new(Material::from(Metal::new(Color::new(0.8, 0.8, 0.8), 0.3)));
    let right = Arc::new(Material::from(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0)));

    let mut backdrop = Mesh::new(Vec3::new(0.0, 0.5, -3.0), Vec3::ZERO, 2.2);
    let debug = backdrop.add_material(
        VertexColor::new(
            Color::new(1.0, 0.0, 0.0),
            Color::new(0.0, 1.0, 0.0),
            Color::new(0.0, 0.0, 1.0),
        )
        .into(),
    );
    if let Some(material) = backdrop.material(debug) {
        let (bl, br) = (Vec3::new(-1.5, -1.5, 0.0), Vec3::new(1.5, -1.5, 0.0));
        let (tl, tr) = (Vec3::new(-1.5, 1.5, 0.0), Vec3::new(1.5, 1.5, 0.0));
        backdrop.add_triangle(Triangle::new(bl, br, tr, material.clone()));
        backdrop.add_triangle(Triangle::new(bl, tr, tl, material));
    }

    SceneDescription {
        camera: CameraSettings::default(),
        objects: vec![
            Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground).into(),
            Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center).into(),
            Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, left).into(),
            Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, right).into(),
            backdrop.into(),
        ],
        lights: vec![
            Light::ambient(0.4),
            Light::point(Vec3::new(2.0, 3.0, 1.0), 0.8),
        ],
    }
}
