//! Camera for ray generation.

use quadray_math::{Ray, Vec3};

/// Pinhole camera generating rays through a viewport at unit focal distance.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    /// Vertical field of view in degrees
    vfov: f32,

    // Cached computed values (set by initialize())
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 1280,
            image_height: 720,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            origin: Vec3::ZERO,
            lower_left: Vec3::ZERO,
            horizontal: Vec3::X,
            vertical: Vec3::Y,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width.max(1);
        self.image_height = height.max(1);
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.origin = self.look_from;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * self.aspect_ratio();

        // Calculate camera basis vectors
        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        self.horizontal = viewport_width * u;
        self.vertical = viewport_height * v;
        self.lower_left = self.origin - self.horizontal / 2.0 - self.vertical / 2.0 - w;
    }

    /// Ray through viewport coordinates `(s, t)` in `[0, 1]²`, measured
    /// from the lower-left corner.
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        let target = self.lower_left + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
