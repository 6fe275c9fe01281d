//! Output image: averaged, gamma-corrected 8-bit RGBA pixels.

use std::io::{self, Write};
use std::path::Path;

use quadray_math::{Color, Interval};

const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Gamma 2 transfer; negative channels go to black.
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a summed sample color to RGBA bytes.
pub fn color_to_rgba(color: Color, samples: u32) -> [u8; 4] {
    let scale = 1.0 / samples.max(1) as f32;
    let channel = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c * scale))) as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// Row-major RGBA image, top row first.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Create a black, opaque canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0; width as usize * height as usize * 4];
        for px in pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        // y counts up from the bottom row
        let row = (self.height - 1 - y) as usize;
        Some((row * self.width as usize + x as usize) * 4)
    }

    /// Store the sum of `samples` colors for pixel (x, y), y = 0 at the bottom.
    /// Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color, samples: u32) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&color_to_rgba(color, samples));
        }
    }

    /// RGBA bytes of pixel (x, y), y = 0 at the bottom.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let mut px = [0; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(px)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Save to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
    }

    /// Write as plain-text PPM (P3).
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "P3\n{} {}\n255", self.width, self.height)?;
        for px in self.pixels.chunks_exact(4) {
            writeln!(out, "{} {} {}", px[0], px[1], px[2])?;
        }
        Ok(())
    }
}
