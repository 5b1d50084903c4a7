//! Render target.

use lux_core::Color;

/// The pixel-write target for a render pass.
///
/// Pixels hold linear, unclamped color; coordinates are 0-indexed with
/// the origin at the top-left, +x right and +y down. Image encoding is
/// a collaborator concern; `to_rgba8` is provided as a display helper.
pub struct Film {
    width: u32,
    height: u32,
    pub pixels: Vec<Color>,
}

impl Film {
    /// Create a film filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Store a color at (x, y). Values outside [0, 1] are kept as-is.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to gamma-corrected (gamma 2.0), clamped RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&[
                channel_to_byte(color.x),
                channel_to_byte(color.y),
                channel_to_byte(color.z),
                255,
            ]);
        }
        bytes
    }
}

#[inline]
fn channel_to_byte(linear: f32) -> u8 {
    let gamma = if linear > 0.0 { linear.sqrt() } else { 0.0 };
    (255.0 * gamma.clamp(0.0, 1.0)) as u8
}
