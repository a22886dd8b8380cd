//! RGBA raster images drawn by pixmap scatters and pixmap items.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// How a size is fitted into a target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatioMode {
    /// Take the target size exactly.
    Ignore,
    /// Largest size inside the target that keeps the aspect ratio.
    #[default]
    Keep,
    /// Smallest size covering the target that keeps the aspect ratio.
    KeepByExpanding,
}

/// Fit `size` into `target` according to `mode`. Sizes are `(width, height)`.
#[must_use]
pub fn scale_size(size: (u32, u32), target: (u32, u32), mode: AspectRatioMode) -> (u32, u32) {
    let (w, h) = (u64::from(size.0), u64::from(size.1));
    let (tw, th) = (u64::from(target.0), u64::from(target.1));
    if mode == AspectRatioMode::Ignore || w == 0 || h == 0 {
        return target;
    }
    let rw = th * w / h;
    let use_height = match mode {
        AspectRatioMode::Keep => rw <= tw,
        _ => rw >= tw,
    };
    if use_height {
        (rw as u32, target.1)
    } else {
        (target.0, (tw * h / w) as u32)
    }
}

/// A tightly packed RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    /// RGBA pixels in row-major order, 4 bytes each.
    pixels: Vec<u8>,
}

impl Pixmap {
    /// Create a transparent pixmap.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        })
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or a buffer of the wrong length.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Fill the whole image with one color.
    pub fn fill(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Color at `(x, y)`, `None` out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Set the color at `(x, y)`; ignored out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Composite `color` over the pixel at `(x, y)`; ignored out of bounds.
    ///
    /// Standard "over" operator:
    /// `out = src * src_alpha + dst * dst_alpha * (1 - src_alpha)`
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(self.pixels[idx + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        let blend = |src: u8, dst: u8| -> u8 {
            let src_f = f32::from(src) / 255.0;
            let dst_f = f32::from(dst) / 255.0;
            ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0).round() as u8
        };
        self.pixels[idx] = blend(color.r, self.pixels[idx]);
        self.pixels[idx + 1] = blend(color.g, self.pixels[idx + 1]);
        self.pixels[idx + 2] = blend(color.b, self.pixels[idx + 2]);
        self.pixels[idx + 3] = (out_a * 255.0).round() as u8;
    }

    /// Nearest-neighbor resample to `width` x `height`. `None` when either
    /// target dimension is zero.
    #[must_use]
    pub fn scaled(&self, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        if (width, height) == self.size() {
            return Some(self.clone());
        }
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in 0..height {
            let src_y = (u64::from(y) * u64::from(self.height) / u64::from(height)) as u32;
            for x in 0..width {
                let src_x = (u64::from(x) * u64::from(self.width) / u64::from(width)) as u32;
                let idx = self.pixel_index(src_x, src_y);
                pixels.extend_from_slice(&self.pixels[idx..idx + 4]);
            }
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Resample to fit `target` according to `mode`.
    #[must_use]
    pub fn scaled_to(&self, target: (u32, u32), mode: AspectRatioMode) -> Option<Self> {
        let (w, h) = scale_size(self.size(), target, mode);
        self.scaled(w, h)
    }

    /// Copy mirrored horizontally and/or vertically.
    #[must_use]
    pub fn mirrored(&self, horizontal: bool, vertical: bool) -> Self {
        if !horizontal && !vertical {
            return self.clone();
        }
        let mut out = self.clone();
        for y in 0..self.height {
            let src_y = if vertical { self.height - 1 - y } else { y };
            for x in 0..self.width {
                let src_x = if horizontal { self.width - 1 - x } else { x };
                let src = self.pixel_index(src_x, src_y);
                let dst = self.pixel_index(x, y);
                out.pixels[dst..dst + 4].copy_from_slice(&self.pixels[src..src + 4]);
            }
        }
        out
    }
}
