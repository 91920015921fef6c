use log::debug;
use thiserror::Error;

use super::color::{Pixel, Rgb, Rgba};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("Canvas dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("Pixel count {len} does not match {width}x{height}")]
    DimensionMismatch { width: u32, height: u32, len: usize },
}

/// Axis-aligned pixel rectangle. `x`/`y` may be negative, painting clips to
/// the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }
}

/// Row-major pixel grid. `pixels.len() == width * height` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas<P> {
    width: u32,
    height: u32,
    pixels: Vec<P>,
}

impl<P: Pixel> Canvas<P> {
    /// Creates a canvas where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: P) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptyDimensions { width, height });
        }
        debug!("New {}x{} canvas filled with {:?}", width, height, color);
        Ok(Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        })
    }

    /// Wraps an existing row-major pixel grid.
    ///
    /// # Errors
    /// - `CanvasError::EmptyDimensions` if either dimension is zero
    /// - `CanvasError::DimensionMismatch` if `pixels.len() != width * height`
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<P>) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptyDimensions { width, height });
        }
        if pixels.len() != width as usize * height as usize {
            return Err(CanvasError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, P> {
        self.pixels.chunks(self.width as usize)
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<P> {
        self.index(x as i64, y as i64).map(|i| self.pixels[i])
    }

    /// Writes one pixel. Coordinates outside the canvas are ignored so that
    /// shapes clip at the edges.
    pub fn set(&mut self, x: i64, y: i64, color: P) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: P) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i64);
        let y1 = rect.bottom().min(self.height as i64);

        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, color);
            }
        }
    }

    /// Replaces every pixel with `f(x, y, current)`.
    pub fn map<F>(&mut self, mut f: F)
    where
        F: FnMut(u32, u32, P) -> P,
    {
        let width = self.width as usize;
        for (i, pixel) in self.pixels.iter_mut().enumerate() {
            let x = (i % width) as u32;
            let y = (i / width) as u32;
            *pixel = f(x, y, *pixel);
        }
    }

    /// Channel-interleaved row-major bytes, `P::CHANNELS` per pixel.
    pub fn as_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * P::CHANNELS);
        for pixel in &self.pixels {
            pixel.write_channels(&mut out);
        }
        out
    }
}

impl Canvas<Rgba> {
    /// Drops the alpha channel of every pixel.
    pub fn to_rgb(&self) -> Canvas<Rgb> {
        Canvas {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|p| p.rgb()).collect(),
        }
    }
}
