//! Pixel buffers and the pure functions that paint them.

pub mod canvas;
pub mod color;
pub mod glyph;
pub mod gradient;
pub mod icon;
pub mod shapes;

pub use canvas::{Canvas, CanvasError, Rect};
pub use color::{Pixel, Rgb, Rgba};
pub use glyph::{paint_glyph, Glyph, Primitive, GLYPHS};
pub use gradient::{linear_gradient, paint_gradient, Axis};
pub use icon::app_icon;
