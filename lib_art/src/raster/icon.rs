use log::debug;

use super::canvas::{Canvas, CanvasError};
use super::color::{Rgb, Rgba};
use super::glyph::paint_glyph;

/// Width of the translucent edge around an icon.
pub const BORDER_MARGIN: u32 = 2;
pub const BORDER_COLOR: Rgba = Rgba::new(255, 255, 255, 180);
pub const GLYPH_COLOR: Rgba = Rgba::WHITE;

/// `size / 8`, integer division.
pub fn corner_radius(size: u32) -> u32 {
    size / 8
}

/// Whether pixel (`x`, `y`) falls outside the rounded corners of a
/// `size`x`size` square.
///
/// Offsets are measured from the canvas centre to the pixel centre. A pixel is
/// in a corner zone when both offsets exceed `size / 2 - radius` in magnitude,
/// and is clipped when it is further than `radius` from that corner's pivot.
pub fn is_clipped(size: u32, x: u32, y: u32) -> bool {
    let radius = corner_radius(size) as f64;
    let half = size as f64 / 2.0;
    let inner = half - radius;

    let dx = x as f64 + 0.5 - half;
    let dy = y as f64 + 0.5 - half;
    if dx.abs() <= inner || dy.abs() <= inner {
        return false;
    }

    let px = inner.copysign(dx);
    let py = inner.copysign(dy);
    (dx - px).hypot(dy - py) > radius
}

/// Makes every pixel outside the rounded corners fully transparent.
pub fn apply_rounded_mask(canvas: &mut Canvas<Rgba>) {
    let size = canvas.width().min(canvas.height());
    canvas.map(|x, y, current| {
        if is_clipped(size, x, y) {
            Rgba::TRANSPARENT
        } else {
            current
        }
    });
}

/// Background square with a translucent white edge of [`BORDER_MARGIN`]
/// pixels.
pub fn bordered_square(size: u32, background: Rgb) -> Result<Canvas<Rgba>, CanvasError> {
    let mut canvas = Canvas::filled(size, size, background.opaque())?;
    canvas.map(|x, y, current| {
        let edge = x < BORDER_MARGIN
            || y < BORDER_MARGIN
            || x >= size.saturating_sub(BORDER_MARGIN)
            || y >= size.saturating_sub(BORDER_MARGIN);
        if edge {
            BORDER_COLOR
        } else {
            current
        }
    });
    Ok(canvas)
}

/// Renders an application icon: bordered background, rounded corners, and
/// `letter` in white. A letter without a glyph renders background and border
/// only.
pub fn app_icon(size: u32, background: Rgb, letter: char) -> Result<Canvas<Rgba>, CanvasError> {
    debug!(
        "Rendering {}x{} icon {:?} on {:?}",
        size, size, letter, background
    );

    let mut canvas = bordered_square(size, background)?;
    apply_rounded_mask(&mut canvas);
    paint_glyph(&mut canvas, letter, GLYPH_COLOR);
    Ok(canvas)
}
