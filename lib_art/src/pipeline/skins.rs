//! Installer skin bitmaps: a tall sidebar and a wide header.

use crate::raster::gradient::{linear_gradient, Axis};
use crate::raster::shapes::{bars, flag, frame, text_placeholder};
use crate::raster::{Canvas, CanvasError, Rect, Rgb};

pub const SIDEBAR_WIDTH: u32 = 164;
pub const SIDEBAR_HEIGHT: u32 = 314;
pub const HEADER_WIDTH: u32 = 500;
pub const HEADER_HEIGHT: u32 = 58;

const SIDEBAR_TOP: Rgb = Rgb::new(0, 0, 100);
const SIDEBAR_BOTTOM: Rgb = Rgb::new(10, 50, 180);
const TITLE_Y: i64 = 20;
const FLAG_ORIGIN: (i64, i64) = (20, 100);
const FLAG_SQUARE: u32 = 20;
const FLAG_GAP: u32 = 2;
const FLAG_COLORS: [Rgb; 4] = [
    Rgb::new(255, 0, 0),
    Rgb::new(0, 170, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 220, 0),
];

const HEADER_BACKGROUND: Rgb = Rgb::WHITE;
const HEADER_FRAME: Rgb = Rgb::new(0, 0, 128);
const HEADER_FRAME_THICKNESS: u32 = 4;

/// Navy gradient with title placeholders, the four-color flag, and a footer
/// rule pair.
pub fn sidebar() -> Result<Canvas<Rgb>, CanvasError> {
    let mut canvas = linear_gradient(
        SIDEBAR_WIDTH,
        SIDEBAR_HEIGHT,
        SIDEBAR_TOP,
        SIDEBAR_BOTTOM,
        Axis::Vertical,
    )?;

    // Vendor line
    text_placeholder(
        &mut canvas,
        Rect::new(10, TITLE_Y, 70, 8),
        Some(10),
        Rgb::WHITE,
    );
    // Product line
    text_placeholder(
        &mut canvas,
        Rect::new(10, TITLE_Y + 20, 80, 16),
        Some(14),
        Rgb::new(255, 200, 0),
    );
    // Version numerals
    bars(
        &mut canvas,
        Rect::new(10, TITLE_Y + 46, 30, 24),
        Rgb::new(255, 220, 0),
        |dx| !(4..=12).contains(&dx),
    );

    flag(&mut canvas, FLAG_ORIGIN, FLAG_SQUARE, FLAG_GAP, FLAG_COLORS);

    text_placeholder(
        &mut canvas,
        Rect::new(10, SIDEBAR_HEIGHT as i64 - 40, 130, 6),
        None,
        Rgb::new(200, 200, 255),
    );

    Ok(canvas)
}

/// White banner with a navy frame and one title placeholder.
pub fn header() -> Result<Canvas<Rgb>, CanvasError> {
    let mut canvas = Canvas::filled(HEADER_WIDTH, HEADER_HEIGHT, HEADER_BACKGROUND)?;
    frame(&mut canvas, HEADER_FRAME_THICKNESS, HEADER_FRAME);
    text_placeholder(&mut canvas, Rect::new(20, 15, 200, 12), None, Rgb::BLACK);
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_layout() {
        let canvas = sidebar().unwrap();
        assert_eq!(canvas.dimensions(), (164, 314));

        // Gradient runs from the top color to the bottom color
        assert_eq!(canvas.get(150, 0), Some(SIDEBAR_TOP));
        assert_eq!(canvas.get(150, 313), Some(SIDEBAR_BOTTOM));
        // Flag squares
        assert_eq!(canvas.get(20, 100), Some(FLAG_COLORS[0]));
        assert_eq!(canvas.get(42, 100), Some(FLAG_COLORS[1]));
        assert_eq!(canvas.get(20, 122), Some(FLAG_COLORS[2]));
        assert_eq!(canvas.get(61, 141), Some(FLAG_COLORS[3]));
        // Gap between squares keeps the gradient
        assert_ne!(canvas.get(40, 100), Some(FLAG_COLORS[0]));
        assert_ne!(canvas.get(40, 100), Some(FLAG_COLORS[1]));
        // Numerals: bars at the edges of the box, gap in between
        assert_eq!(canvas.get(10, 66), Some(Rgb::new(255, 220, 0)));
        assert_ne!(canvas.get(16, 66), Some(Rgb::new(255, 220, 0)));
        assert_eq!(canvas.get(23, 66), Some(Rgb::new(255, 220, 0)));
        // Footer rules
        assert_eq!(canvas.get(10, 274), Some(Rgb::new(200, 200, 255)));
        assert_eq!(canvas.get(139, 279), Some(Rgb::new(200, 200, 255)));
    }

    #[test]
    fn test_header_layout() {
        let canvas = header().unwrap();
        assert_eq!(canvas.dimensions(), (500, 58));

        assert_eq!(canvas.get(0, 0), Some(HEADER_FRAME));
        assert_eq!(canvas.get(3, 30), Some(HEADER_FRAME));
        assert_eq!(canvas.get(496, 30), Some(HEADER_FRAME));
        assert_eq!(canvas.get(250, 54), Some(HEADER_FRAME));
        assert_eq!(canvas.get(4, 4), Some(HEADER_BACKGROUND));
        assert_eq!(canvas.get(20, 15), Some(Rgb::BLACK));
        assert_eq!(canvas.get(219, 26), Some(Rgb::BLACK));
        assert_eq!(canvas.get(100, 20), Some(HEADER_BACKGROUND));
    }
}
