use super::canvas::{Canvas, CanvasError, Rect};
use super::color::Pixel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// `t = row / height`
    Vertical,
    /// `t = column / width`
    Horizontal,
}

/// Builds a `width`x`height` canvas holding a linear gradient from `from` to `to`.
pub fn linear_gradient<P: Pixel>(
    width: u32,
    height: u32,
    from: P,
    to: P,
    axis: Axis,
) -> Result<Canvas<P>, CanvasError> {
    let mut canvas = Canvas::filled(width, height, from)?;
    paint_gradient(&mut canvas, Rect::new(0, 0, width, height), from, to, axis);
    Ok(canvas)
}

/// Paints a gradient over `area`. Positions are measured from the area's
/// origin, so the first row (or column) is exactly `from`.
pub fn paint_gradient<P: Pixel>(canvas: &mut Canvas<P>, area: Rect, from: P, to: P, axis: Axis) {
    let extent = match axis {
        Axis::Vertical => area.height,
        Axis::Horizontal => area.width,
    };
    if extent == 0 {
        return;
    }

    canvas.map(|x, y, current| {
        let (x, y) = (x as i64, y as i64);
        if x < area.x || x >= area.right() || y < area.y || y >= area.bottom() {
            return current;
        }
        let position = match axis {
            Axis::Vertical => y - area.y,
            Axis::Horizontal => x - area.x,
        };
        from.lerp(&to, position as f64 / extent as f64)
    });
}
