//! Block shapes stamped at fixed pixel offsets.

use super::canvas::{Canvas, Rect};
use super::color::Pixel;

/// Paints a border of `thickness` pixels along all four edges.
pub fn frame<P: Pixel>(canvas: &mut Canvas<P>, thickness: u32, color: P) {
    let (width, height) = canvas.dimensions();
    let t = thickness.min(width).min(height);

    canvas.fill_rect(Rect::new(0, 0, width, t), color);
    canvas.fill_rect(Rect::new(0, (height - t) as i64, width, t), color);
    canvas.fill_rect(Rect::new(0, 0, t, height), color);
    canvas.fill_rect(Rect::new((width - t) as i64, 0, t, height), color);
}

/// Stand-in for a line of text: a one-pixel rule along the top and bottom of
/// `area`, plus one-pixel vertical ticks every `tick_step` columns when given.
pub fn text_placeholder<P: Pixel>(
    canvas: &mut Canvas<P>,
    area: Rect,
    tick_step: Option<u32>,
    color: P,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    canvas.fill_rect(Rect::new(area.x, area.y, area.width, 1), color);
    canvas.fill_rect(Rect::new(area.x, area.bottom() - 1, area.width, 1), color);

    if let Some(step) = tick_step.filter(|&s| s > 0) {
        for dx in (0..area.width).step_by(step as usize) {
            canvas.fill_rect(Rect::new(area.x + dx as i64, area.y, 1, area.height), color);
        }
    }
}

/// Fills the columns of `area` for which `keep(column)` holds, `column`
/// being relative to the area's left edge.
pub fn bars<P: Pixel, F>(canvas: &mut Canvas<P>, area: Rect, color: P, keep: F)
where
    F: Fn(u32) -> bool,
{
    for dx in (0..area.width).filter(|&dx| keep(dx)) {
        canvas.fill_rect(Rect::new(area.x + dx as i64, area.y, 1, area.height), color);
    }
}

/// Four `square`-sized squares in a 2x2 grid with `gap` pixels between them.
/// `colors` are in reading order: top-left, top-right, bottom-left,
/// bottom-right.
pub fn flag<P: Pixel>(
    canvas: &mut Canvas<P>,
    origin: (i64, i64),
    square: u32,
    gap: u32,
    colors: [P; 4],
) {
    let step = (square + gap) as i64;
    let offsets = [(0, 0), (step, 0), (0, step), (step, step)];

    for ((dx, dy), color) in offsets.into_iter().zip(colors) {
        canvas.fill_rect(
            Rect::new(origin.0 + dx, origin.1 + dy, square, square),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::color::Rgb;

    fn count(canvas: &Canvas<Rgb>, color: Rgb) -> usize {
        canvas.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_frame_is_uniform() {
        let mut canvas = Canvas::filled(10, 8, Rgb::WHITE).unwrap();
        frame(&mut canvas, 2, Rgb::BLACK);

        // 6x4 interior survives
        assert_eq!(count(&canvas, Rgb::WHITE), 24);
        assert_eq!(canvas.get(1, 4), Some(Rgb::BLACK));
        assert_eq!(canvas.get(8, 4), Some(Rgb::BLACK));
        assert_eq!(canvas.get(4, 6), Some(Rgb::BLACK));
        assert_eq!(canvas.get(2, 2), Some(Rgb::WHITE));
        assert_eq!(canvas.get(7, 5), Some(Rgb::WHITE));
    }

    #[test]
    fn test_text_placeholder_with_ticks() {
        let mut canvas = Canvas::filled(12, 5, Rgb::BLACK).unwrap();
        text_placeholder(&mut canvas, Rect::new(1, 1, 10, 3), Some(5), Rgb::WHITE);

        // two rules of 10 plus ticks at columns 1 and 6 on the middle row
        assert_eq!(count(&canvas, Rgb::WHITE), 22);
        assert_eq!(canvas.get(1, 2), Some(Rgb::WHITE));
        assert_eq!(canvas.get(6, 2), Some(Rgb::WHITE));
        assert_eq!(canvas.get(2, 2), Some(Rgb::BLACK));
        assert_eq!(canvas.get(10, 3), Some(Rgb::WHITE));
        assert_eq!(canvas.get(11, 3), Some(Rgb::BLACK));
    }

    #[test]
    fn test_bars() {
        let mut canvas = Canvas::filled(6, 2, Rgb::BLACK).unwrap();
        let keep = |dx: u32| !(1..=3).contains(&dx);
        bars(&mut canvas, Rect::new(0, 0, 6, 2), Rgb::WHITE, keep);

        let (w, b) = (Rgb::WHITE, Rgb::BLACK);
        assert_eq!(canvas.rows().next().unwrap(), &[w, b, b, b, w, w]);
    }

    #[test]
    fn test_flag_layout() {
        let red = Rgb::new(255, 0, 0);
        let green = Rgb::new(0, 170, 0);
        let blue = Rgb::new(0, 0, 255);
        let yellow = Rgb::new(255, 220, 0);

        let mut canvas = Canvas::filled(10, 10, Rgb::BLACK).unwrap();
        flag(&mut canvas, (1, 1), 3, 2, [red, green, blue, yellow]);

        assert_eq!(canvas.get(1, 1), Some(red));
        assert_eq!(canvas.get(3, 3), Some(red));
        assert_eq!(canvas.get(4, 1), Some(Rgb::BLACK));
        assert_eq!(canvas.get(6, 1), Some(green));
        assert_eq!(canvas.get(1, 6), Some(blue));
        assert_eq!(canvas.get(8, 8), Some(yellow));
        assert_eq!(count(&canvas, red), 9);
    }
}
