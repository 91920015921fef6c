//! Block letters described as primitives in fractional canvas coordinates.
//!
//! Every supported letter is an entry in [`GLYPHS`]; [`paint_glyph`] is the
//! only code that turns primitives into pixels. A coordinate of `0.5` is the
//! middle of the canvas whatever its size, so glyphs scale with the icon.

use log::debug;

use super::canvas::{Canvas, Rect};
use super::color::Pixel;

/// Stroke width shared by every glyph, as a fraction of the canvas size.
pub const STROKE: f64 = 0.125;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Filled rectangle: left, top, width, height.
    Bar { x: f64, y: f64, w: f64, h: f64 },
    /// Segment from `from` to `to`, stamped as one horizontal span of
    /// `thickness` per row, centred on the segment.
    Stroke {
        from: (f64, f64),
        to: (f64, f64),
        thickness: f64,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Glyph {
    pub symbol: char,
    pub primitives: &'static [Primitive],
}

const fn bar(x: f64, y: f64, w: f64, h: f64) -> Primitive {
    Primitive::Bar { x, y, w, h }
}

const fn stroke(from: (f64, f64), to: (f64, f64)) -> Primitive {
    Primitive::Stroke {
        from,
        to,
        thickness: STROKE,
    }
}

pub const GLYPHS: &[Glyph] = &[
    // Three vertical bars joined along the bottom
    Glyph {
        symbol: 'W',
        primitives: &[
            bar(0.1875, 0.1875, STROKE, 0.5625),
            bar(0.4375, 0.1875, STROKE, 0.5625),
            bar(0.6875, 0.1875, STROKE, 0.5625),
            bar(0.1875, 0.6875, 0.3125, 0.0625),
            bar(0.5, 0.6875, 0.3125, 0.0625),
        ],
    },
    // Two crossing diagonals
    Glyph {
        symbol: 'X',
        primitives: &[
            stroke((0.25, 0.1875), (0.75, 0.8125)),
            stroke((0.75, 0.1875), (0.25, 0.8125)),
        ],
    },
    // Stem with a closed bowl on the upper half
    Glyph {
        symbol: 'P',
        primitives: &[
            bar(0.25, 0.1875, STROKE, 0.625),
            bar(0.25, 0.1875, 0.5, STROKE),
            bar(0.25, 0.4375, 0.5, STROKE),
            bar(0.625, 0.1875, STROKE, 0.375),
        ],
    },
    // Two diagonals meeting at the apex plus a crossbar
    Glyph {
        symbol: 'A',
        primitives: &[
            stroke((0.5, 0.1875), (0.25, 0.8125)),
            stroke((0.5, 0.1875), (0.75, 0.8125)),
            bar(0.3125, 0.5625, 0.375, 0.09375),
        ],
    },
    // Rectangular ring
    Glyph {
        symbol: 'O',
        primitives: &[
            bar(0.25, 0.1875, STROKE, 0.625),
            bar(0.625, 0.1875, STROKE, 0.625),
            bar(0.25, 0.1875, 0.5, STROKE),
            bar(0.25, 0.6875, 0.5, STROKE),
        ],
    },
];

/// Looks up the glyph for `symbol`, ignoring ASCII case.
pub fn glyph_for(symbol: char) -> Option<&'static Glyph> {
    let symbol = symbol.to_ascii_uppercase();
    GLYPHS.iter().find(|g| g.symbol == symbol)
}

fn scale(fraction: f64, extent: u32) -> i64 {
    (fraction * extent as f64).round() as i64
}

/// Rasterises one primitive onto `canvas`.
pub fn paint_primitive<P: Pixel>(canvas: &mut Canvas<P>, primitive: &Primitive, color: P) {
    let (width, height) = canvas.dimensions();

    match *primitive {
        Primitive::Bar { x, y, w, h } => {
            let x0 = scale(x, width);
            let y0 = scale(y, height);
            let x1 = scale(x + w, width);
            let y1 = scale(y + h, height);
            if x1 > x0 && y1 > y0 {
                canvas.fill_rect(Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32), color);
            }
        }
        Primitive::Stroke {
            from,
            to,
            thickness,
        } => {
            let (fx, fy) = (from.0 * width as f64, from.1 * height as f64);
            let (tx, ty) = (to.0 * width as f64, to.1 * height as f64);
            let half = thickness * width as f64 / 2.0;

            let (top, bottom) = if fy <= ty {
                ((fx, fy), (tx, ty))
            } else {
                ((tx, ty), (fx, fy))
            };
            let y0 = top.1.round() as i64;
            let y1 = bottom.1.round() as i64;
            let span = (y1 - y0).max(1) as f64;

            for y in y0..y1.max(y0 + 1) {
                let t = (y - y0) as f64 / span;
                let cx = top.0 + t * (bottom.0 - top.0);
                let x0 = (cx - half).round() as i64;
                let x1 = (cx + half).round() as i64;
                for x in x0..x1 {
                    canvas.set(x, y, color);
                }
            }
        }
    }
}

/// Stamps `symbol` onto `canvas` in `color`. Returns `false`, leaving the
/// canvas untouched, when no glyph exists for the symbol.
pub fn paint_glyph<P: Pixel>(canvas: &mut Canvas<P>, symbol: char, color: P) -> bool {
    let Some(glyph) = glyph_for(symbol) else {
        debug!("No glyph for {:?}, leaving background only", symbol);
        return false;
    };

    for primitive in glyph.primitives {
        paint_primitive(canvas, primitive, color);
    }
    true
}
