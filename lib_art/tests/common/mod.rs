#![allow(dead_code)]

use std::io::Cursor;

use lib_art::{Canvas, Rgb, Rgba};

pub const WORD_BLUE: Rgb = Rgb::new(43, 87, 154);
pub const ICON_SIZE: u32 = 64;

/// 4x4 RGBA grid with distinct values in every channel, including partial alpha.
pub fn checker_rgba() -> Canvas<Rgba> {
    let pixels = (0..16u8)
        .map(|i| {
            let alpha = if i % 2 == 0 { 255 } else { i * 10 };
            Rgba::new(i * 16, 255 - i * 16, i * 7, alpha)
        })
        .collect();
    Canvas::from_pixels(4, 4, pixels).unwrap()
}

/// RGB grid of `width`x`height` where every pixel encodes its coordinates.
pub fn coordinate_rgb(width: u32, height: u32) -> Canvas<Rgb> {
    let mut canvas = Canvas::filled(width, height, Rgb::BLACK).unwrap();
    canvas.map(|x, y, _| Rgb::new(x as u8, y as u8, (x ^ y) as u8));
    canvas
}

/// Decodes a PNG with the reference decoder, returning (width, height, color
/// type, bit depth, pixels).
pub fn decode_png(bytes: &[u8]) -> (u32, u32, png::ColorType, png::BitDepth, Vec<u8>) {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    (info.width, info.height, info.color_type, info.bit_depth, buf)
}

/// Decodes a BMP with the reference decoder into (width, height, RGB bytes).
pub fn decode_bmp(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Bmp).unwrap();
    let rgb = image.to_rgb8();
    (rgb.width(), rgb.height(), rgb.into_raw())
}
