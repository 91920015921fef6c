//! Fixed values of the three container formats.

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
pub const PNG_BIT_DEPTH: u8 = 8;
/// Truecolor with alpha.
pub const PNG_COLOR_TYPE_RGBA: u8 = 6;
pub const PNG_FILTER_NONE: u8 = 0;

pub const BMP_MAGIC: [u8; 2] = *b"BM";
pub const BMP_FILE_HEADER_SIZE: u32 = 14;
pub const BMP_INFO_HEADER_SIZE: u32 = 40;
pub const BMP_PIXEL_OFFSET: u32 = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE;
pub const BMP_BITS_PER_PIXEL: u16 = 24;
/// BI_RGB
pub const BMP_COMPRESSION_NONE: u32 = 0;
/// 72 DPI expressed in pixels per metre.
pub const BMP_RESOLUTION: i32 = 2835;

pub const ICO_HEADER_SIZE: u32 = 6;
pub const ICO_ENTRY_SIZE: u32 = 16;
pub const ICO_TYPE_ICON: u16 = 1;
pub const ICO_BIT_COUNT: u16 = 32;
pub const ICO_MAX_DIMENSION: u32 = 256;
