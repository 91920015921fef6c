use log::{debug, error, info};
use thiserror::Error;

use crate::bytes::{ByteReadError, ByteReader, ByteWriter};
use crate::constants::{
    BMP_BITS_PER_PIXEL, BMP_COMPRESSION_NONE, BMP_INFO_HEADER_SIZE, BMP_MAGIC, BMP_PIXEL_OFFSET,
    BMP_RESOLUTION,
};
use crate::raster::{Canvas, Rgb};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BmpError {
    #[error("Unsupported bit depth {0}, only 24 bits per pixel is implemented")]
    UnsupportedBitDepth(u16),
    #[error("Image of {width}x{height} does not fit a 32-bit bitmap")]
    TooLarge { width: u32, height: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BmpDecodeError {
    #[error("Missing BM signature")]
    InvalidSignature,
    #[error("Truncated header")]
    Truncated(#[from] ByteReadError),
    #[error("Unsupported DIB header size {0}")]
    UnsupportedInfoHeader(u32),
}

/// Bytes per stored row: `width * bits / 8` rounded up to a multiple of 4.
pub fn row_size(width: u32, bits_per_pixel: u16) -> u64 {
    let bytes = (width as u64 * bits_per_pixel as u64).div_ceil(8);
    bytes.div_ceil(4) * 4
}

/// The 14-byte file header and the 40-byte BITMAPINFOHEADER.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    pub file_size: u32,
    pub pixel_offset: u32,
    pub width: i32,
    /// Negative for top-down row order.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_resolution: i32,
    pub y_resolution: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BitmapHeader {
    pub const SIZE: usize = BMP_PIXEL_OFFSET as usize;

    /// Header for an uncompressed top-down bitmap.
    pub fn top_down(width: u32, height: u32, bits_per_pixel: u16) -> Result<Self, BmpError> {
        let too_large = || BmpError::TooLarge { width, height };

        let image_size = row_size(width, bits_per_pixel)
            .checked_mul(height as u64)
            .filter(|&size| size + (BMP_PIXEL_OFFSET as u64) <= u32::MAX as u64)
            .ok_or_else(too_large)? as u32;
        let width = i32::try_from(width).map_err(|_| too_large())?;
        let height = i32::try_from(height).map_err(|_| too_large())?;

        Ok(Self {
            file_size: BMP_PIXEL_OFFSET + image_size,
            pixel_offset: BMP_PIXEL_OFFSET,
            width,
            height: -height,
            planes: 1,
            bits_per_pixel,
            compression: BMP_COMPRESSION_NONE,
            image_size,
            x_resolution: BMP_RESOLUTION,
            y_resolution: BMP_RESOLUTION,
            colors_used: 0,
            colors_important: 0,
        })
    }

    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    pub fn encode(&self, out: &mut ByteWriter) {
        // File header
        out.put_bytes(&BMP_MAGIC)
            .put_u32_le(self.file_size)
            .put_u16_le(0)
            .put_u16_le(0)
            .put_u32_le(self.pixel_offset);

        // DIB header
        out.put_u32_le(BMP_INFO_HEADER_SIZE)
            .put_i32_le(self.width)
            .put_i32_le(self.height)
            .put_u16_le(self.planes)
            .put_u16_le(self.bits_per_pixel)
            .put_u32_le(self.compression)
            .put_u32_le(self.image_size)
            .put_i32_le(self.x_resolution)
            .put_i32_le(self.y_resolution)
            .put_u32_le(self.colors_used)
            .put_u32_le(self.colors_important);
    }

    pub fn decode(encoded: &[u8]) -> Result<Self, BmpDecodeError> {
        if !encoded.starts_with(&BMP_MAGIC) {
            error!("Invalid format or missing BM signature");
            return Err(BmpDecodeError::InvalidSignature);
        }

        let mut reader = ByteReader::new(&encoded[BMP_MAGIC.len()..]);
        let file_size = reader.read_u32_le()?;
        reader.read_u16_le()?;
        reader.read_u16_le()?;
        let pixel_offset = reader.read_u32_le()?;

        let info_size = reader.read_u32_le()?;
        if info_size != BMP_INFO_HEADER_SIZE {
            return Err(BmpDecodeError::UnsupportedInfoHeader(info_size));
        }

        Ok(Self {
            file_size,
            pixel_offset,
            width: reader.read_i32_le()?,
            height: reader.read_i32_le()?,
            planes: reader.read_u16_le()?,
            bits_per_pixel: reader.read_u16_le()?,
            compression: reader.read_u32_le()?,
            image_size: reader.read_u32_le()?,
            x_resolution: reader.read_i32_le()?,
            y_resolution: reader.read_i32_le()?,
            colors_used: reader.read_u32_le()?,
            colors_important: reader.read_u32_le()?,
        })
    }
}

/// Uncompressed Windows bitmap writer.
#[derive(Debug, Clone, Copy)]
pub struct BmpEncoder {
    bits_per_pixel: u16,
}

impl BmpEncoder {
    /// # Errors
    /// - `BmpError::UnsupportedBitDepth` for anything but 24 bits per pixel
    pub fn new(bits_per_pixel: u16) -> Result<Self, BmpError> {
        if bits_per_pixel != BMP_BITS_PER_PIXEL {
            error!("Bitmap encoder configured with {} bpp", bits_per_pixel);
            return Err(BmpError::UnsupportedBitDepth(bits_per_pixel));
        }
        Ok(Self { bits_per_pixel })
    }

    /// Writes headers, then each row top to bottom as B, G, R triples
    /// zero-padded to the row size.
    pub fn encode(&self, canvas: &Canvas<Rgb>) -> Result<Vec<u8>, BmpError> {
        info!("Starting BMP encoding");

        let (width, height) = canvas.dimensions();
        let header = BitmapHeader::top_down(width, height, self.bits_per_pixel)?;
        let row_size = row_size(width, self.bits_per_pixel) as usize;
        let pixel_bytes = width as usize * 3;
        debug!(
            "Header written:\nSize: {}\nWidth: {}\nHeight: {}\nRow size: {}",
            header.file_size, header.width, header.height, row_size
        );

        let mut out = ByteWriter::with_capacity(header.file_size as usize);
        header.encode(&mut out);

        for row in canvas.rows() {
            for pixel in row {
                out.put_bytes(&[pixel.b, pixel.g, pixel.r]);
            }
            out.put_zeros(row_size - pixel_bytes);
        }

        debug_assert_eq!(out.len(), header.file_size as usize);
        info!(
            "BMP encoding completed: {}x{}, {} bytes",
            width,
            height,
            out.len()
        );
        Ok(out.into_inner())
    }
}

impl Default for BmpEncoder {
    fn default() -> Self {
        Self {
            bits_per_pixel: BMP_BITS_PER_PIXEL,
        }
    }
}

/// Encodes with the default 24-bit encoder.
pub fn encode(canvas: &Canvas<Rgb>) -> Result<Vec<u8>, BmpError> {
    BmpEncoder::default().encode(canvas)
}
