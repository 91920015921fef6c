//! Single-entry ICO files carrying one PNG payload.

use log::{debug, error, info};
use thiserror::Error;

use crate::bytes::{ByteReadError, ByteReader, ByteWriter};
use crate::constants::{
    ICO_BIT_COUNT, ICO_ENTRY_SIZE, ICO_HEADER_SIZE, ICO_MAX_DIMENSION, ICO_TYPE_ICON,
};
use crate::image::png;

#[derive(Error, Debug)]
pub enum IcoError {
    #[error("Icon dimensions {width}x{height} exceed 256x256")]
    ImageTooLarge { width: u32, height: u32 },
    #[error("Embedded payload is not a PNG image")]
    NotPng(#[from] png::PngDecodeError),
    #[error("Embedded payload of {0} bytes does not fit a 32-bit length")]
    PayloadTooLarge(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IcoDecodeError {
    #[error("Not an icon file: reserved {reserved}, type {kind}")]
    InvalidHeader { reserved: u16, kind: u16 },
    #[error("Expected exactly one image, found {0}")]
    UnexpectedImageCount(u16),
    #[error("Truncated icon data")]
    Truncated(#[from] ByteReadError),
    #[error("Payload at offset {offset} with length {length} exceeds file size {file_size}")]
    PayloadOutOfBounds {
        offset: u32,
        length: u32,
        file_size: usize,
    },
}

/// Offset of the payload in a single-entry icon file.
pub const SINGLE_ENTRY_OFFSET: u32 = ICO_HEADER_SIZE + ICO_ENTRY_SIZE;

/// Dimensions are stored in one byte each, 0 meaning 256.
fn dimension_byte(value: u32) -> u8 {
    if value >= ICO_MAX_DIMENSION {
        0
    } else {
        value as u8
    }
}

fn dimension_from_byte(value: u8) -> u32 {
    if value == 0 {
        ICO_MAX_DIMENSION
    } else {
        value as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconDirEntry {
    pub width: u32,
    pub height: u32,
    pub palette_size: u8,
    pub planes: u16,
    pub bit_count: u16,
    pub length: u32,
    pub offset: u32,
}

impl IconDirEntry {
    pub fn encode(&self, out: &mut ByteWriter) {
        out.put_u8(dimension_byte(self.width))
            .put_u8(dimension_byte(self.height))
            .put_u8(self.palette_size)
            .put_u8(0)
            .put_u16_le(self.planes)
            .put_u16_le(self.bit_count)
            .put_u32_le(self.length)
            .put_u32_le(self.offset);
    }

    pub fn decode(reader: &mut ByteReader<'_>) -> Result<Self, IcoDecodeError> {
        let width = dimension_from_byte(reader.read_u8()?);
        let height = dimension_from_byte(reader.read_u8()?);
        let palette_size = reader.read_u8()?;
        reader.read_u8()?;

        Ok(Self {
            width,
            height,
            palette_size,
            planes: reader.read_u16_le()?,
            bit_count: reader.read_u16_le()?,
            length: reader.read_u32_le()?,
            offset: reader.read_u32_le()?,
        })
    }
}

/// Wraps an already-encoded PNG in an icon file. Dimensions, length and offset
/// all come from `png_bytes` itself.
///
/// # Errors
/// - `IcoError::NotPng` if `png_bytes` is not a well-formed PNG
/// - `IcoError::ImageTooLarge` if either dimension exceeds 256
pub fn wrap_png(png_bytes: &[u8]) -> Result<Vec<u8>, IcoError> {
    info!("Starting ICO wrapping");

    let header = png::read_header(png_bytes)?;
    if header.width > ICO_MAX_DIMENSION || header.height > ICO_MAX_DIMENSION {
        error!(
            "Icon dimensions {}x{} exceed the directory entry range",
            header.width, header.height
        );
        return Err(IcoError::ImageTooLarge {
            width: header.width,
            height: header.height,
        });
    }
    let length =
        u32::try_from(png_bytes.len()).map_err(|_| IcoError::PayloadTooLarge(png_bytes.len()))?;

    let entry = IconDirEntry {
        width: header.width,
        height: header.height,
        palette_size: 0,
        planes: 1,
        bit_count: ICO_BIT_COUNT,
        length,
        offset: SINGLE_ENTRY_OFFSET,
    };
    debug!("Directory entry: {:?}", entry);

    let mut out = ByteWriter::with_capacity(SINGLE_ENTRY_OFFSET as usize + png_bytes.len());
    out.put_u16_le(0).put_u16_le(ICO_TYPE_ICON).put_u16_le(1);
    entry.encode(&mut out);
    out.put_bytes(png_bytes);

    info!("ICO wrapping completed: {} bytes", out.len());
    Ok(out.into_inner())
}

/// Reads a single-entry icon file, returning its directory entry and the
/// payload slice it points at.
pub fn read_single(encoded: &[u8]) -> Result<(IconDirEntry, &[u8]), IcoDecodeError> {
    let mut reader = ByteReader::new(encoded);
    let reserved = reader.read_u16_le()?;
    let kind = reader.read_u16_le()?;
    if reserved != 0 || kind != ICO_TYPE_ICON {
        error!("Invalid format or icon header");
        return Err(IcoDecodeError::InvalidHeader { reserved, kind });
    }
    let count = reader.read_u16_le()?;
    if count != 1 {
        return Err(IcoDecodeError::UnexpectedImageCount(count));
    }

    let entry = IconDirEntry::decode(&mut reader)?;
    let start = entry.offset as usize;
    let end = start.checked_add(entry.length as usize);
    match end {
        Some(end) if end <= encoded.len() => Ok((entry, &encoded[start..end])),
        _ => Err(IcoDecodeError::PayloadOutOfBounds {
            offset: entry.offset,
            length: entry.length,
            file_size: encoded.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PNG_SIGNATURE;
    use crate::image::png::encode as encode_png;
    use crate::raster::{Canvas, Rgba};

    fn png_of(size: u32) -> Vec<u8> {
        encode_png(&Canvas::filled(size, size, Rgba::WHITE).unwrap()).unwrap()
    }

    #[test]
    fn test_dimension_bytes() {
        assert_eq!(dimension_byte(64), 64);
        assert_eq!(dimension_byte(255), 255);
        assert_eq!(dimension_byte(256), 0);
        assert_eq!(dimension_from_byte(0), 256);
    }

    #[test]
    fn test_wrap_layout() {
        let payload = png_of(64);
        let icon = wrap_png(&payload).unwrap();

        assert_eq!(&icon[..6], &[0, 0, 1, 0, 1, 0]);
        assert_eq!(&icon[6..14], &[64, 64, 0, 0, 1, 0, 32, 0]);
        assert_eq!(&icon[14..18], &(payload.len() as u32).to_le_bytes());
        assert_eq!(&icon[18..22], &[22, 0, 0, 0]);
        assert_eq!(&icon[22..], payload.as_slice());
    }

    #[test]
    fn test_read_single() {
        let payload = png_of(32);
        let icon = wrap_png(&payload).unwrap();
        let (entry, embedded) = read_single(&icon).unwrap();

        assert_eq!(entry.offset, 22);
        assert_eq!(entry.length as usize, payload.len());
        assert_eq!(entry.width, 32);
        assert_eq!(embedded, payload.as_slice());
        assert!(embedded.starts_with(&PNG_SIGNATURE));
    }

    #[test]
    fn test_full_size_icon_stores_zero() {
        let icon = wrap_png(&png_of(256)).unwrap();
        assert_eq!(&icon[6..8], &[0, 0]);
        assert_eq!(read_single(&icon).unwrap().0.width, 256);
    }

    #[test]
    fn test_rejects_large_and_non_png() {
        let large = encode_png(&Canvas::filled(257, 1, Rgba::WHITE).unwrap()).unwrap();
        assert!(matches!(
            wrap_png(&large),
            Err(IcoError::ImageTooLarge {
                width: 257,
                height: 1
            })
        ));
        assert!(matches!(wrap_png(b"BM...."), Err(IcoError::NotPng(_))));
    }

    #[test]
    fn test_truncated_payload_detected() {
        let icon = wrap_png(&png_of(16)).unwrap();
        assert!(matches!(
            read_single(&icon[..icon.len() - 1]),
            Err(IcoDecodeError::PayloadOutOfBounds { offset: 22, .. })
        ));
    }
}
