use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::{debug, error, info};
use thiserror::Error;

use crate::bytes::{ByteReadError, ByteReader, ByteWriter};
use crate::constants::{PNG_BIT_DEPTH, PNG_COLOR_TYPE_RGBA, PNG_FILTER_NONE, PNG_SIGNATURE};
use crate::raster::{Canvas, Pixel, Rgba};

pub const IHDR: [u8; 4] = *b"IHDR";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

/// PNG caps width, height and chunk lengths at 2^31 - 1.
const PNG_MAX_VALUE: u32 = i32::MAX as u32;

#[derive(Error, Debug)]
pub enum PngError {
    #[error("Failed to compress scanlines: {0}")]
    Compression(#[from] std::io::Error),
    #[error("Value {0} exceeds the PNG limit of 2^31 - 1")]
    TooLarge(usize),
}

#[derive(Error, Debug)]
pub enum PngDecodeError {
    #[error("Missing PNG signature")]
    InvalidSignature,
    #[error("Truncated chunk")]
    Truncated(#[from] ByteReadError),
    #[error("CRC mismatch in {kind} chunk: stored {stored:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        kind: String,
        stored: u32,
        computed: u32,
    },
    #[error("Expected IHDR chunk, found {0}")]
    MissingHeader(String),
    #[error("IHDR payload must be 13 bytes, got {0}")]
    InvalidHeaderLength(usize),
}

/// A single PNG chunk: type tag and payload. The CRC is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: [u8; 4],
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(kind: [u8; 4], data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    pub fn kind_str(&self) -> String {
        String::from_utf8_lossy(&self.kind).into_owned()
    }

    /// CRC32 over the type tag followed by the payload.
    pub fn crc(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&self.kind);
        hasher.update(&self.data);
        hasher.finalize()
    }

    /// Length, type, payload, CRC.
    pub fn write_to(&self, out: &mut ByteWriter) -> Result<(), PngError> {
        if self.data.len() > PNG_MAX_VALUE as usize {
            return Err(PngError::TooLarge(self.data.len()));
        }
        out.put_u32_be(self.data.len() as u32)
            .put_bytes(&self.kind)
            .put_bytes(&self.data)
            .put_u32_be(self.crc());
        Ok(())
    }

    /// Reads one chunk and checks its CRC.
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, PngDecodeError> {
        let length = reader.read_u32_be()? as usize;
        let kind = reader.read_tag()?;
        let data = reader.read_bytes(length)?.to_vec();
        let stored = reader.read_u32_be()?;

        let chunk = Chunk::new(kind, data);
        let computed = chunk.crc();
        if stored != computed {
            error!("CRC mismatch in {} chunk", chunk.kind_str());
            return Err(PngDecodeError::CrcMismatch {
                kind: chunk.kind_str(),
                stored,
                computed,
            });
        }
        Ok(chunk)
    }
}

/// IHDR payload. Compression, filter and interlace methods are always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression: u8,
    pub filter: u8,
    pub interlace: u8,
}

impl ImageHeader {
    pub const SIZE: usize = 13;

    pub fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: PNG_BIT_DEPTH,
            color_type: PNG_COLOR_TYPE_RGBA,
            compression: 0,
            filter: 0,
            interlace: 0,
        }
    }

    pub fn to_chunk(&self) -> Chunk {
        let mut data = ByteWriter::with_capacity(Self::SIZE);
        data.put_u32_be(self.width)
            .put_u32_be(self.height)
            .put_u8(self.bit_depth)
            .put_u8(self.color_type)
            .put_u8(self.compression)
            .put_u8(self.filter)
            .put_u8(self.interlace);
        Chunk::new(IHDR, data.into_inner())
    }

    pub fn from_chunk(chunk: &Chunk) -> Result<Self, PngDecodeError> {
        if chunk.kind != IHDR {
            return Err(PngDecodeError::MissingHeader(chunk.kind_str()));
        }
        if chunk.data.len() != Self::SIZE {
            return Err(PngDecodeError::InvalidHeaderLength(chunk.data.len()));
        }

        let mut reader = ByteReader::new(&chunk.data);
        Ok(Self {
            width: reader.read_u32_be()?,
            height: reader.read_u32_be()?,
            bit_depth: reader.read_u8()?,
            color_type: reader.read_u8()?,
            compression: reader.read_u8()?,
            filter: reader.read_u8()?,
            interlace: reader.read_u8()?,
        })
    }
}

/// Raw scanlines: each row prefixed by the "none" filter byte.
pub fn scanlines(canvas: &Canvas<Rgba>) -> Vec<u8> {
    let row_len = 1 + canvas.width() as usize * Rgba::CHANNELS;
    let mut raw = Vec::with_capacity(row_len * canvas.height() as usize);
    for row in canvas.rows() {
        raw.push(PNG_FILTER_NONE);
        for pixel in row {
            pixel.write_channels(&mut raw);
        }
    }
    raw
}

/// Serialises an RGBA canvas as signature, IHDR, one IDAT and IEND.
///
/// # Errors
/// - `PngError::TooLarge` if a dimension or the compressed stream exceeds 2^31 - 1
/// - `PngError::Compression` if the zlib stream cannot be finished
pub fn encode(canvas: &Canvas<Rgba>) -> Result<Vec<u8>, PngError> {
    info!("Starting PNG encoding");

    let (width, height) = canvas.dimensions();
    for dimension in [width, height] {
        if dimension > PNG_MAX_VALUE {
            return Err(PngError::TooLarge(dimension as usize));
        }
    }

    let raw = scanlines(canvas);
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;
    let compressed = encoder.finish()?;
    debug!(
        "Scanlines compressed: {} bytes -> {} bytes",
        raw.len(),
        compressed.len()
    );

    let chunks = [
        ImageHeader::rgba8(width, height).to_chunk(),
        Chunk::new(IDAT, compressed),
        Chunk::new(IEND, Vec::new()),
    ];

    let mut out = ByteWriter::new();
    out.put_bytes(&PNG_SIGNATURE);
    for chunk in &chunks {
        chunk.write_to(&mut out)?;
        debug!(
            "{} chunk written: {} bytes, crc {:#010x}",
            chunk.kind_str(),
            chunk.data.len(),
            chunk.crc()
        );
    }

    info!(
        "PNG encoding completed: {}x{}, {} bytes",
        width,
        height,
        out.len()
    );
    Ok(out.into_inner())
}

/// Splits a PNG stream into its chunks, verifying the signature and every CRC.
pub fn read_chunks(encoded: &[u8]) -> Result<Vec<Chunk>, PngDecodeError> {
    if !encoded.starts_with(&PNG_SIGNATURE) {
        error!("Invalid format or missing PNG signature");
        return Err(PngDecodeError::InvalidSignature);
    }

    let mut reader = ByteReader::new(&encoded[PNG_SIGNATURE.len()..]);
    let mut chunks = Vec::new();
    while !reader.is_at_end() {
        let chunk = Chunk::read(&mut reader)?;
        debug!(
            "Read {} chunk: {} bytes",
            chunk.kind_str(),
            chunk.data.len()
        );
        let last = chunk.kind == IEND;
        chunks.push(chunk);
        if last {
            break;
        }
    }
    Ok(chunks)
}

/// Reads the IHDR fields, which must come first.
pub fn read_header(encoded: &[u8]) -> Result<ImageHeader, PngDecodeError> {
    let chunks = read_chunks(encoded)?;
    let first = chunks
        .first()
        .ok_or_else(|| PngDecodeError::MissingHeader("nothing".to_string()))?;
    ImageHeader::from_chunk(first)
}
