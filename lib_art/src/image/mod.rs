pub mod bmp;
pub mod ico;
pub mod png;

pub use bmp::{BitmapHeader, BmpEncoder, BmpError};
pub use ico::{IcoError, IconDirEntry};
pub use png::{Chunk, ImageHeader, PngError};
