pub mod bytes;
pub mod constants;
pub mod image;
pub mod pipeline;
pub mod raster;

use log::*;
use std::io::Write;

pub use crate::image::{bmp, ico, png};
pub use crate::pipeline::{AssetManifest, AssetPipeline, RunReport};
pub use crate::raster::{Canvas, Rgb, Rgba};

/// Installs the `env_logger` backend. `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter(Some("lib_art"), level)
        .filter(Some("art_gen"), level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
