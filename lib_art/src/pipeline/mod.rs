//! Builds the named asset set and writes it under an output root.

pub mod manifest;
pub mod skins;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use rayon::prelude::*;
use thiserror::Error;

use crate::image::{bmp, ico, png};
use crate::raster::{app_icon, CanvasError};

pub use manifest::{AppSpec, AssetManifest, ManifestError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    Png(#[from] png::PngError),

    #[error(transparent)]
    Bmp(#[from] bmp::BmpError),

    #[error(transparent)]
    Ico(#[from] ico::IcoError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    /// RGBA PNG icon for one application
    AppIcon(AppSpec),
    /// Single-entry ICO wrapping the primary application's icon
    IconContainer(AppSpec),
    /// 24-bit installer sidebar bitmap
    Sidebar,
    /// 24-bit installer header bitmap
    Header,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub kind: OutputKind,
    /// Path relative to the output root
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct OutputFailure {
    pub path: PathBuf,
    pub error: PipelineError,
}

/// Outcome of a run. Failed outputs never prevent the others from being
/// written.
#[derive(Debug, Default)]
pub struct RunReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<OutputFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct AssetPipeline {
    manifest: AssetManifest,
    output_root: PathBuf,
}

impl AssetPipeline {
    pub fn new(
        manifest: AssetManifest,
        output_root: impl Into<PathBuf>,
    ) -> Result<Self, PipelineError> {
        manifest.validate()?;
        Ok(Self {
            manifest,
            output_root: output_root.into(),
        })
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    /// Every output of a run, in a stable order.
    pub fn plan(&self) -> Vec<PlannedOutput> {
        let icon_dir = PathBuf::from(&self.manifest.icon_dir);
        let installer_dir = PathBuf::from(&self.manifest.installer_dir);

        let mut outputs: Vec<PlannedOutput> = self
            .manifest
            .apps
            .iter()
            .map(|app| PlannedOutput {
                kind: OutputKind::AppIcon(app.clone()),
                path: icon_dir.join(format!("{}.png", app.id)),
            })
            .collect();

        if let Some(primary) = self.manifest.primary_app() {
            outputs.push(PlannedOutput {
                kind: OutputKind::IconContainer(primary.clone()),
                path: icon_dir.join(format!("{}.ico", primary.id)),
            });
        }

        outputs.push(PlannedOutput {
            kind: OutputKind::Sidebar,
            path: installer_dir.join("sidebar.bmp"),
        });
        outputs.push(PlannedOutput {
            kind: OutputKind::Header,
            path: installer_dir.join("header.bmp"),
        });

        outputs
    }

    /// Produces the encoded bytes of one output without touching the
    /// filesystem.
    pub fn render(&self, output: &PlannedOutput) -> Result<Vec<u8>, PipelineError> {
        let size = self.manifest.icon_size;

        let bytes = match &output.kind {
            OutputKind::AppIcon(app) => png::encode(&app_icon(size, app.color, app.letter)?)?,
            OutputKind::IconContainer(app) => {
                let payload = png::encode(&app_icon(size, app.color, app.letter)?)?;
                ico::wrap_png(&payload)?
            }
            OutputKind::Sidebar => bmp::encode(&skins::sidebar()?)?,
            OutputKind::Header => bmp::encode(&skins::header()?)?,
        };

        debug!("Rendered {}: {} bytes", output.path.display(), bytes.len());
        Ok(bytes)
    }

    /// Renders and writes every planned output. Outputs are independent, so
    /// they are processed in parallel.
    pub fn run(&self) -> RunReport {
        info!("Generating assets under {}", self.output_root.display());

        let results: Vec<(PathBuf, Result<(), PipelineError>)> = self
            .plan()
            .par_iter()
            .map(|output| {
                let path = self.output_root.join(&output.path);
                let result = self
                    .render(output)
                    .and_then(|bytes| write_atomically(&path, &bytes));
                (path, result)
            })
            .collect();

        let mut report = RunReport::default();
        for (path, result) in results {
            match result {
                Ok(()) => {
                    info!("Created {}", path.display());
                    report.written.push(path);
                }
                Err(err) => {
                    error!("Failed to create {}: {}", path.display(), err);
                    report.failures.push(OutputFailure { path, error: err });
                }
            }
        }

        info!(
            "{} outputs written, {} failed",
            report.written.len(),
            report.failures.len()
        );
        report
    }
}

/// Writes `bytes` to a temporary file beside `path`, then renames it into
/// place. The destination directory is created when missing. On failure the
/// previous content of `path`, if any, is left intact.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), PipelineError> {
    let io_error = |source: std::io::Error| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_error)?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(bytes).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}
