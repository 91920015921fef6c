use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use lib_art::{AssetManifest, AssetPipeline};
use log::{error, info, LevelFilter};

/// Generates the suite's application icons, icon container and installer bitmaps.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Root directory the icon and installer directories are created under
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// JSON manifest describing the asset set; the built-in suite when omitted
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn load_manifest(path: Option<&PathBuf>) -> anyhow::Result<AssetManifest> {
    match path {
        Some(path) => AssetManifest::from_file(path)
            .with_context(|| format!("failed to load manifest {}", path.display())),
        None => Ok(AssetManifest::default()),
    }
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let manifest = load_manifest(args.manifest.as_ref())?;
    let pipeline =
        AssetPipeline::new(manifest, &args.out).context("the asset manifest is invalid")?;
    info!(
        "{} application icons, container from {:?}",
        pipeline.manifest().apps.len(),
        pipeline.manifest().primary
    );

    let report = pipeline.run();
    for failure in &report.failures {
        error!("{}: {}", failure.path.display(), failure.error);
    }

    if report.is_success() {
        info!("All {} assets created successfully.", report.written.len());
    }
    Ok(report.is_success())
}

fn main() -> ExitCode {
    let args = Args::parse();
    lib_art::init_logging(level_for(args.verbose));

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
