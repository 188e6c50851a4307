//! Main application entry point.

use clap::Parser;
use linesmith_app::{App, AppConfig, AppError, load_script};
use linesmith_core::EditorConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Replay a Linesmith event script and export the drawing as an SVG data URI.
#[derive(Debug, Parser)]
#[command(name = "linesmith", version, about)]
struct Args {
    /// Editor configuration file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Event script to replay (JSON array of steps).
    #[arg(long)]
    script: Option<PathBuf>,
    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,
    /// Canvas height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,
    /// Write the data URI to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also write the last rendered frame as an SVG file.
    #[arg(long)]
    frame: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let editor = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let config = AppConfig {
        width: args.width,
        height: args.height,
        editor,
        ..AppConfig::default()
    };
    log::info!("Starting {} ({}x{})", config.title, config.width, config.height);

    let mut app = App::with_config(config);
    if let Some(path) = &args.script {
        let steps = load_script(path)?;
        app.run_script(&steps);
    }

    let uri = app.export();
    match &args.out {
        Some(path) => {
            std::fs::write(path, &uri)?;
            log::info!("Wrote export to {}", path.display());
        }
        None => println!("{uri}"),
    }
    if let Some(path) = &args.frame {
        app.renderer().write_frame(path)?;
    }
    Ok(())
}
