mod app;
mod capture;
mod config;
mod hotkey;
mod notify;

use anyhow::{Context, anyhow};
use capture::{CaptureMode, CaptureOutcome, CapturePipeline};
use clap::{Parser, ValueEnum};
use config::ConfigStore;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CaptureArg {
    /// Capture the entire screen.
    FullScreen,
    /// Drag out a rectangular region.
    Region,
}

impl From<CaptureArg> for CaptureMode {
    fn from(arg: CaptureArg) -> Self {
        match arg {
            CaptureArg::FullScreen => CaptureMode::FullScreen,
            CaptureArg::Region => CaptureMode::Region,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "shutterbar")]
#[command(version, about = "Menu-bar screenshot utility for macOS")]
struct Cli {
    /// Take a single screenshot and exit instead of running the menu bar app
    #[arg(long, value_enum, value_name = "MODE")]
    capture: Option<CaptureArg>,

    /// Output folder for --capture, overriding the configured one
    #[arg(long, value_name = "DIR", requires = "capture")]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if let Some(mode) = cli.capture {
        return capture_once(mode.into(), cli.output);
    }

    run_app()
}

/// One-shot capture for scripting. Errors go to the log instead of the
/// notification center.
fn capture_once(mode: CaptureMode, output: Option<PathBuf>) -> anyhow::Result<()> {
    let folder = match output {
        Some(folder) => folder,
        None => {
            let store = ConfigStore::new().context("Failed to locate config file")?;
            let (prefs, err) = store.load_or_default();
            if let Some(err) = err {
                log::warn!("Using default output folder: {}", err);
            }
            prefs.output_folder
        }
    };

    capture::file::ensure_folder_exists(&folder)?;

    let pipeline = CapturePipeline::new(Arc::new(notify::LogNotifier));
    match pipeline.run(mode, &folder) {
        CaptureOutcome::Completed(path) => {
            println!("{}", path.display());
            Ok(())
        }
        CaptureOutcome::Cancelled => {
            info!("Capture cancelled");
            Ok(())
        }
        CaptureOutcome::Failed(message) => Err(anyhow!(message)),
    }
}

#[cfg(target_os = "macos")]
fn run_app() -> anyhow::Result<()> {
    app::run()
}

#[cfg(not(target_os = "macos"))]
fn run_app() -> anyhow::Result<()> {
    Err(anyhow!(
        "The menu bar app requires macOS; use --capture for a one-shot screenshot"
    ))
}
