mod app;
mod app_dir;
mod display;
mod error;
mod input;
mod preferences;
mod render_bridge;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use quadzoom_core::Complex;

use app::SessionConfig;
use preferences::Preferences;
use render_bridge::FractalMode;

/// Zoom into the Mandelbrot set (or a Julia set) one 3×3 quadrant at a time.
///
/// Keys, one per character or one named key per line:
///   w x c / q s d / a z e   zoom into a quadrant (top row first)
///   o                       zoom out
///   i <n>                   set the iteration cap
///   + or up, - or down      raise or lower the cap by one
///   m                       save the current frame
///   esc, quit, end of input quit
#[derive(Parser, Debug)]
#[command(name = "quadzoom", version, allow_negative_numbers = true, verbatim_doc_comment)]
struct Cli {
    /// Real part of the Julia parameter; enables Julia mode
    #[arg(requires = "jy")]
    jx: Option<f64>,

    /// Imaginary part of the Julia parameter
    jy: Option<f64>,

    /// Explore a Julia set (c = 0 unless JX JY are given)
    #[arg(long)]
    julia: bool,

    /// Side of the square frame in pixels
    #[arg(long)]
    dim: Option<u32>,

    /// Initial iteration cap
    #[arg(short = 'n', long)]
    iterations: Option<u32>,

    /// Start from a recorded command history, e.g. "SSWO"
    #[arg(long, value_name = "SEQ")]
    replay: Option<String>,

    /// Preview image rewritten on every refresh
    #[arg(long, value_name = "PATH")]
    preview: Option<PathBuf>,

    /// Directory for saved frames
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

impl Cli {
    fn mode(&self) -> FractalMode {
        match (self.jx, self.jy) {
            (Some(re), Some(im)) => FractalMode::Julia(Complex::new(re, im)),
            _ if self.julia => FractalMode::Julia(Complex::ZERO),
            _ => FractalMode::Mandelbrot,
        }
    }

    /// Merge flags over stored preferences.
    fn into_config(self, prefs: &Preferences) -> SessionConfig {
        SessionConfig {
            mode: self.mode(),
            dim: self.dim.unwrap_or(prefs.dim),
            max_iterations: self.iterations.unwrap_or(prefs.max_iterations),
            replay: self.replay,
            preview_path: self.preview.unwrap_or_else(|| prefs.preview_path()),
            output_dir: self.output_dir.unwrap_or_else(|| prefs.output_dir()),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Starting QuadZoom");

    let prefs = Preferences::load();
    let config = cli.into_config(&prefs);

    match app::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
