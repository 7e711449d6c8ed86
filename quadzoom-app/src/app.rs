use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use quadzoom_core::{Navigator, Overlay, Transition};
use quadzoom_render::{
    export_png, frame_file_name, ExportMetadata, FrameBuffer, Palette, RenderBuffer,
    RenderStats, OVERLAY_COLOR,
};

use crate::display::{Display, PreviewFile};
use crate::error::AppError;
use crate::input::{CommandSource, KeyboardSource};
use crate::render_bridge::{render_mode, FractalMode};

/// Everything fixed for one run, after preferences and flags are merged.
#[derive(Debug, Clone)]
pub(crate) struct SessionConfig {
    pub(crate) mode: FractalMode,
    pub(crate) dim: u32,
    pub(crate) max_iterations: u32,
    /// History string to start from instead of the initial view.
    pub(crate) replay: Option<String>,
    pub(crate) preview_path: PathBuf,
    pub(crate) output_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// Rendering context
// ---------------------------------------------------------------------------

/// Palette, shade frame, and RGBA surface, owned by the driver.
pub(crate) struct RenderContext {
    palette: Palette,
    frame: FrameBuffer,
    surface: RenderBuffer,
}

impl RenderContext {
    pub(crate) fn new(dim: u32) -> Self {
        Self {
            palette: Palette::classic(),
            frame: FrameBuffer::new(dim),
            surface: RenderBuffer::new(dim),
        }
    }

    pub(crate) fn dim(&self) -> u32 {
        self.frame.dim
    }

    /// Recompute every pixel for the navigator's current state and recolor
    /// the surface.
    pub(crate) fn recompute(&mut self, mode: FractalMode, navigator: &Navigator) -> RenderStats {
        let stats = render_mode(
            mode,
            navigator.viewport(),
            navigator.iteration_cap(),
            &mut self.frame,
        );
        self.palette.colorize_into(&self.frame, &mut self.surface);
        stats
    }

    /// Outline the region about to be zoomed into on the current surface.
    pub(crate) fn outline(&mut self, overlay: &Overlay) {
        self.surface.draw_square(overlay, OVERLAY_COLOR);
    }

    pub(crate) fn surface(&self) -> &RenderBuffer {
        &self.surface
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The driver loop: one command at a time, one full recompute per change.
pub(crate) struct Session<D> {
    navigator: Navigator,
    mode: FractalMode,
    context: RenderContext,
    display: D,
    output_dir: PathBuf,
}

impl<D: Display> Session<D> {
    pub(crate) fn new(
        navigator: Navigator,
        mode: FractalMode,
        dim: u32,
        display: D,
        output_dir: PathBuf,
    ) -> Result<Self, AppError> {
        if dim < 2 {
            return Err(AppError::InvalidDimension(dim));
        }
        Ok(Self {
            navigator,
            mode,
            context: RenderContext::new(dim),
            display,
            output_dir,
        })
    }

    pub(crate) fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Render the starting view, then consume commands until a quit.
    ///
    /// Returns the command history of the session.
    pub(crate) fn run<S: CommandSource>(&mut self, source: &mut S) -> Result<String, AppError> {
        self.refresh()?;
        loop {
            let command = source.next_command()?;
            match self.navigator.apply(command) {
                Transition::Recompute { focus } => {
                    if let Some(quadrant) = focus {
                        self.context.outline(&quadrant.overlay(self.context.dim()));
                        self.display.present(self.context.surface())?;
                    }
                    self.refresh()?;
                }
                Transition::Save => {
                    self.save_frame();
                }
                Transition::Quit => break,
            }
        }
        let history = self.navigator.history().to_string();
        info!("Sequence = {history}");
        Ok(history)
    }

    fn refresh(&mut self) -> Result<(), AppError> {
        self.context.recompute(self.mode, &self.navigator);
        self.display.present(self.context.surface())
    }

    /// Write the current frame to the output directory.
    ///
    /// Failures are reported and swallowed; the session carries on.
    pub(crate) fn save_frame(&self) -> Option<PathBuf> {
        let name = frame_file_name(self.navigator.history(), self.navigator.iteration_cap());
        let path = self.output_dir.join(name);
        match self.write_frame(&path) {
            Ok(()) => {
                info!("Saved {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Failed to save {}: {e}", path.display());
                None
            }
        }
    }

    fn write_frame(&self, path: &Path) -> quadzoom_render::Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        let metadata = ExportMetadata {
            fractal_type: self.mode.label().to_string(),
            viewport: *self.navigator.viewport(),
            max_iterations: self.navigator.iteration_cap(),
            zoom_depth: self.navigator.zoom_depth(),
            sequence: self.navigator.history().to_string(),
            julia_c: self.mode.julia_c(),
        };
        export_png(self.context.surface(), path, &metadata)
    }
}

/// Run an interactive session on stdin, presenting to the preview file.
pub(crate) fn run(config: SessionConfig) -> Result<(), AppError> {
    if config.dim < 2 {
        return Err(AppError::InvalidDimension(config.dim));
    }
    let start = config.mode.initial_viewport();
    let navigator = match &config.replay {
        Some(sequence) => Navigator::replay(start, config.max_iterations, sequence)?,
        None => Navigator::new(start, config.max_iterations),
    };
    info!(
        mode = config.mode.label(),
        dim = config.dim,
        max_iterations = config.max_iterations,
        "Starting session"
    );

    let display = PreviewFile::open(&config.preview_path, config.dim)?;
    let mut session = Session::new(
        navigator,
        config.mode,
        config.dim,
        display,
        config.output_dir,
    )?;

    let stdin = io::stdin();
    let mut source = KeyboardSource::new(stdin.lock(), io::stdout());
    session.run(&mut source)?;
    Ok(())
}
