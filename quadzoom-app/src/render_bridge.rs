use quadzoom_core::{Complex, Julia, Mandelbrot, Viewport};
use quadzoom_render::{render_into, FrameBuffer, RenderStats};

/// Which family of sets the session explores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FractalMode {
    Mandelbrot,
    /// Julia set of the given fixed parameter.
    Julia(Complex),
}

impl FractalMode {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia(_) => "Julia",
        }
    }

    pub(crate) fn julia_c(self) -> Option<Complex> {
        match self {
            Self::Mandelbrot => None,
            Self::Julia(c) => Some(c),
        }
    }

    /// Bounds a session of this mode starts from.
    pub(crate) fn initial_viewport(self) -> Viewport {
        match self {
            Self::Mandelbrot => Viewport::MANDELBROT,
            Self::Julia(_) => Viewport::JULIA,
        }
    }
}

/// Recompute `frame` for `mode`, monomorphised per fractal type.
pub(crate) fn render_mode(
    mode: FractalMode,
    viewport: &Viewport,
    max_iter: u32,
    frame: &mut FrameBuffer,
) -> RenderStats {
    match mode {
        FractalMode::Mandelbrot => render_into(&Mandelbrot, viewport, max_iter, frame),
        FractalMode::Julia(c) => render_into(&Julia::new(c), viewport, max_iter, frame),
    }
}
