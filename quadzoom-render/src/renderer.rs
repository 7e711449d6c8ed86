use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use quadzoom_core::{Complex, Fractal, Viewport};

use crate::error::RenderError;
use crate::frame::{FrameBuffer, Shade};

/// Timing and coverage of one recompute.
#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    pub elapsed: Duration,
    /// Pixels that reached the iteration cap.
    pub in_set: usize,
}

/// The result of a full-frame render.
///
/// Holds shades only; the caller applies a `Palette` to get displayable
/// pixels.
pub struct RenderResult {
    pub frame: FrameBuffer,
    pub stats: RenderStats,
}

/// Render a fresh `dim × dim` frame of `fractal` over `viewport`.
pub fn render<F: Fractal + Sync>(
    fractal: &F,
    viewport: &Viewport,
    max_iter: u32,
    dim: u32,
) -> crate::Result<RenderResult> {
    if dim == 0 {
        return Err(RenderError::InvalidDimension(dim));
    }
    let mut frame = FrameBuffer::new(dim);
    let stats = render_into(fractal, viewport, max_iter, &mut frame);
    Ok(RenderResult { frame, stats })
}

/// Recompute every pixel of `frame` in place.
///
/// Rows are handed to Rayon as independent work items; work stealing evens
/// out the cost gap between interior rows (every pixel runs to the cap) and
/// rows far outside the set. Each row is written by exactly one task, so no
/// synchronisation is needed.
pub fn render_into<F: Fractal + Sync>(
    fractal: &F,
    viewport: &Viewport,
    max_iter: u32,
    frame: &mut FrameBuffer,
) -> RenderStats {
    let start = Instant::now();
    let dim = frame.dim;
    debug!(
        dim,
        max_iter,
        fractal = fractal.name(),
        xmin = viewport.xmin,
        xmax = viewport.xmax,
        ymin = viewport.ymin,
        ymax = viewport.ymax,
        "Starting frame render"
    );

    let columns: Vec<f64> = (0..dim).map(|px| viewport.column_re(px, dim)).collect();

    frame
        .data
        .par_chunks_mut(dim.max(1) as usize)
        .enumerate()
        .for_each(|(py, row)| {
            let im = viewport.row_im(py as u32, dim);
            for (shade, &re) in row.iter_mut().zip(&columns) {
                let count = fractal.escape_count(Complex::new(re, im), max_iter);
                *shade = Shade::from_count(count, max_iter);
            }
        });

    let in_set = frame.in_set_count();
    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        in_set,
        max_iter,
        "Render complete"
    );

    RenderStats { elapsed, in_set }
}
