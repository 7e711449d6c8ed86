use crate::complex::Complex;
use crate::fractal::{escape_count, Fractal};

/// The Mandelbrot set: `z_{n+1} = z_n² + c` with `z₀ = c`.
///
/// Starting the orbit at `c` instead of 0 skips one trivial step; counts are
/// reported in map pairs (see [`escape_count`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct Mandelbrot;

impl Mandelbrot {
    pub fn new() -> Self {
        Self
    }
}

impl Fractal for Mandelbrot {
    #[inline]
    fn escape_count(&self, c: Complex, max_iter: u32) -> u32 {
        escape_count(c, c, max_iter)
    }

    fn name(&self) -> &'static str {
        "Mandelbrot"
    }
}
