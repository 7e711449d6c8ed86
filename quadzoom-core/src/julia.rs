use crate::complex::Complex;
use crate::fractal::{escape_count, Fractal};

/// A Julia set: `z_{n+1} = z_n² + c`, where `c` is a fixed constant
/// and `z₀` is the point on the complex plane.
#[derive(Debug, Clone, Copy)]
pub struct Julia {
    /// The fixed constant `c` that defines this Julia set.
    c: Complex,
}

impl Julia {
    pub fn new(c: Complex) -> Self {
        Self { c }
    }

    /// The constant `c` defining this Julia set.
    pub fn c(&self) -> Complex {
        self.c
    }
}

impl Default for Julia {
    /// `c = 0`, the unit disc. Used when Julia mode is requested without
    /// a parameter.
    fn default() -> Self {
        Self::new(Complex::ZERO)
    }
}

impl Fractal for Julia {
    #[inline]
    fn escape_count(&self, point: Complex, max_iter: u32) -> u32 {
        escape_count(point, self.c, max_iter)
    }

    fn name(&self) -> &'static str {
        "Julia"
    }

    fn julia_c(&self) -> Option<Complex> {
        Some(self.c)
    }
}
