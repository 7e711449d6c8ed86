use crate::complex::Complex;

/// Squared bailout modulus: an orbit with `|z|² > 4` has escaped.
pub const ESCAPE_NORM_SQ: f64 = 4.0;

/// Escape-time count for the orbit of `z ← z² + c` starting at `z0`.
///
/// The loop applies the map twice per counter step and only tests the
/// bailout after the second application, so the count is the number of
/// completed map *pairs*, starting at 1. The result lies in
/// `[1, max_iter]`; `max_iter` itself means the orbit never escaped. A cap of
/// 0 or 1 skips the loop entirely and yields 1.
///
/// A NaN modulus (an orbit that overflowed from a huge starting point) is
/// treated as escaped, which keeps the function total over finite inputs.
#[inline]
pub fn escape_count(z0: Complex, c: Complex, max_iter: u32) -> u32 {
    let mut z = z0;
    let mut n = 1;
    while n < max_iter {
        z = z.square_add(c).square_add(c);
        if !(z.norm_sq() <= ESCAPE_NORM_SQ) {
            break;
        }
        n += 1;
    }
    n
}

/// Trait implemented by the escape-time fractals.
///
/// Designed for **static dispatch**: the renderer is generic over
/// `F: Fractal` so the inner loop is inlined per fractal type.
pub trait Fractal {
    /// Escape count of `point` under this fractal's map, capped at `max_iter`.
    fn escape_count(&self, point: Complex, max_iter: u32) -> u32;

    /// Human-readable name, used in logs and export metadata.
    fn name(&self) -> &'static str;

    /// The fixed parameter of a Julia set, `None` for Mandelbrot.
    fn julia_c(&self) -> Option<Complex> {
        None
    }
}
