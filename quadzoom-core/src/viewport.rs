use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// The visible rectangle of the complex plane.
///
/// Bounds are stored directly rather than as center + scale: every zoom step
/// is an exact midpoint or reflection of the current bounds, which keeps the
/// arithmetic identical to what a user replaying a command sequence expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Viewport {
    /// Initial Mandelbrot view: `[-1.5, 0.5] × [-1, 1]`.
    pub const MANDELBROT: Self = Self {
        xmin: -1.5,
        xmax: 0.5,
        ymin: -1.0,
        ymax: 1.0,
    };

    /// Initial Julia view: `[-2, 2] × [-2, 2]`.
    pub const JULIA: Self = Self {
        xmin: -2.0,
        xmax: 2.0,
        ymin: -2.0,
        ymax: 2.0,
    };

    /// Create a viewport with explicit bounds.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> crate::Result<Self> {
        if ![xmin, xmax, ymin, ymax].iter().all(|v| v.is_finite()) {
            return Err(CoreError::InvalidViewport {
                reason: format!("bounds must be finite, got [{xmin}, {xmax}] × [{ymin}, {ymax}]"),
            });
        }
        if xmin >= xmax || ymin >= ymax {
            return Err(CoreError::InvalidViewport {
                reason: format!("bounds must be increasing, got [{xmin}, {xmax}] × [{ymin}, {ymax}]"),
            });
        }
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Centre of the view.
    #[inline]
    pub fn center(&self) -> Complex {
        Complex::new((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Map a pixel coordinate of a `dim × dim` frame to the complex plane.
    ///
    /// Column 0 lands on `xmin` and column `dim − 1` on `xmax`; row 0 lands
    /// on `ymin`. A one-pixel frame samples `(xmin, ymin)`.
    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32, dim: u32) -> Complex {
        Complex::new(self.column_re(px, dim), self.row_im(py, dim))
    }

    /// Real coordinate of pixel column `px`.
    #[inline]
    pub fn column_re(&self, px: u32, dim: u32) -> f64 {
        self.xmin + lerp_step(px, self.width(), dim)
    }

    /// Imaginary coordinate of pixel row `py`.
    #[inline]
    pub fn row_im(&self, py: u32, dim: u32) -> f64 {
        self.ymin + lerp_step(py, self.height(), dim)
    }

    /// Expand every bound outward about the centre, doubling both extents.
    pub fn zoomed_out(&self) -> Self {
        Self {
            xmin: (3.0 * self.xmin - self.xmax) / 2.0,
            xmax: (3.0 * self.xmax - self.xmin) / 2.0,
            ymin: (3.0 * self.ymin - self.ymax) / 2.0,
            ymax: (3.0 * self.ymax - self.ymin) / 2.0,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::MANDELBROT
    }
}

#[inline]
fn lerp_step(index: u32, span: f64, dim: u32) -> f64 {
    if dim < 2 {
        return 0.0;
    }
    (index as f64 * span) / (dim - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn initial_views() {
        let m = Viewport::MANDELBROT;
        assert_eq!(m.center(), Complex::new(-0.5, 0.0));
        assert_eq!((m.width(), m.height()), (2.0, 2.0));

        let j = Viewport::JULIA;
        assert_eq!(j.center(), Complex::ZERO);
        assert_eq!((j.width(), j.height()), (4.0, 4.0));
    }

    #[test]
    fn pixel_corners_hit_bounds() {
        let vp = Viewport::new(-1.0, 1.0, -2.0, 2.0).unwrap();
        let tl = vp.pixel_to_complex(0, 0, 801);
        assert_eq!(tl, Complex::new(-1.0, -2.0));
        let br = vp.pixel_to_complex(800, 800, 801);
        assert!((br.re - 1.0).abs() < EPSILON);
        assert!((br.im - 2.0).abs() < EPSILON);
    }

    #[test]
    fn odd_frame_centre_pixel_is_view_centre() {
        let vp = Viewport::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        assert_eq!(vp.pixel_to_complex(1, 1, 3), Complex::ZERO);
        assert_eq!(vp.pixel_to_complex(400, 400, 801), Complex::ZERO);
    }

    #[test]
    fn single_pixel_frame_samples_min_corner() {
        let vp = Viewport::MANDELBROT;
        assert_eq!(vp.pixel_to_complex(0, 0, 1), Complex::new(-1.5, -1.0));
    }

    #[test]
    fn zoom_out_doubles_extent_about_centre() {
        let vp = Viewport::new(-1.0, 0.0, -0.5, 0.5).unwrap();
        let out = vp.zoomed_out();
        assert_eq!(out, Viewport::MANDELBROT);
        assert_eq!(out.center(), vp.center());
    }

    #[test]
    fn invalid_bounds() {
        assert!(Viewport::new(1.0, -1.0, 0.0, 1.0).is_err());
        assert!(Viewport::new(0.0, 1.0, 1.0, 1.0).is_err());
        assert!(Viewport::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
        assert!(Viewport::new(0.0, f64::INFINITY, 0.0, 1.0).is_err());
    }

    #[test]
    fn serde_keeps_bounds() {
        let vp = Viewport::new(-0.75, -0.25, -0.25, 0.25).unwrap();
        let json = serde_json::to_string(&vp).unwrap();
        assert!(json.contains("\"xmin\":-0.75"));
        let back: Viewport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vp);
    }
}
