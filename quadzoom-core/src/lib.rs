pub mod complex;
pub mod error;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;
pub mod navigator;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{escape_count, Fractal};
pub use julia::Julia;
pub use mandelbrot::Mandelbrot;
pub use navigator::{
    parse_iteration_cap, Command, Navigator, Overlay, Quadrant, Transition, DEFAULT_ITERATION_CAP,
};
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
