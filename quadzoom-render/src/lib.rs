pub mod buffer;
pub mod error;
pub mod export;
pub mod frame;
pub mod palette;
pub mod renderer;

pub use buffer::{RenderBuffer, OVERLAY_COLOR};
pub use error::RenderError;
pub use export::{export_png, frame_file_name, write_png, ExportMetadata};
pub use frame::{FrameBuffer, Shade};
pub use palette::{Palette, PALETTE_SIZE};
pub use renderer::{render, render_into, RenderResult, RenderStats};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
