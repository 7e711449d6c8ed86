//! Display surfaces a session presents frames to.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use quadzoom_render::{write_png, RenderBuffer, RenderError};

use crate::error::AppError;

/// Somewhere to show a finished (or outlined) frame.
pub(crate) trait Display {
    fn present(&mut self, buffer: &RenderBuffer) -> Result<(), AppError>;
}

/// A PNG file rewritten on every refresh, for any image viewer that reloads
/// on change.
///
/// Writes go to a sibling temp file that is then renamed over the preview,
/// so a viewer never sees a half-written image.
pub(crate) struct PreviewFile {
    path: PathBuf,
    tmp_path: PathBuf,
}

impl PreviewFile {
    /// Prepare the surface and show a black frame of `dim × dim`.
    ///
    /// Failing here is fatal: there is nowhere to show anything.
    pub(crate) fn open(path: &Path, dim: u32) -> Result<Self, AppError> {
        let display_err = |source: RenderError| AppError::Display {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| display_err(e.into()))?;
        }
        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let mut surface = Self {
            path: path.to_path_buf(),
            tmp_path: path.with_file_name(tmp_name),
        };
        surface
            .write(&RenderBuffer::new(dim))
            .map_err(display_err)?;
        info!("Preview surface at {}", path.display());
        Ok(surface)
    }

    fn write(&mut self, buffer: &RenderBuffer) -> quadzoom_render::Result<()> {
        write_png(buffer, &self.tmp_path)?;
        fs::rename(&self.tmp_path, &self.path)?;
        debug!(dim = buffer.dim, "Preview refreshed");
        Ok(())
    }
}

impl Display for PreviewFile {
    fn present(&mut self, buffer: &RenderBuffer) -> Result<(), AppError> {
        self.write(buffer).map_err(|source| AppError::Display {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_writes_initial_black_frame() {
        let dir = std::env::temp_dir().join("quadzoom_test_preview_open");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("preview.png");

        let _surface = PreviewFile::open(&path, 5).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert!(!dir.join("nested").join("preview.png.tmp").exists());

        let decoder = png::Decoder::new(fs::File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 5);
        assert_eq!(reader.info().height, 5);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn present_replaces_previous_frame() {
        let dir = std::env::temp_dir().join("quadzoom_test_preview_present");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("preview.png");

        let mut surface = PreviewFile::open(&path, 4).unwrap();
        let mut buffer = RenderBuffer::new(4);
        buffer.fill_rect(0, 0, 4, 4, [255, 255, 255, 255]);
        surface.present(&buffer).unwrap();

        let decoder = png::Decoder::new(fs::File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut pixels = vec![0; reader.output_buffer_size()];
        reader.next_frame(&mut pixels).unwrap();
        assert!(pixels.iter().all(|&b| b == 255));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unusable_location_is_a_display_error() {
        let blocker = std::env::temp_dir().join("quadzoom_test_preview_blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let result = PreviewFile::open(&blocker.join("preview.png"), 4);
        assert!(matches!(result, Err(AppError::Display { .. })));
        let _ = fs::remove_file(&blocker);
    }
}
