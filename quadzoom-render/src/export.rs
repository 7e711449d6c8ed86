//! PNG export with embedded metadata (tEXt chunks).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use quadzoom_core::{Complex, Viewport};

use crate::buffer::RenderBuffer;

/// Metadata to embed in an exported PNG as tEXt chunks.
pub struct ExportMetadata {
    pub fractal_type: String,
    pub viewport: Viewport,
    pub max_iterations: u32,
    pub zoom_depth: i32,
    /// Command history that reproduces this view.
    pub sequence: String,
    pub julia_c: Option<Complex>,
}

/// File name for a saved frame: the command history, then the cap.
///
/// An empty history still gives a usable name (`_753.png`).
pub fn frame_file_name(sequence: &str, max_iterations: u32) -> String {
    format!("{sequence}_{max_iterations}.png")
}

/// Write an RGBA buffer as a PNG file with embedded view metadata.
pub fn export_png(
    buffer: &RenderBuffer,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let mut chunks = vec![("Description".to_string(), build_description(metadata))];
    chunks.extend(build_metadata_pairs(metadata));
    encode_png(buffer, path, chunks)
}

/// Write an RGBA buffer as a bare PNG file (software tag only).
pub fn write_png(buffer: &RenderBuffer, path: &Path) -> crate::Result<()> {
    encode_png(buffer, path, Vec::new())
}

fn encode_png(
    buffer: &RenderBuffer,
    path: &Path,
    chunks: Vec<(String, String)>,
) -> crate::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, buffer.dim, buffer.dim);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);

    encoder.add_text_chunk("Software".to_string(), "QuadZoom".to_string())?;
    for (key, value) in chunks {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;

    debug!(
        "Wrote PNG {}x{} to {}",
        buffer.dim,
        buffer.dim,
        path.display()
    );
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    let vp = &meta.viewport;
    let mut desc = format!(
        "{} - [{:e}, {:e}] x [{:e}, {:e}], Zoom: {}, Iterations: {}",
        meta.fractal_type, vp.xmin, vp.xmax, vp.ymin, vp.ymax, meta.zoom_depth, meta.max_iterations,
    );
    if let Some(c) = meta.julia_c {
        desc.push_str(&format!(", Julia C: {c}"));
    }
    desc
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    let vp = &meta.viewport;
    let mut pairs = vec![
        ("QuadZoom.FractalType".into(), meta.fractal_type.clone()),
        ("QuadZoom.XMin".into(), format!("{:e}", vp.xmin)),
        ("QuadZoom.XMax".into(), format!("{:e}", vp.xmax)),
        ("QuadZoom.YMin".into(), format!("{:e}", vp.ymin)),
        ("QuadZoom.YMax".into(), format!("{:e}", vp.ymax)),
        ("QuadZoom.MaxIterations".into(), meta.max_iterations.to_string()),
        ("QuadZoom.ZoomDepth".into(), meta.zoom_depth.to_string()),
        ("QuadZoom.Sequence".into(), meta.sequence.clone()),
    ];
    if let Some(c) = meta.julia_c {
        pairs.push(("QuadZoom.JuliaC_Re".into(), format!("{:e}", c.re)));
        pairs.push(("QuadZoom.JuliaC_Im".into(), format!("{:e}", c.im)));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn meta(julia_c: Option<Complex>) -> ExportMetadata {
        ExportMetadata {
            fractal_type: (if julia_c.is_some() { "Julia" } else { "Mandelbrot" }).into(),
            viewport: Viewport::MANDELBROT,
            max_iterations: 753,
            zoom_depth: 2,
            sequence: "WS".into(),
            julia_c,
        }
    }

    #[test]
    fn file_name_uses_sequence_and_cap() {
        assert_eq!(frame_file_name("WXSO", 753), "WXSO_753.png");
        assert_eq!(frame_file_name("", 10), "_10.png");
    }

    #[test]
    fn export_creates_valid_png() {
        let buffer = RenderBuffer::new(4);
        let dir = std::env::temp_dir().join("quadzoom_test_export");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_export.png");
        export_png(&buffer, &path, &meta(None)).expect("export should succeed");

        let mut file = File::open(&path).expect("file should exist");
        let mut header = [0u8; 8];
        file.read_exact(&mut header).expect("should read header");
        assert_eq!(&header, b"\x89PNG\r\n\x1a\n", "valid PNG signature");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_embeds_text_chunks() {
        let buffer = RenderBuffer::new(2);
        let dir = std::env::temp_dir().join("quadzoom_test_export_meta");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_meta.png");
        let c = Complex::new(-0.7, 0.27015);
        export_png(&buffer, &path, &meta(Some(c))).expect("export should succeed");

        let decoder = png::Decoder::new(File::open(&path).expect("file should exist"));
        let reader = decoder.read_info().expect("should read info");
        let info = reader.info();
        assert_eq!((info.width, info.height), (2, 2));
        let texts: Vec<_> = info.uncompressed_latin1_text.iter().collect();
        assert!(texts
            .iter()
            .any(|t| t.keyword == "Software" && t.text == "QuadZoom"));
        assert!(texts
            .iter()
            .any(|t| t.keyword == "QuadZoom.Sequence" && t.text == "WS"));
        assert!(texts
            .iter()
            .any(|t| t.keyword == "QuadZoom.FractalType" && t.text == "Julia"));
        assert!(texts.iter().any(|t| t.keyword == "QuadZoom.JuliaC_Re"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let path = std::env::temp_dir()
            .join("quadzoom_missing_dir_for_export")
            .join("nested")
            .join("frame.png");
        let err = export_png(&RenderBuffer::new(2), &path, &meta(None)).unwrap_err();
        assert!(matches!(err, crate::RenderError::Io(_)));
    }
}
