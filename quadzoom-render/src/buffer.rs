use quadzoom_core::Overlay;

/// Outline color of the zoom overlay square.
pub const OVERLAY_COLOR: [u8; 4] = [255, 255, 255, 255];

/// A square RGBA pixel buffer: the displayable surface.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    pub dim: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl RenderBuffer {
    /// Create a new buffer filled with black (opaque).
    pub fn new(dim: u32) -> Self {
        let mut pixels = vec![0u8; dim as usize * dim as usize * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
        Self { dim, pixels }
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.dim as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Fill an axis-aligned rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: [u8; 4]) {
        let x_end = x.saturating_add(w).min(self.dim);
        let y_end = y.saturating_add(h).min(self.dim);
        let stride = self.dim as usize * 4;
        for row in y..y_end {
            let start = row as usize * stride + x as usize * 4;
            let end = row as usize * stride + x_end as usize * 4;
            if start >= end {
                continue;
            }
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }

    /// Draw the one-pixel outline of an overlay square.
    pub fn draw_square(&mut self, overlay: &Overlay, color: [u8; 4]) {
        let Overlay { x, y, side } = *overlay;
        if side == 0 {
            return;
        }
        let far = side - 1;
        self.fill_rect(x, y, side, 1, color);
        self.fill_rect(x, y + far, side, 1, color);
        self.fill_rect(x, y, 1, side, color);
        self.fill_rect(x + far, y, 1, side, color);
    }
}
