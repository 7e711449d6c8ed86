use crate::palette::PALETTE_SIZE;

/// Color assignment of one pixel, before it is looked up in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    /// The orbit reached the iteration cap.
    InSet,
    /// Index into the cyclic palette, in `0..PALETTE_SIZE`.
    Band(u8),
}

impl Shade {
    /// Shade for an escape count under cap `max_iter`.
    ///
    /// Escaped points cycle through the palette by `(max_iter − count) mod
    /// PALETTE_SIZE`, taken as a Euclidean remainder so a degenerate cap of
    /// 0 still lands on a valid band.
    #[inline]
    pub fn from_count(count: u32, max_iter: u32) -> Self {
        if count == max_iter {
            return Shade::InSet;
        }
        let band = (max_iter as i64 - count as i64).rem_euclid(PALETTE_SIZE as i64);
        Shade::Band(band as u8)
    }
}

/// Per-pixel shades for a full `dim × dim` frame, row-major.
///
/// This is the renderer's output before coloring; keeping it apart from the
/// RGBA surface lets the overlay be drawn and erased without recomputing.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pub dim: u32,
    pub data: Vec<Shade>,
}

impl FrameBuffer {
    pub fn new(dim: u32) -> Self {
        let size = dim as usize * dim as usize;
        Self {
            dim,
            data: vec![Shade::InSet; size],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.dim && y < self.dim);
        y as usize * self.dim as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Shade {
        self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, shade: Shade) {
        let idx = self.index(x, y);
        self.data[idx] = shade;
    }

    /// Number of pixels shaded as [`Shade::InSet`].
    pub fn in_set_count(&self) -> usize {
        self.data.iter().filter(|s| **s == Shade::InSet).count()
    }
}
