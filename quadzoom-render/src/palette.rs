use rayon::prelude::*;

use crate::buffer::RenderBuffer;
use crate::frame::{FrameBuffer, Shade};

/// Number of entries in the cyclic palette.
pub const PALETTE_SIZE: u32 = 48;

/// Channel ramp shared by the red, green, and blue channels, each read at a
/// different phase: full, falling, off, rising.
const RAMP: [u8; PALETTE_SIZE as usize] = [
    255, 255, 255, 255, 255, 255, 255, 255, //
    255, 255, 223, 191, 159, 127, 95, 63, //
    31, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 31, 63, 95, 127, 159, 191, //
    223, 255, 255, 255, 255, 255, 255, 255,
];

const BLACK: [u8; 4] = [0, 0, 0, 255];

/// A fixed cyclic lookup table of RGBA colors plus the in-set color.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: [[u8; 4]; PALETTE_SIZE as usize],
    in_set: [u8; 4],
}

impl Palette {
    /// The classic hue cycle: each channel follows [`RAMP`] a third of a
    /// turn apart, interior points are black.
    pub fn classic() -> Self {
        let n = PALETTE_SIZE as usize;
        let mut colors = [BLACK; PALETTE_SIZE as usize];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = [RAMP[(i + 16) % n], RAMP[(i + 32) % n], RAMP[i % n], 255];
        }
        Self {
            colors,
            in_set: BLACK,
        }
    }

    /// RGBA color of a single shade.
    #[inline]
    pub fn color(&self, shade: Shade) -> [u8; 4] {
        match shade {
            Shade::InSet => self.in_set,
            Shade::Band(i) => self.colors[i as usize % PALETTE_SIZE as usize],
        }
    }

    /// Colorize an entire frame into a new RGBA buffer.
    pub fn colorize(&self, frame: &FrameBuffer) -> RenderBuffer {
        let mut buffer = RenderBuffer::new(frame.dim);
        self.colorize_into(frame, &mut buffer);
        buffer
    }

    /// Colorize `frame` into an existing buffer of the same size.
    pub fn colorize_into(&self, frame: &FrameBuffer, buffer: &mut RenderBuffer) {
        debug_assert_eq!(buffer.pixels.len(), frame.data.len() * 4);
        buffer
            .pixels
            .par_chunks_mut(4)
            .zip(frame.data.par_iter())
            .for_each(|(pixel, &shade)| {
                pixel.copy_from_slice(&self.color(shade));
            });
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}
