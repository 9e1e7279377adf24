//! Drawing surfaces and the unit-square to pixel mapping.

use crate::types::Color;
use glam::Vec2;

/// A square-or-rectangular, pixel-addressable drawing surface.
///
/// This is everything the loop driver needs from a windowing backend.
pub trait Surface {
    /// Surface size in pixels as `[width, height]`.
    fn size(&self) -> [usize; 2];

    /// Sets a single pixel. Coordinates are always in bounds.
    fn set_pixel(&mut self, x: usize, y: usize, color: Color);

    /// Makes the pixels written so far visible.
    fn present(&mut self);
}

/// Maps a unit-square point to pixel indices.
///
/// Each coordinate is scaled by the surface size and truncated, then
/// clamped into `[0, size - 1]`. Negative values and NaN map to `0`, a
/// coordinate of exactly `1.0` maps to the last row/column.
pub fn to_pixel(point: Vec2, size: [usize; 2]) -> [usize; 2] {
    let axis = |v: f32, len: usize| -> usize {
        let last = len.saturating_sub(1);
        // Float-to-int casts saturate and send NaN to zero.
        ((v * len as f32) as usize).min(last)
    };
    [axis(point.x, size[0]), axis(point.y, size[1])]
}

/// In-memory RGB surface.
///
/// Starts black and is only ever cleared on request, so plotted points
/// accumulate across frames.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    /// Row-major, three bytes per pixel.
    rgb: Vec<u8>,
    dirty: bool,
    writes: u64,
    presents: u64,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rgb: vec![0; width * height * 3],
            dirty: true,
            writes: 0,
            presents: 0,
        }
    }

    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    /// Resets every pixel to black and marks the buffer for upload.
    pub fn clear(&mut self) {
        self.rgb.fill(0);
        self.writes = 0;
        self.dirty = true;
    }

    /// ### Panics
    /// Panics if `(x, y)` is out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let i = self.offset(x, y);
        Color::rgb(self.rgb[i], self.rgb[i + 1], self.rgb[i + 2])
    }

    #[inline]
    pub fn as_rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Returns whether the buffer was presented since the last call, and
    /// resets the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Number of `set_pixel` calls since creation or the last [`clear`](Self::clear).
    #[inline]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    #[inline]
    pub fn presents(&self) -> u64 {
        self.presents
    }

    /// Number of non-black pixels.
    pub fn lit_pixels(&self) -> usize {
        self.rgb
            .chunks_exact(3)
            .filter(|px| px.iter().any(|&c| c != 0))
            .count()
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        (y * self.width + x) * 3
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let i = self.offset(x, y);
        self.rgb[i..i + 3].copy_from_slice(&[color.r, color.g, color.b]);
        self.writes += 1;
    }

    fn present(&mut self) {
        self.dirty = true;
        self.presents += 1;
    }
}
