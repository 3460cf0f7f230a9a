//! Lossless geometric transforms.
//!
//! Flips work in place. Rotation builds a buffer with swapped dimensions and
//! replaces the old one. None of these inspect pixel values or fail.

use crate::image::BmpImage;
use crate::pixel::{BLACK, PixelBuffer};

/// One queued transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    FlipHorizontal,
    FlipVertical,
    /// Rotate 90° clockwise this many times (any integer, reduced mod 4).
    RotateRight(i32),
}

impl BmpImage {
    /// Mirror left to right.
    pub fn flip_horizontal(&mut self) {
        for row in self.pixels_mut().rows_mut() {
            row.reverse();
        }
    }

    /// Mirror top to bottom.
    pub fn flip_vertical(&mut self) {
        let pixels = self.pixels_mut();
        let height = pixels.height();
        for row in 0..height / 2 {
            pixels.swap_rows(row, height - 1 - row);
        }
    }

    /// Rotate 90° clockwise. Always reallocates.
    pub fn rotate_right_once(&mut self) {
        let rotated = rotate_clockwise(self.pixels());
        self.replace_pixels(rotated);
    }

    /// Rotate 90° clockwise `times` times.
    ///
    /// Uses the non-negative remainder, so `-1` is three clockwise turns.
    pub fn rotate_right(&mut self, times: i32) {
        for _ in 0..times.rem_euclid(4) {
            self.rotate_right_once();
        }
    }

    pub fn apply(&mut self, op: Operation) {
        match op {
            Operation::FlipHorizontal => self.flip_horizontal(),
            Operation::FlipVertical => self.flip_vertical(),
            Operation::RotateRight(n) => self.rotate_right(n),
        }
    }

    /// Apply operations in order.
    pub fn apply_all<I: IntoIterator<Item = Operation>>(&mut self, ops: I) {
        for op in ops {
            self.apply(op);
        }
    }
}

/// `new[row][col] = old[height - 1 - col][row]`, with the new buffer
/// `old.height()` wide and `old.width()` tall.
fn rotate_clockwise(old: &PixelBuffer) -> PixelBuffer {
    let (old_w, old_h) = (old.width(), old.height());
    let (new_w, new_h) = (old_h, old_w);

    let mut pixels = alloc::vec![BLACK; new_w * new_h];
    for (row, dst) in pixels.chunks_exact_mut(new_w.max(1)).enumerate() {
        for (col, px) in dst.iter_mut().enumerate() {
            *px = old[(old_h - 1 - col, row)];
        }
    }

    PixelBuffer::from_exact(new_w, new_h, pixels)
}
