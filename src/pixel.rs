use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::error::BmpError;

/// One 24-bit pixel in BMP wire order (blue, green, red).
pub type Bgr8 = rgb::Bgr<u8>;

pub(crate) const BLACK: Bgr8 = rgb::Bgr { b: 0, g: 0, r: 0 };

/// Owned `height` x `width` grid of [`Bgr8`] pixels.
///
/// Storage is one flat row-major vector, indexed `row * width + col`.
/// Row 0 is the visual top of the image. Out-of-range access panics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Bgr8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Allocate a zero-filled (black) buffer.
    ///
    /// Fails with [`BmpError::OutOfMemory`] instead of aborting when the
    /// allocator can't satisfy the request.
    pub fn allocate(width: usize, height: usize) -> Result<Self, BmpError> {
        let len = width
            .checked_mul(height)
            .ok_or(BmpError::DimensionsTooLarge {
                width: width as u64,
                height: height as u64,
            })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| BmpError::OutOfMemory(len.saturating_mul(3)))?;
        pixels.resize(len, BLACK);
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Wrap an existing row-major pixel vector.
    ///
    /// Extra pixels past `width * height` are dropped.
    pub fn from_pixels(
        width: usize,
        height: usize,
        mut pixels: Vec<Bgr8>,
    ) -> Result<Self, BmpError> {
        let needed = width
            .checked_mul(height)
            .ok_or(BmpError::DimensionsTooLarge {
                width: width as u64,
                height: height as u64,
            })?;
        if pixels.len() < needed {
            return Err(BmpError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        pixels.truncate(needed);
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Caller guarantees `pixels.len() == width * height`.
    pub(crate) fn from_exact(width: usize, height: usize, pixels: Vec<Bgr8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Bgr8 {
        self[(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Bgr8) {
        self[(row, col)] = value;
    }

    pub fn row(&self, row: usize) -> &[Bgr8] {
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [Bgr8] {
        let start = row * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> core::slice::ChunksExact<'_, Bgr8> {
        // chunks_exact(0) panics; a zero-width buffer has no pixels anyway
        self.pixels.chunks_exact(self.width.max(1))
    }

    pub(crate) fn rows_mut(&mut self) -> core::slice::ChunksExactMut<'_, Bgr8> {
        self.pixels.chunks_exact_mut(self.width.max(1))
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Bgr8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Bgr8> {
        self.pixels
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let w = self.width;
        let (head, tail) = self.pixels.split_at_mut(hi * w);
        head[lo * w..(lo + 1) * w].swap_with_slice(&mut tail[..w]);
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Bgr8> {
        imgref::ImgRef::new(&self.pixels[..], self.width, self.height)
    }
}

impl Index<(usize, usize)> for PixelBuffer {
    type Output = Bgr8;

    fn index(&self, (row, col): (usize, usize)) -> &Bgr8 {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) out of bounds for {}x{} buffer",
            self.width,
            self.height
        );
        &self.pixels[row * self.width + col]
    }
}

impl IndexMut<(usize, usize)> for PixelBuffer {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Bgr8 {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) out of bounds for {}x{} buffer",
            self.width,
            self.height
        );
        &mut self.pixels[row * self.width + col]
    }
}

#[cfg(feature = "imgref")]
impl From<imgref::ImgVec<Bgr8>> for PixelBuffer {
    fn from(img: imgref::ImgVec<Bgr8>) -> Self {
        let (width, height) = (img.width(), img.height());
        let mut pixels = Vec::with_capacity(width * height);
        for row in img.as_ref().rows() {
            pixels.extend_from_slice(row);
        }
        Self {
            pixels,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(v: u8) -> Bgr8 {
        rgb::Bgr { b: v, g: v, r: v }
    }

    #[test]
    fn allocate_is_black() {
        let buf = PixelBuffer::allocate(3, 2).unwrap();
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert!(buf.pixels().iter().all(|p| *p == BLACK));
    }

    #[test]
    fn set_then_get_is_row_major() {
        let mut buf = PixelBuffer::allocate(3, 2).unwrap();
        buf.set(1, 2, px(9));
        assert_eq!(buf.get(1, 2), px(9));
        assert_eq!(buf.pixels()[5], px(9));
        assert_eq!(buf.row(1)[2], px(9));
    }

    #[test]
    #[should_panic]
    fn column_out_of_range_panics() {
        let buf = PixelBuffer::allocate(2, 2).unwrap();
        // (0, 2) would alias (1, 0) with a bare flat index
        let _ = buf.get(0, 2);
    }

    #[test]
    fn swap_rows_exchanges_whole_rows() {
        let pixels = (0..6).map(px).collect();
        let mut buf = PixelBuffer::from_pixels(2, 3, pixels).unwrap();
        buf.swap_rows(2, 0);
        assert_eq!(buf.row(0), &[px(4), px(5)]);
        assert_eq!(buf.row(1), &[px(2), px(3)]);
        assert_eq!(buf.row(2), &[px(0), px(1)]);
    }

    #[test]
    fn from_pixels_rejects_short_vec() {
        let err = PixelBuffer::from_pixels(2, 2, alloc::vec![px(0); 3]).unwrap_err();
        assert!(matches!(
            err,
            BmpError::BufferTooSmall {
                needed: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn rows_yields_height_rows() {
        let buf = PixelBuffer::allocate(4, 3).unwrap();
        assert_eq!(buf.rows().count(), 3);
        assert!(buf.rows().all(|r| r.len() == 4));
    }
}
