use crate::bmp::header::BmpHeader;
use crate::error::BmpError;
use crate::pixel::PixelBuffer;

/// A decoded 24-bit BMP: pixel buffer plus the header bytes the format
/// doesn't interpret.
///
/// Width and height come from the buffer, never from a stored header, so
/// transforms that reshape the buffer can't leave stale dimensions behind.
/// [`header`](Self::header) rebuilds both headers on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpImage {
    pixels: PixelBuffer,
    info_reserved: [u8; 24],
}

impl BmpImage {
    /// Wrap a pixel buffer. The info header's reserved region starts zeroed.
    pub fn new(pixels: PixelBuffer) -> Self {
        Self {
            pixels,
            info_reserved: [0; 24],
        }
    }

    pub(crate) fn from_parts(pixels: PixelBuffer, info_reserved: [u8; 24]) -> Self {
        Self {
            pixels,
            info_reserved,
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    /// Install a new buffer; the previous one is dropped here.
    pub(crate) fn replace_pixels(&mut self, pixels: PixelBuffer) {
        self.pixels = pixels;
    }

    /// Bytes 30..54 of the file as last decoded (zero for new images).
    pub fn info_reserved(&self) -> &[u8; 24] {
        &self.info_reserved
    }

    /// Finalize both headers from the current dimensions.
    ///
    /// Fails only when the image is too large for the format's 32-bit size
    /// fields.
    pub fn header(&self) -> Result<BmpHeader, BmpError> {
        BmpHeader::for_dimensions(self.width(), self.height(), self.info_reserved)
    }
}

impl From<PixelBuffer> for BmpImage {
    fn from(pixels: PixelBuffer) -> Self {
        Self::new(pixels)
    }
}
