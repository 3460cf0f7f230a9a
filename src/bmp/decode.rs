//! 24-bit BMP pixel decoder.
//!
//! Headers are validated by [`BmpHeader::parse`] before any pixel byte is
//! read, so by the time rows are decoded the input length is known to match
//! the declared dimensions exactly. The cursor still bounds-checks every
//! read and reports [`BmpError::UnexpectedEof`] on a short one.

use enough::Stop;

use super::header::{BmpHeader, PIXEL_OFFSET, row_padding};
use crate::error::{BmpError, Corruption};
use crate::pixel::PixelBuffer;

// ── Validation level ────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Additionally require the 24-byte reserved region of the info header
    /// (compression, image size, resolution, palette counts) to be zero.
    Strict,

    /// Check signature, reserved fields, pixel offset, header size, planes,
    /// bit depth, both size cross-checks and row padding.
    #[default]
    Standard,
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BmpError> {
        let end = self.pos.checked_add(n).ok_or(BmpError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BmpError::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode the pixel rows that follow a validated header.
///
/// Wire row `k` (bottom-up) lands in buffer row `height - 1 - k`, so buffer
/// row 0 is the visual top.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &BmpHeader,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BmpError> {
    let width = header.width() as usize;
    let height = header.height() as usize;
    let pad = row_padding(width);

    let mut buffer = PixelBuffer::allocate(width, height)?;
    let mut bytes = Cursor::new(data, PIXEL_OFFSET);

    for (wire_row, row) in buffer.rows_mut().rev().enumerate() {
        if wire_row % 16 == 0 {
            stop.check()?;
        }
        let src = bytes.take(width * 3)?;
        for (px, bgr) in row.iter_mut().zip(src.chunks_exact(3)) {
            px.b = bgr[0];
            px.g = bgr[1];
            px.r = bgr[2];
        }
        if bytes.take(pad)?.iter().any(|&b| b != 0) {
            return Err(Corruption::NonZeroPadding { row: wire_row }.into());
        }
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use enough::Unstoppable;

    fn bmp_1x2(bottom: [u8; 3], top: [u8; 3]) -> Vec<u8> {
        let header = BmpHeader::for_dimensions(1, 2, [0; 24]).unwrap();
        let mut data = header.to_bytes().to_vec();
        data.extend_from_slice(&bottom);
        data.push(0);
        data.extend_from_slice(&top);
        data.push(0);
        data
    }

    #[test]
    fn first_wire_row_is_bottom_of_buffer() {
        let data = bmp_1x2([1, 2, 3], [4, 5, 6]);
        let header = BmpHeader::parse(&data, false).unwrap();
        let buf = decode_pixels(&data, &header, &Unstoppable).unwrap();
        assert_eq!(buf.get(1, 0), rgb::Bgr { b: 1, g: 2, r: 3 });
        assert_eq!(buf.get(0, 0), rgb::Bgr { b: 4, g: 5, r: 6 });
    }

    #[test]
    fn nonzero_padding_reports_wire_row() {
        let mut data = bmp_1x2([1, 2, 3], [4, 5, 6]);
        // last pad byte of the second wire row
        let last = data.len() - 1;
        data[last] = 0xAA;
        let header = BmpHeader::parse(&data, false).unwrap();
        let err = decode_pixels(&data, &header, &Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            BmpError::Corrupted(Corruption::NonZeroPadding { row: 1 })
        ));
    }

    #[test]
    fn short_pixel_data_is_eof() {
        let data = bmp_1x2([1, 2, 3], [4, 5, 6]);
        let header = BmpHeader::parse(&data, false).unwrap();
        let err = decode_pixels(&data[..data.len() - 2], &header, &Unstoppable).unwrap_err();
        assert!(matches!(err, BmpError::UnexpectedEof));
    }
}
