//! BMP encoder: uncompressed 24-bit, bottom-up.

use alloc::vec::Vec;
use enough::Stop;

use super::header::{BmpHeader, row_padding};
use crate::error::BmpError;
use crate::image::BmpImage;

/// Encode an image to BMP bytes.
///
/// The headers are finalized from the current buffer dimensions first, so a
/// rotated image always gets a matching file size field.
pub(crate) fn encode_bmp(image: &BmpImage, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let header = image.header()?;
    let file_size = header.file.file_size as usize;

    let mut out = Vec::new();
    out.try_reserve_exact(file_size)
        .map_err(|_| BmpError::OutOfMemory(file_size))?;
    write_bmp(&header, image, stop, |chunk| {
        out.extend_from_slice(chunk);
        Ok(())
    })?;

    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}

/// Stream headers and rows through `sink`.
///
/// Rows go out in the order the decoder reads them: buffer row
/// `height - 1` first.
pub(crate) fn write_bmp<F>(
    header: &BmpHeader,
    image: &BmpImage,
    stop: &dyn Stop,
    mut sink: F,
) -> Result<(), BmpError>
where
    F: FnMut(&[u8]) -> Result<(), BmpError>,
{
    sink(&header.to_bytes())?;

    let pixels = image.pixels();
    let pad = row_padding(pixels.width());
    let mut line = Vec::with_capacity(pixels.width() * 3 + pad);
    for (wire_row, row) in pixels.rows().rev().enumerate() {
        if wire_row % 16 == 0 {
            stop.check()?;
        }
        line.clear();
        for px in row {
            line.extend_from_slice(&[px.b, px.g, px.r]);
        }
        line.extend(core::iter::repeat_n(0u8, pad));
        sink(&line)?;
    }
    Ok(())
}
