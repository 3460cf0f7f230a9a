//! Strict 24-bit BMP decoder and encoder (internal).
//!
//! Use top-level [`crate::decode`], [`crate::encode`], etc.

mod decode;
mod encode;
pub(crate) mod header;

pub use decode::BmpPermissiveness;

use crate::error::BmpError;
use crate::image::BmpImage;
use crate::limits::Limits;
use alloc::vec::Vec;
use enough::Stop;
use header::BmpHeader;

/// Validate headers and decode pixels.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<BmpImage, BmpError> {
    let header = BmpHeader::parse(data, permissiveness == BmpPermissiveness::Strict)?;
    if let Some(limits) = limits {
        limits.check_buffer(header.width(), header.height())?;
    }
    stop.check()?;
    let pixels = decode::decode_pixels(data, &header, stop)?;
    Ok(BmpImage::from_parts(pixels, header.info.reserved))
}

/// Header-only validation, no pixel allocation.
pub(crate) fn probe(
    data: &[u8],
    permissiveness: BmpPermissiveness,
) -> Result<BmpHeader, BmpError> {
    BmpHeader::parse(data, permissiveness == BmpPermissiveness::Strict)
}

/// Encode to BMP.
pub(crate) fn encode(image: &BmpImage, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    stop.check()?;
    encode::encode_bmp(image, stop)
}

/// Encode straight into a writer, one row at a time.
#[cfg(feature = "std")]
pub(crate) fn encode_to<W: std::io::Write>(
    image: &BmpImage,
    mut writer: W,
    stop: &dyn Stop,
) -> Result<(), BmpError> {
    stop.check()?;
    let header = image.header()?;
    encode::write_bmp(&header, image, stop, |chunk| {
        writer.write_all(chunk).map_err(BmpError::Write)
    })?;
    writer.flush().map_err(BmpError::Write)
}
