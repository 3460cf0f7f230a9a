//! # bimpie
//!
//! Strict decoder and encoder for uncompressed 24-bit BMP files, plus
//! lossless flips and clockwise rotations of the decoded image.
//!
//! ## Supported Format
//!
//! Exactly one BMP layout: 14-byte file header, 40-byte BITMAPINFOHEADER,
//! pixel data at offset 54, one plane, 24 bits per pixel, bottom-up rows
//! padded to a multiple of 4 bytes. Anything else is rejected.
//!
//! Decoding distinguishes three failure families (see [`ErrorKind`]):
//! - **structurally invalid**: not this kind of BMP (signature, header
//!   constants, bit depth, the file size field)
//! - **corrupted**: the headers are fine but the byte count doesn't match
//!   the declared dimensions, or row padding isn't zero
//! - **read/write failure**: input ended early, or an I/O error
//!
//! ## Non-Goals
//!
//! - Compressed, palette or non-24-bit BMPs
//! - Top-down (negative height) images
//! - Streaming or partial decode
//!
//! ## Usage
//!
//! ```no_run
//! use bimpie::{Operation, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! let mut image = bimpie::decode(data, Unstoppable)?;
//! image.flip_horizontal();
//! image.apply(Operation::RotateRight(3));
//! println!("{}x{}", image.width(), image.height());
//!
//! let encoded = bimpie::encode(&image, Unstoppable)?;
//! # Ok::<(), bimpie::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod decode;
mod error;
mod image;
mod limits;
mod pixel;
mod transform;

// Re-exports
pub use bmp::BmpPermissiveness;
pub use bmp::header::{
    BmpHeader, FileHeader, InfoHeader, MIN_FILE_SIZE, PIXEL_OFFSET, expected_file_size,
    row_padding,
};
pub use decode::DecodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{BmpError, Corruption, ErrorKind, Malformation};
pub use image::BmpImage;
pub use limits::Limits;
pub use pixel::{Bgr8, PixelBuffer};
pub use transform::Operation;

use alloc::vec::Vec;

/// Decode a 24-bit BMP with default validation and no limits.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<BmpImage, BmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode with resource limits.
pub fn decode_with_limits(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<BmpImage, BmpError> {
    DecodeRequest::new(data).with_limits(limits).decode(stop)
}

/// Validate the headers and the size cross-check without decoding pixels.
pub fn probe(data: &[u8]) -> Result<BmpHeader, BmpError> {
    bmp::probe(data, BmpPermissiveness::default())
}

/// Encode an image as a 24-bit BMP.
pub fn encode(image: &BmpImage, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    bmp::encode(image, &stop)
}

/// Read a whole BMP from `reader` and decode it.
///
/// I/O errors become [`BmpError::Read`].
#[cfg(feature = "std")]
pub fn read_bmp<R: std::io::Read>(mut reader: R, stop: impl Stop) -> Result<BmpImage, BmpError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(BmpError::Read)?;
    decode(&data, stop)
}

/// Encode `image` into `writer`.
///
/// I/O errors become [`BmpError::Write`].
#[cfg(feature = "std")]
pub fn write_bmp<W: std::io::Write>(
    image: &BmpImage,
    writer: W,
    stop: impl Stop,
) -> Result<(), BmpError> {
    bmp::encode_to(image, writer, &stop)
}
