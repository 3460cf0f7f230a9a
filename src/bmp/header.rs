//! Fixed-layout BMP file header and BITMAPINFOHEADER.
//!
//! Only the uncompressed 24-bit bottom-up variant is modelled: every field
//! that is a format constant is validated on parse and written as that
//! constant on encode.

use crate::error::{BmpError, Corruption, Malformation};

pub(crate) const FILE_HEADER_SIZE: usize = 14;
pub(crate) const INFO_HEADER_SIZE: usize = 40;
/// Combined header size, and the only accepted pixel data offset.
pub const PIXEL_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// 54-byte headers plus one padded 1x1 row.
pub const MIN_FILE_SIZE: usize = PIXEL_OFFSET + 4;

const SIGNATURE: [u8; 2] = *b"BM";
const PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 24;

/// Zero bytes appended to each encoded row of `width` pixels so that the row
/// length is a multiple of 4.
pub const fn row_padding(width: usize) -> usize {
    (4 - (3 * width) % 4) % 4
}

/// Bytes one encoded row of `width` pixels occupies, padding included.
pub(crate) fn row_stride(width: u64) -> u64 {
    (width * 3).div_ceil(4) * 4
}

/// Total file size implied by the dimensions.
///
/// Computed in u64 so hostile header values can't overflow it.
pub fn expected_file_size(width: u32, height: u32) -> u64 {
    u64::from(height) * row_stride(u64::from(width)) + PIXEL_OFFSET as u64
}

/// The 14-byte BITMAPFILEHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub pixel_offset: u32,
}

impl FileHeader {
    pub(crate) fn parse(b: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            signature: [b[0], b[1]],
            file_size: u32::from_le_bytes([b[2], b[3], b[4], b[5]]),
            reserved1: u16::from_le_bytes([b[6], b[7]]),
            reserved2: u16::from_le_bytes([b[8], b[9]]),
            pixel_offset: u32::from_le_bytes([b[10], b[11], b[12], b[13]]),
        }
    }

    /// Signature, reserved fields and pixel offset, in that order.
    pub(crate) fn validate_constants(&self) -> Result<(), Malformation> {
        if self.signature != SIGNATURE {
            return Err(Malformation::Signature(self.signature));
        }
        if self.reserved1 != 0 || self.reserved2 != 0 {
            return Err(Malformation::ReservedFields {
                reserved1: self.reserved1,
                reserved2: self.reserved2,
            });
        }
        if self.pixel_offset as usize != PIXEL_OFFSET {
            return Err(Malformation::PixelOffset(self.pixel_offset));
        }
        Ok(())
    }

    pub(crate) fn write(&self, out: &mut [u8]) {
        out[0..2].copy_from_slice(&self.signature);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
    }
}

/// The 40-byte BITMAPINFOHEADER.
///
/// `reserved` covers compression, image size, resolution and palette
/// counts. None of them are interpreted, so they travel through decode and
/// encode untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub reserved: [u8; 24],
}

impl InfoHeader {
    pub(crate) fn parse(b: &[u8; INFO_HEADER_SIZE]) -> Self {
        let mut reserved = [0u8; 24];
        reserved.copy_from_slice(&b[16..40]);
        Self {
            header_size: u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            width: i32::from_le_bytes([b[4], b[5], b[6], b[7]]),
            height: i32::from_le_bytes([b[8], b[9], b[10], b[11]]),
            planes: u16::from_le_bytes([b[12], b[13]]),
            bits_per_pixel: u16::from_le_bytes([b[14], b[15]]),
            reserved,
        }
    }

    pub(crate) fn validate(&self, strict: bool) -> Result<(), Malformation> {
        if self.header_size as usize != INFO_HEADER_SIZE {
            return Err(Malformation::InfoHeaderSize(self.header_size));
        }
        if self.planes != PLANES {
            return Err(Malformation::Planes(self.planes));
        }
        if self.bits_per_pixel != BITS_PER_PIXEL {
            return Err(Malformation::BitDepth(self.bits_per_pixel));
        }
        // Negative height would mean top-down rows, which aren't supported
        if self.width <= 0 || self.height <= 0 {
            return Err(Malformation::Dimensions {
                width: self.width,
                height: self.height,
            });
        }
        if strict && self.reserved != [0u8; 24] {
            return Err(Malformation::ReservedRegion);
        }
        Ok(())
    }

    pub(crate) fn write(&self, out: &mut [u8]) {
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..40].copy_from_slice(&self.reserved);
    }
}

/// Both headers of a validated (or freshly finalized) BMP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
}

impl BmpHeader {
    /// Build headers for an image of the given size, with the file size
    /// field computed from the dimensions.
    ///
    /// An empty image has no valid encoding and is rejected the same way
    /// the decoder rejects it.
    pub(crate) fn for_dimensions(
        width: usize,
        height: usize,
        reserved: [u8; 24],
    ) -> Result<Self, BmpError> {
        let too_large = || BmpError::DimensionsTooLarge {
            width: width as u64,
            height: height as u64,
        };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        if w == 0 || h == 0 {
            return Err(Malformation::Dimensions {
                width: w,
                height: h,
            }
            .into());
        }
        let file_size =
            u32::try_from(expected_file_size(w as u32, h as u32)).map_err(|_| too_large())?;

        Ok(Self {
            file: FileHeader {
                signature: SIGNATURE,
                file_size,
                reserved1: 0,
                reserved2: 0,
                pixel_offset: PIXEL_OFFSET as u32,
            },
            info: InfoHeader {
                header_size: INFO_HEADER_SIZE as u32,
                width: w,
                height: h,
                planes: PLANES,
                bits_per_pixel: BITS_PER_PIXEL,
                reserved,
            },
        })
    }

    /// Run the header-level validation sequence against `data`.
    ///
    /// Steps short-circuit in order: minimum length, file header constants,
    /// file size field, info header, then the size implied by the
    /// dimensions. Only the last step reports [`BmpError::Corrupted`].
    pub(crate) fn parse(data: &[u8], strict: bool) -> Result<Self, BmpError> {
        let actual = data.len();
        if actual < MIN_FILE_SIZE {
            return Err(Malformation::TooShort(actual).into());
        }

        let file_bytes: &[u8; FILE_HEADER_SIZE] = data[..FILE_HEADER_SIZE]
            .try_into()
            .map_err(|_| BmpError::UnexpectedEof)?;
        let file = FileHeader::parse(file_bytes);
        file.validate_constants()?;
        if file.file_size as usize != actual {
            return Err(Malformation::FileSizeField {
                declared: file.file_size,
                actual,
            }
            .into());
        }

        let info_bytes: &[u8; INFO_HEADER_SIZE] = data[FILE_HEADER_SIZE..PIXEL_OFFSET]
            .try_into()
            .map_err(|_| BmpError::UnexpectedEof)?;
        let info = InfoHeader::parse(info_bytes);
        info.validate(strict)?;

        let expected = expected_file_size(info.width as u32, info.height as u32);
        if expected != actual as u64 {
            return Err(Corruption::SizeMismatch { expected, actual }.into());
        }

        Ok(Self { file, info })
    }

    pub fn width(&self) -> u32 {
        self.info.width.unsigned_abs()
    }

    pub fn height(&self) -> u32 {
        self.info.height.unsigned_abs()
    }

    /// Serialize both headers (54 bytes).
    pub(crate) fn to_bytes(&self) -> [u8; PIXEL_OFFSET] {
        let mut out = [0u8; PIXEL_OFFSET];
        let (file, info) = out.split_at_mut(FILE_HEADER_SIZE);
        self.file.write(file);
        self.info.write(info);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_for_widths_1_to_10() {
        let expected = [1, 2, 3, 0, 1, 2, 3, 0, 1, 2];
        for (w, pad) in (1..=10).zip(expected) {
            assert_eq!(row_padding(w), pad, "width {w}");
            assert_eq!((3 * w + row_padding(w)) % 4, 0);
            assert_eq!(row_stride(w as u64), (3 * w + pad) as u64);
        }
    }

    #[test]
    fn empty_dimensions_have_no_header() {
        for (w, h) in [(0, 3), (3, 0), (0, 0)] {
            assert!(matches!(
                BmpHeader::for_dimensions(w, h, [0; 24]),
                Err(BmpError::StructurallyInvalid(Malformation::Dimensions { .. }))
            ));
        }
    }

    #[test]
    fn expected_size_matches_formula() {
        assert_eq!(expected_file_size(1, 1), 58);
        assert_eq!(expected_file_size(2, 2), 54 + 2 * 8);
        assert_eq!(expected_file_size(3, 5), 54 + 5 * 12);
    }

    #[test]
    fn expected_size_does_not_overflow() {
        let size = expected_file_size(i32::MAX as u32, i32::MAX as u32);
        assert!(size > u64::from(u32::MAX));
    }

    #[test]
    fn header_bytes_roundtrip() {
        let header = BmpHeader::for_dimensions(5, 3, [0; 24]).unwrap();
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(header.file.file_size, 54 + 3 * 16);

        let mut data = bytes.to_vec();
        data.resize(header.file.file_size as usize, 0);
        assert_eq!(BmpHeader::parse(&data, true).unwrap(), header);
    }

    #[test]
    fn reserved2_checked_independently() {
        let header = BmpHeader::for_dimensions(1, 1, [0; 24]).unwrap();
        let mut data = header.to_bytes().to_vec();
        data.resize(58, 0);
        data[8] = 1;
        assert!(matches!(
            BmpHeader::parse(&data, false),
            Err(BmpError::StructurallyInvalid(Malformation::ReservedFields {
                reserved1: 0,
                reserved2: 1
            }))
        ));
    }

    #[test]
    fn strict_rejects_nonzero_reserved_region() {
        let mut reserved = [0u8; 24];
        reserved[8] = 0x13; // horizontal resolution
        let header = BmpHeader::for_dimensions(1, 1, reserved).unwrap();
        let mut data = header.to_bytes().to_vec();
        data.resize(58, 0);
        assert!(BmpHeader::parse(&data, false).is_ok());
        assert!(matches!(
            BmpHeader::parse(&data, true),
            Err(BmpError::StructurallyInvalid(Malformation::ReservedRegion))
        ));
    }
}
