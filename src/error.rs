use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    /// Not a well-formed file of the supported BMP variant.
    #[error("not a supported BMP file: {0}")]
    StructurallyInvalid(Malformation),

    /// Headers are well-formed but the content disagrees with them.
    #[error("corrupted BMP data: {0}")]
    Corrupted(Corruption),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[cfg(feature = "std")]
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    #[cfg(feature = "std")]
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} pixels, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("failed to allocate {0} bytes")]
    OutOfMemory(usize),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Header-level check that rejected the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Malformation {
    #[error("file is {0} bytes, smaller than the 58-byte minimum")]
    TooShort(usize),

    #[error("bad signature {0:02x?}, expected \"BM\"")]
    Signature([u8; 2]),

    #[error("file size field ({declared}) doesn't match actual size ({actual})")]
    FileSizeField { declared: u32, actual: usize },

    #[error("reserved fields are {reserved1:#06x} and {reserved2:#06x}, expected zero")]
    ReservedFields { reserved1: u16, reserved2: u16 },

    #[error("pixel data offset is {0:#x}, expected 0x36")]
    PixelOffset(u32),

    #[error("info header size is {0:#x}, expected 0x28")]
    InfoHeaderSize(u32),

    #[error("planes field is {0}, expected 1")]
    Planes(u16),

    #[error("bit depth {0} unsupported, expected 24")]
    BitDepth(u16),

    #[error("dimensions {width}x{height} must both be positive")]
    Dimensions { width: i32, height: i32 },

    #[error("reserved info header region is not zero")]
    ReservedRegion,
}

/// Content check that failed after the headers validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Corruption {
    #[error("dimensions imply {expected} bytes, file has {actual}")]
    SizeMismatch { expected: u64, actual: usize },

    #[error("non-zero padding after wire row {row}")]
    NonZeroPadding { row: usize },
}

/// Coarse classification of a [`BmpError`].
///
/// Each kind warrants a different reaction from the caller: reject the file,
/// report it as damaged, or treat it as an I/O problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    StructurallyInvalid,
    Corrupted,
    ReadFailure,
    WriteFailure,
    /// Limits, allocation failure or arithmetic overflow.
    Resource,
    Cancelled,
}

impl BmpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StructurallyInvalid(_) => ErrorKind::StructurallyInvalid,
            Self::Corrupted(_) => ErrorKind::Corrupted,
            Self::UnexpectedEof => ErrorKind::ReadFailure,
            #[cfg(feature = "std")]
            Self::Read(_) => ErrorKind::ReadFailure,
            #[cfg(feature = "std")]
            Self::Write(_) => ErrorKind::WriteFailure,
            Self::DimensionsTooLarge { .. }
            | Self::LimitExceeded(_)
            | Self::BufferTooSmall { .. }
            | Self::OutOfMemory(_) => ErrorKind::Resource,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl From<Malformation> for BmpError {
    fn from(m: Malformation) -> Self {
        BmpError::StructurallyInvalid(m)
    }
}

impl From<Corruption> for BmpError {
    fn from(c: Corruption) -> Self {
        BmpError::Corrupted(c)
    }
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
