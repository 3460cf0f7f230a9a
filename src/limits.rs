use crate::error::BmpError;

/// Caps on what a decode may allocate.
///
/// Checked once the headers validate and before any pixel buffer exists,
/// so a hostile header costs nothing. `None` leaves that axis unbounded.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Upper bound on `width * height`.
    pub max_pixels: Option<u64>,
    /// Upper bound on the decoded buffer, at 3 bytes per pixel.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject a `width`x`height` image whose size or buffer would exceed
    /// any cap.
    pub(crate) fn check_buffer(&self, width: u32, height: u32) -> Result<(), BmpError> {
        let (w, h) = (u64::from(width), u64::from(height));
        let pixels = w * h;
        let bytes = pixels.saturating_mul(3);

        let exceeded = if self.max_width.is_some_and(|max| w > max) {
            Some(("width", w, self.max_width))
        } else if self.max_height.is_some_and(|max| h > max) {
            Some(("height", h, self.max_height))
        } else if self.max_pixels.is_some_and(|max| pixels > max) {
            Some(("pixel count", pixels, self.max_pixels))
        } else if self.max_memory_bytes.is_some_and(|max| bytes > max) {
            Some(("buffer bytes", bytes, self.max_memory_bytes))
        } else {
            None
        };

        match exceeded {
            Some((what, value, Some(max))) => Err(BmpError::LimitExceeded(alloc::format!(
                "{what} {value} exceeds limit {max}"
            ))),
            _ => Ok(()),
        }
    }
}
