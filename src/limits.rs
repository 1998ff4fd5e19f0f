use crate::error::RawError;
use crate::layout::Layout;

/// Resource limits for decode/load operations.
///
/// All fields default to `None` (no limit). Every check runs before the
/// source is read or an output buffer is allocated; `max_memory_bytes`
/// bounds both the read buffer and any reordered output.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for output buffer allocation.
    pub max_memory_bytes: Option<u64>,
    /// Maximum size of the source file in bytes.
    pub max_file_size: Option<u64>,
}

impl Limits {
    /// No limits at all. Same as `Limits::default()`.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_max_width(mut self, width: u64) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_max_height(mut self, height: u64) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Check layout dimensions against limits.
    pub(crate) fn check(&self, layout: &Layout) -> Result<(), RawError> {
        let (width, height) = (layout.width, layout.height);
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(RawError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(RawError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = layout.pixel_count();
            if pixels > max_px {
                return Err(RawError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an output allocation is within memory limits.
    pub(crate) fn check_memory(&self, bytes: u64) -> Result<(), RawError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes > max_mem {
                return Err(RawError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }

    /// Check a source size before reading it.
    pub(crate) fn check_file_size(&self, bytes: u64) -> Result<(), RawError> {
        if let Some(max_file) = self.max_file_size {
            if bytes > max_file {
                return Err(RawError::LimitExceeded(alloc::format!(
                    "source size {bytes} bytes exceeds limit {max_file}"
                )));
            }
        }
        Ok(())
    }
}
