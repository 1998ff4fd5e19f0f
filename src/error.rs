use alloc::string::String;
use enough::StopReason;

/// Errors from raw buffer validation, decoding and loading.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RawError {
    #[error("source not found: {path}")]
    SourceMissing { path: String },

    #[error("size mismatch: layout expects {expected} bytes, source has {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("unsupported format: {channels} channel(s) of {element_size}-byte elements")]
    UnsupportedFormat { channels: u32, element_size: u32 },

    #[error("unrecognized layout label: {0:?}")]
    UnknownLabel(String),

    #[error("read failure: {0}")]
    ReadFailure(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel format mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelFormat,
        actual: crate::PixelFormat,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for RawError {
    fn from(r: StopReason) -> Self {
        RawError::Cancelled(r)
    }
}
