//! Path to pixels: existence check, size validation, read, decode.

use alloc::string::String;

use enough::Stop;

use crate::decode::{DecodeOutput, decode_buffer};
use crate::error::RawError;
use crate::layout::Layout;
use crate::limits::Limits;
use crate::source::ByteSource;
use crate::validate::{Validation, validate};

/// Load request builder: read a raw file through a [`ByteSource`] and decode it.
#[derive(Clone, Debug)]
pub struct LoadRequest<'a> {
    layout: Layout,
    limits: Option<&'a Limits>,
}

impl<'a> LoadRequest<'a> {
    pub fn new(layout: &Layout) -> Self {
        Self {
            layout: *layout,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Load `path` from `source` and decode it.
    ///
    /// Checks run in order: the source must exist, its size must match the
    /// layout, and the layout must have a decoding. Only then is the source
    /// read. A source that changes size between the check and the read is
    /// reported as a size mismatch.
    pub fn load<S: ByteSource + ?Sized>(
        self,
        source: &S,
        path: &str,
        stop: impl Stop,
    ) -> Result<DecodeOutput<'static>, RawError> {
        let layout = &self.layout;

        if !source.exists(path) {
            log::warn!("raw source {path} does not exist");
            return Err(RawError::SourceMissing {
                path: String::from(path),
            });
        }

        let size = source.size_bytes(path)?;
        log::debug!("raw source {path}: {size} bytes, layout {layout:?}");
        if let Some(limits) = self.limits {
            limits.check_file_size(size)?;
            limits.check_memory(size)?;
        }

        validate(layout, true, size).into_result(path).inspect_err(|e| {
            log::warn!("raw source {path} rejected: {e}");
        })?;

        let format = layout.format();
        if !format.is_supported() {
            log::warn!(
                "raw source {path}: no decoding for {} channel(s) of {}-byte elements",
                layout.channels,
                layout.element_size
            );
            return Err(RawError::UnsupportedFormat {
                channels: layout.channels,
                element_size: layout.element_size,
            });
        }

        stop.check()?;
        let buffer = source.read_all(path).inspect_err(|e| {
            log::warn!("raw source {path} could not be read: {e}");
        })?;

        if let Validation::SizeMismatch { expected, actual } =
            validate(layout, true, buffer.len() as u64)
        {
            log::warn!("raw source {path} changed size during read: {actual} bytes");
            return Err(RawError::SizeMismatch { expected, actual });
        }

        log::debug!("raw source {path}: decoding as {format:?}");
        decode_buffer(layout, buffer, self.limits, &stop)
    }
}
