//! Declared layout of a headerless raw buffer.
//!
//! A raw file carries no header, so everything about it (dimensions,
//! channel count, sample width, plane arrangement) comes from the caller.

use crate::pixel::PixelFormat;

/// Byte order of multi-byte samples in the source buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first. Matches how x86/ARM tools dump buffers.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// Declared raw buffer layout: `height` rows of `width` pixels, each pixel
/// `channels` samples of `element_size` bytes.
///
/// Values are plain data. A layout with a zero field is representable; it
/// describes an empty image (or, for `element_size == 0`, an unsupported one).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    pub height: u32,
    pub width: u32,
    pub channels: u32,
    /// Bytes per single channel sample. The decoder understands 1, 2 and 4.
    pub element_size: u32,
    /// `true` for packed (R,G,B,R,G,B,...), `false` for planar (all R, all G, all B).
    pub interleaved: bool,
    /// Byte order of 2-byte samples.
    pub byte_order: ByteOrder,
}

impl Layout {
    /// Planar, little-endian layout.
    pub fn new(height: u32, width: u32, channels: u32, element_size: u32) -> Self {
        Self {
            height,
            width,
            channels,
            element_size,
            interleaved: false,
            byte_order: ByteOrder::Little,
        }
    }

    pub fn with_interleaved(mut self, interleaved: bool) -> Self {
        self.interleaved = interleaved;
        self
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Number of pixels (width * height). Cannot overflow `u64`.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Bytes in one channel plane (width * height * element_size).
    pub fn plane_len(&self) -> Option<u64> {
        self.pixel_count().checked_mul(u64::from(self.element_size))
    }

    /// Total byte count a source must have to match this layout.
    ///
    /// Returns `None` only if the product does not fit in 64 bits.
    pub fn expected_len(&self) -> Option<u64> {
        self.plane_len()?.checked_mul(u64::from(self.channels))
    }

    /// Output pixel format selected for this layout.
    pub fn format(&self) -> PixelFormat {
        PixelFormat::select(self.channels, self.element_size)
    }

    /// Describe what decoding this layout would produce, without touching data.
    pub fn probe(&self) -> LayoutInfo {
        LayoutInfo {
            width: self.width,
            height: self.height,
            format: self.format(),
            expected_len: self.expected_len(),
        }
    }
}

/// Result of [`Layout::probe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutInfo {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Required source size, `None` on 64-bit overflow.
    pub expected_len: Option<u64>,
}
