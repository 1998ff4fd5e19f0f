/// Output pixel format.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// Single channel, 16-bit grayscale (native endian).
    Gray16,
    /// 3 channels, 8-bit RGB, packed.
    Rgb8,
    /// No decoding defined for the declared channel/element combination.
    Unsupported,
}

impl PixelFormat {
    /// Look up the format for `channels` samples of `element_size` bytes.
    ///
    /// Any combination not in the table is [`PixelFormat::Unsupported`].
    pub fn select(channels: u32, element_size: u32) -> Self {
        FormatEntry::lookup(channels, element_size).map_or(Self::Unsupported, |e| e.format)
    }

    /// Bytes per output pixel. Zero for `Unsupported`.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Gray16 => 2,
            Self::Rgb8 => 3,
            Self::Unsupported => 0,
        }
    }

    /// Number of channels. Zero for `Unsupported`.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 => 1,
            Self::Rgb8 => 3,
            Self::Unsupported => 0,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// How source bytes become output bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// Source bytes are already the output bytes.
    Passthrough,
    /// 2-byte samples, converted from the declared byte order to native.
    Samples16,
    /// Packed if the layout is interleaved, plane transpose otherwise.
    Rgb,
}

/// One row of the `(channels, element_size)` format matrix.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FormatEntry {
    pub channels: u32,
    pub element_size: u32,
    pub format: PixelFormat,
    pub strategy: Strategy,
}

pub(crate) const FORMAT_TABLE: &[FormatEntry] = &[
    FormatEntry {
        channels: 1,
        element_size: 1,
        format: PixelFormat::Gray8,
        strategy: Strategy::Passthrough,
    },
    FormatEntry {
        channels: 1,
        element_size: 2,
        format: PixelFormat::Gray16,
        strategy: Strategy::Samples16,
    },
    FormatEntry {
        channels: 3,
        element_size: 1,
        format: PixelFormat::Rgb8,
        strategy: Strategy::Rgb,
    },
];

impl FormatEntry {
    pub(crate) fn lookup(channels: u32, element_size: u32) -> Option<&'static FormatEntry> {
        FORMAT_TABLE
            .iter()
            .find(|e| e.channels == channels && e.element_size == element_size)
    }
}

/// Typed pixels that a decoded buffer can be viewed as in place.
///
/// 16-bit gray has no in-place view over bytes; use
/// [`DecodeOutput::gray16_pixels`](crate::DecodeOutput::gray16_pixels).
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    fn format() -> PixelFormat;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::Gray<u8> {
    fn format() -> PixelFormat {
        PixelFormat::Gray8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::Rgb<u8> {
    fn format() -> PixelFormat {
        PixelFormat::Rgb8
    }
}
