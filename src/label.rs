//! Mapping from viewer form labels to layout fields.
//!
//! Front ends typically offer a channel dropdown ("Y channel", "RGB planar",
//! "RGB packed") and an element type dropdown ("UINT8", "INT16", ...). These
//! helpers turn that text into the numbers a [`Layout`] needs.

use alloc::string::ToString;

use crate::error::RawError;
use crate::layout::Layout;

/// Channel arrangement chosen in a viewer form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// Single luma channel.
    Y,
    /// Three full-size planes: all R, then all G, then all B.
    RgbPlanar,
    /// R,G,B per pixel.
    RgbPacked,
}

impl ChannelMode {
    /// Parse a channel label. Unknown text is an error.
    pub fn from_label(label: &str) -> Result<Self, RawError> {
        match label.trim() {
            "Y channel" => Ok(Self::Y),
            "RGB planar" => Ok(Self::RgbPlanar),
            "RGB packed" => Ok(Self::RgbPacked),
            other => Err(RawError::UnknownLabel(other.to_string())),
        }
    }

    /// Parse a channel label, treating unknown text as 3-channel planar.
    ///
    /// Matches older viewers that silently fell back to RGB.
    pub fn from_label_lenient(label: &str) -> Self {
        Self::from_label(label).unwrap_or(Self::RgbPlanar)
    }

    pub fn channels(self) -> u32 {
        match self {
            Self::Y => 1,
            Self::RgbPlanar | Self::RgbPacked => 3,
        }
    }

    /// Whether samples of one pixel are adjacent. Single-channel data is
    /// trivially interleaved.
    pub fn interleaved(self) -> bool {
        !matches!(self, Self::RgbPlanar)
    }
}

impl core::str::FromStr for ChannelMode {
    type Err = RawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

/// Element size in bytes for an element type label.
///
/// Unknown labels map to 0, which no format accepts, so the layout decodes
/// as unsupported instead of guessing.
pub fn element_size_from_label(label: &str) -> u32 {
    match label.trim() {
        "UINT8" => 1,
        "UINT16" | "INT16" => 2,
        "UINT32" | "INT32" => 4,
        _ => 0,
    }
}

impl Layout {
    /// Build a layout from viewer form values.
    ///
    /// The channel label is parsed strictly; see [`ChannelMode::from_label_lenient`]
    /// for the fallback behavior.
    pub fn from_labels(
        height: u32,
        width: u32,
        channel_label: &str,
        element_label: &str,
    ) -> Result<Self, RawError> {
        let mode = ChannelMode::from_label(channel_label)?;
        Ok(
            Layout::new(height, width, mode.channels(), element_size_from_label(element_label))
                .with_interleaved(mode.interleaved()),
        )
    }
}
