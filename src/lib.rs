//! # zenraw
//!
//! Loader for headerless raw pixel buffers: validates a byte buffer against an
//! externally declared layout and decodes it into a display-ready pixel buffer.
//!
//! A raw file has no header, so the caller supplies the layout: height, width,
//! channel count, bytes per sample and whether channels are interleaved or
//! stored as separate planes. The only integrity check available is that the
//! buffer length equals `height * width * channels * element_size` exactly.
//!
//! ## Supported Layouts
//!
//! | channels | element size | output                                    |
//! |----------|--------------|-------------------------------------------|
//! | 1        | 1            | [`PixelFormat::Gray8`], zero-copy         |
//! | 1        | 2            | [`PixelFormat::Gray16`], native endian    |
//! | 3        | 1            | [`PixelFormat::Rgb8`], packed or planar   |
//!
//! Every other combination is [`RawError::UnsupportedFormat`].
//!
//! ## Zero-Copy Decoding
//!
//! Gray8, packed RGB8, and Gray16 whose byte order matches the host are
//! returned as a borrowed slice of the input. Planar RGB is reordered into
//! packed pixels, and 16-bit samples of foreign byte order are swapped.
//!
//! ## Non-Goals
//!
//! - Compressed or header-bearing formats (PNM, BMP, PNG, ...)
//! - Color space conversion
//! - Encoding pixels back to raw bytes
//!
//! ## Usage
//!
//! ```no_run
//! use zenraw::{FileSource, Layout, LoadRequest, Unstoppable};
//!
//! // 640x480 planar RGB
//! let layout = Layout::new(480, 640, 3, 1).with_interleaved(false);
//! let image = LoadRequest::new(&layout).load(&FileSource, "frame.rgb", Unstoppable)?;
//! println!("{}x{} {:?}", image.width, image.height, image.format);
//! # Ok::<(), zenraw::RawError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod label;
mod layout;
mod limits;
mod load;
mod pixel;
mod planar;
mod source;
mod validate;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::RawError;
pub use label::{ChannelMode, element_size_from_label};
pub use layout::{ByteOrder, Layout, LayoutInfo};
pub use limits::Limits;
pub use load::LoadRequest;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelFormat;
#[cfg(feature = "std")]
pub use source::FileSource;
pub use source::{ByteSource, MemorySource, SourceBuffer};
pub use validate::{Validation, validate, validate_source};

/// Decode an in-memory raw buffer with the given layout.
pub fn decode<'a>(
    layout: &Layout,
    data: &'a [u8],
    stop: impl Stop,
) -> Result<DecodeOutput<'a>, RawError> {
    DecodeRequest::new(layout, data).decode(stop)
}

/// Decode an owned buffer, reusing its allocation when no reordering is needed.
pub fn decode_owned(
    layout: &Layout,
    buffer: SourceBuffer,
    stop: impl Stop,
) -> Result<DecodeOutput<'static>, RawError> {
    decode::decode_buffer(layout, buffer, None, &stop)
}

/// Load `path` from `source` and decode it with the given layout.
pub fn load<S: ByteSource + ?Sized>(
    source: &S,
    path: &str,
    layout: &Layout,
    stop: impl Stop,
) -> Result<DecodeOutput<'static>, RawError> {
    LoadRequest::new(layout).load(source, path, stop)
}

/// Load a file from the local file system and decode it with the given layout.
#[cfg(feature = "std")]
pub fn load_file(
    path: &str,
    layout: &Layout,
    stop: impl Stop,
) -> Result<DecodeOutput<'static>, RawError> {
    load(&FileSource, path, layout, stop)
}
