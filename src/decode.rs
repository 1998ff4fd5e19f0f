use alloc::borrow::Cow;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::error::RawError;
use crate::layout::{ByteOrder, Layout};
use crate::limits::Limits;
use crate::pixel::{FormatEntry, PixelFormat, Strategy};
use crate::planar::planar_to_packed;
use crate::source::SourceBuffer;
use crate::validate::{Validation, validate};

/// Decoded image output. Pixels may be borrowed (zero-copy) or owned.
///
/// Rows are tightly packed: the stride is `width * format.bytes_per_pixel()`.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl<'a> DecodeOutput<'a> {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            format: self.format,
        }
    }

    /// Take the pixel buffer (copies if borrowed).
    pub fn into_vec(self) -> Vec<u8> {
        self.pixels.into_owned()
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    /// Whether the image has no pixels (a zero width or height).
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Bytes of row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        self.pixels.get(start..start + stride)
    }

    /// Bytes of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = x as usize * bpp;
        self.row(y)?.get(start..start + bpp)
    }

    /// 16-bit samples of a `Gray16` image, or `None` for other formats.
    pub fn samples16(&self) -> Option<Vec<u16>> {
        if self.format != PixelFormat::Gray16 {
            return None;
        }
        Some(
            self.pixels
                .chunks_exact(2)
                .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
                .collect(),
        )
    }

    pub(crate) fn new(pixels: Cow<'a, [u8]>, layout: &Layout, format: PixelFormat) -> Self {
        Self {
            pixels,
            width: layout.width,
            height: layout.height,
            format,
        }
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`RawError::LayoutMismatch`] if the pixel format doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], RawError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.format != P::format() {
            return Err(RawError::LayoutMismatch {
                expected: P::format(),
                actual: self.format,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`RawError::LayoutMismatch`] if the pixel format doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, RawError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    ///
    /// Returns [`RawError::LayoutMismatch`] if the pixel format doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, RawError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Typed pixels of a `Gray16` image, copied out of the byte buffer.
    ///
    /// Returns [`RawError::LayoutMismatch`] for any other format.
    #[cfg(feature = "rgb")]
    pub fn gray16_pixels(&self) -> Result<Vec<rgb::Gray<u16>>, RawError> {
        let samples = self.samples16().ok_or(RawError::LayoutMismatch {
            expected: PixelFormat::Gray16,
            actual: self.format,
        })?;
        Ok(samples.into_iter().map(rgb::Gray::new).collect())
    }

    /// Convert a `Gray16` image to an [`imgref::ImgVec`].
    ///
    /// Returns [`RawError::LayoutMismatch`] for any other format.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec_gray16(&self) -> Result<imgref::ImgVec<rgb::Gray<u16>>, RawError> {
        Ok(imgref::ImgVec::new(
            self.gray16_pixels()?,
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// Decode request builder for an in-memory raw buffer.
///
/// ```
/// use zenraw::{DecodeRequest, Layout, Limits, PixelFormat, Unstoppable};
///
/// let layout = Layout::new(2, 2, 1, 1);
/// let limits = Limits::none().with_max_pixels(1 << 24);
/// let image = DecodeRequest::new(&layout, &[10, 20, 30, 40])
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(image.format, PixelFormat::Gray8);
/// # Ok::<(), zenraw::RawError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    layout: Layout,
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(layout: &Layout, data: &'a [u8]) -> Self {
        Self {
            layout: *layout,
            data,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode, borrowing from the input where no reordering is needed.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput<'a>, RawError> {
        decode_layout(&self.layout, Cow::Borrowed(self.data), self.limits, &stop)
    }
}

/// Decode an owned source buffer. Passthrough formats reuse its allocation.
pub(crate) fn decode_buffer(
    layout: &Layout,
    buffer: SourceBuffer,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'static>, RawError> {
    decode_layout(layout, Cow::Owned(buffer.into_vec()), limits, stop)
}

fn decode_layout<'a>(
    layout: &Layout,
    data: Cow<'a, [u8]>,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, RawError> {
    // Format first: unsupported layouts never touch the buffer.
    let entry = FormatEntry::lookup(layout.channels, layout.element_size).ok_or(
        RawError::UnsupportedFormat {
            channels: layout.channels,
            element_size: layout.element_size,
        },
    )?;

    if let Some(limits) = limits {
        limits.check(layout)?;
    }

    if layout.expected_len().is_none() {
        return Err(RawError::DimensionsTooLarge {
            width: layout.width,
            height: layout.height,
        });
    }
    if let Validation::SizeMismatch { expected, actual } =
        validate(layout, true, data.len() as u64)
    {
        return Err(RawError::SizeMismatch { expected, actual });
    }

    let w = layout.width as usize;
    let h = layout.height as usize;

    stop.check()?;

    let pixels = match entry.strategy {
        Strategy::Passthrough => data,
        Strategy::Samples16 => {
            if layout.byte_order == native_byte_order() {
                data
            } else {
                if let Some(limits) = limits {
                    limits.check_memory(data.len() as u64)?;
                }
                Cow::Owned(swap_samples16(&data, w * 2, stop)?)
            }
        }
        Strategy::Rgb => {
            if layout.interleaved {
                data
            } else {
                if let Some(limits) = limits {
                    limits.check_memory(data.len() as u64)?;
                }
                Cow::Owned(planar_to_packed(&data, w, h, 3, stop)?)
            }
        }
    };

    log::debug!(
        "decoded {}x{} raw buffer as {:?} ({} bytes, borrowed: {})",
        layout.width,
        layout.height,
        entry.format,
        pixels.len(),
        matches!(pixels, Cow::Borrowed(_))
    );

    Ok(DecodeOutput::new(pixels, layout, entry.format))
}

fn native_byte_order() -> ByteOrder {
    if cfg!(target_endian = "big") {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    }
}

/// Reverse the byte order of every 2-byte sample.
fn swap_samples16(data: &[u8], row_bytes: usize, stop: &dyn Stop) -> Result<Vec<u8>, RawError> {
    let mut out = Vec::with_capacity(data.len());
    if row_bytes == 0 {
        return Ok(out);
    }
    for (row_idx, row) in data.chunks_exact(row_bytes).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for pair in row.chunks_exact(2) {
            let val = u16::from_ne_bytes([pair[0], pair[1]]);
            out.extend_from_slice(&val.swap_bytes().to_ne_bytes());
        }
    }
    Ok(out)
}
