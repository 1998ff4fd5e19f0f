//! Planar to packed sample reordering.
//!
//! A planar buffer stores each channel as a full `width * height` plane,
//! one after another. Packed output stores a pixel's samples together.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::RawError;

/// Reorder `channels` consecutive planes of one-byte samples into packed pixels.
///
/// `data` must hold exactly `width * height * channels` bytes. Rows and columns
/// keep their row-major order inside each plane.
pub(crate) fn planar_to_packed(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, RawError> {
    let plane_len = width * height;
    if plane_len == 0 || channels == 0 {
        return Ok(Vec::new());
    }
    debug_assert_eq!(data.len(), plane_len * channels);

    // Pass 1: locate the planes at 0, plane_len, 2 * plane_len, ...
    let planes: Vec<&[u8]> = data.chunks_exact(plane_len).take(channels).collect();
    if planes.len() != channels {
        return Err(RawError::SizeMismatch {
            expected: (plane_len * channels) as u64,
            actual: data.len() as u64,
        });
    }

    // Pass 2: write interleaved pixels row by row.
    let mut out = vec![0u8; plane_len * channels];
    for (y, out_row) in out.chunks_exact_mut(width * channels).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let row_start = y * width;
        for (x, px) in out_row.chunks_exact_mut(channels).enumerate() {
            for (sample, plane) in px.iter_mut().zip(&planes) {
                *sample = plane[row_start + x];
            }
        }
    }
    Ok(out)
}
