//! Size validation of a raw source against its declared layout.
//!
//! A headerless buffer has exactly one integrity check available: its total
//! byte count must equal the count the layout implies. The comparison is
//! strict equality, so truncated and oversized files both fail.

use alloc::string::String;

use crate::error::RawError;
use crate::layout::Layout;

/// Outcome of checking a source against a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    Valid,
    SourceMissing,
    SizeMismatch { expected: u64, actual: u64 },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Convert to a `Result`, naming `path` in the missing-source error.
    pub fn into_result(self, path: &str) -> Result<(), RawError> {
        match self {
            Self::Valid => Ok(()),
            Self::SourceMissing => Err(RawError::SourceMissing {
                path: String::from(path),
            }),
            Self::SizeMismatch { expected, actual } => {
                Err(RawError::SizeMismatch { expected, actual })
            }
        }
    }
}

/// Check `actual_len` bytes against `layout`.
///
/// A missing source short-circuits before any size arithmetic. A layout
/// whose byte count overflows 64 bits can match no real source and is
/// reported as a mismatch against `u64::MAX`.
pub fn validate(layout: &Layout, source_exists: bool, actual_len: u64) -> Validation {
    if !source_exists {
        return Validation::SourceMissing;
    }
    let expected = layout.expected_len().unwrap_or(u64::MAX);
    if expected != actual_len {
        log::debug!(
            "raw size mismatch: layout {:?} expects {} bytes, got {}",
            layout,
            expected,
            actual_len
        );
        return Validation::SizeMismatch {
            expected,
            actual: actual_len,
        };
    }
    Validation::Valid
}

/// Validate a source through a [`ByteSource`](crate::ByteSource).
///
/// `size_bytes` is only queried when the source exists. A failing size
/// query is a read failure, not a validation verdict.
pub fn validate_source<S: crate::source::ByteSource + ?Sized>(
    layout: &Layout,
    source: &S,
    path: &str,
) -> Result<Validation, RawError> {
    if !source.exists(path) {
        return Ok(Validation::SourceMissing);
    }
    let actual = source.size_bytes(path)?;
    Ok(validate(layout, true, actual))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_size_is_valid() {
        assert_eq!(validate(&Layout::new(2, 2, 1, 1), true, 4), Validation::Valid);
        assert_eq!(validate(&Layout::new(1, 2, 1, 2), true, 4), Validation::Valid);
    }

    #[test]
    fn short_and_long_sources_mismatch() {
        let layout = Layout::new(2, 2, 1, 1);
        assert_eq!(
            validate(&layout, true, 3),
            Validation::SizeMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(
            validate(&layout, true, 5),
            Validation::SizeMismatch {
                expected: 4,
                actual: 5
            }
        );
    }

    #[test]
    fn missing_source_wins_over_size() {
        assert_eq!(
            validate(&Layout::new(2, 2, 1, 1), false, 4),
            Validation::SourceMissing
        );
    }

    #[test]
    fn overflowing_layout_never_validates() {
        let layout = Layout::new(u32::MAX, u32::MAX, u32::MAX, 4);
        assert!(!validate(&layout, true, u64::MAX - 1).is_valid());
    }

    #[test]
    fn into_result_carries_details() {
        let err = Validation::SizeMismatch {
            expected: 4,
            actual: 3,
        }
        .into_result("a.raw")
        .unwrap_err();
        assert!(matches!(
            err,
            RawError::SizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
        let err = Validation::SourceMissing.into_result("a.raw").unwrap_err();
        assert!(matches!(err, RawError::SourceMissing { ref path } if path == "a.raw"));
        assert!(Validation::Valid.into_result("a.raw").is_ok());
    }
}
