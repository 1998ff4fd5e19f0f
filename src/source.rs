//! Byte sources: where raw buffers are loaded from.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::RawError;

/// An owned, fully loaded raw buffer.
///
/// Never modified after loading; decoding consumes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceBuffer {
    bytes: Vec<u8>,
}

impl SourceBuffer {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Vec<u8>> for SourceBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for SourceBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Something raw buffers can be loaded from, addressed by path.
pub trait ByteSource {
    fn exists(&self, path: &str) -> bool;

    /// Size of the source in bytes, without reading it.
    fn size_bytes(&self, path: &str) -> Result<u64, RawError>;

    /// Read the whole source.
    ///
    /// Fails with [`RawError::ReadFailure`] if the source vanished or became
    /// unreadable after [`exists`](Self::exists) said it was there.
    fn read_all(&self, path: &str) -> Result<SourceBuffer, RawError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &S {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn size_bytes(&self, path: &str) -> Result<u64, RawError> {
        (**self).size_bytes(path)
    }

    fn read_all(&self, path: &str) -> Result<SourceBuffer, RawError> {
        (**self).read_all(path)
    }
}

/// In-memory sources keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: Vec<u8>) -> Option<Vec<u8>> {
        self.files.insert(path.into(), bytes)
    }

    pub fn with_file(mut self, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }
}

impl ByteSource for MemorySource {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn size_bytes(&self, path: &str) -> Result<u64, RawError> {
        self.files
            .get(path)
            .map(|b| b.len() as u64)
            .ok_or_else(|| RawError::ReadFailure(alloc::format!("{path}: no such entry")))
    }

    fn read_all(&self, path: &str) -> Result<SourceBuffer, RawError> {
        self.files
            .get(path)
            .map(|b| SourceBuffer::new(b.clone()))
            .ok_or_else(|| RawError::ReadFailure(alloc::format!("{path}: no such entry")))
    }
}

/// Files on the local file system.
///
/// Each read opens the file, reads it to the end and closes it before
/// returning, on success and on error alike.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSource;

#[cfg(feature = "std")]
impl FileSource {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "std")]
impl ByteSource for FileSource {
    fn exists(&self, path: &str) -> bool {
        std::path::Path::new(path).is_file()
    }

    fn size_bytes(&self, path: &str) -> Result<u64, RawError> {
        std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| RawError::ReadFailure(alloc::format!("{path}: {e}")))
    }

    fn read_all(&self, path: &str) -> Result<SourceBuffer, RawError> {
        use std::io::Read as _;

        let read_err = |e: std::io::Error| RawError::ReadFailure(alloc::format!("{path}: {e}"));
        let mut file = std::fs::File::open(path).map_err(read_err)?;
        let hint = file.metadata().map(|m| m.len() as usize).unwrap_or(0);
        let mut bytes = Vec::with_capacity(hint);
        file.read_to_end(&mut bytes).map_err(read_err)?;
        Ok(SourceBuffer::new(bytes))
    }
}
