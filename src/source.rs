//! Byte sources: bounded, endian-aware views over raw bytes.
//!
//! A [`ByteSource`] is what a [`Reader`](crate::Reader) walks. It either borrows its bytes
//! (a file loaded through [`BinaryFile`], a slice of a parent source) or owns them (the
//! output of a [`Transform`](crate::Transform) applied to a nested block).

use crate::error::ReadError;
use crate::value::Value;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Byte order for multi-byte integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// Byte order of the machine we're running on.
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }
}

impl Default for Endianness {
    fn default() -> Self {
        Endianness::native()
    }
}

/// Anything that can hand the engine a whole buffer of bytes.
pub trait Binary {
    fn bytes(&self) -> &[u8];
    fn endianness(&self) -> Endianness;
    /// Human-readable name, used in diagnostics only.
    fn label(&self) -> &str;
}

/// A file loaded entirely into memory.
#[derive(Debug, Clone)]
pub struct BinaryFile {
    path: PathBuf,
    label: String,
    endianness: Endianness,
    data: Vec<u8>,
}

impl BinaryFile {
    pub fn open(
        path: impl AsRef<Path>,
        label: impl Into<String>,
        endianness: Endianness,
    ) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = std::fs::read(&path)?;
        tracing::debug!(path = %path.display(), len = data.len(), "loaded binary file");
        Ok(BinaryFile {
            path,
            label: label.into(),
            endianness,
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> ByteSource<'_> {
        ByteSource::from_binary(self)
    }
}

impl Binary for BinaryFile {
    fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn endianness(&self) -> Endianness {
        self.endianness
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Immutable view over bytes with a declared endianness.
///
/// Every access is bounds-checked: a request for `[start, start + length)` past the end of
/// the buffer fails with [`ReadError::OutOfBounds`].
#[derive(Debug, Clone)]
pub struct ByteSource<'a> {
    data: Cow<'a, [u8]>,
    endianness: Endianness,
    label: Cow<'a, str>,
}

impl<'a> ByteSource<'a> {
    pub fn new(data: &'a [u8], endianness: Endianness) -> Self {
        ByteSource {
            data: Cow::Borrowed(data),
            endianness,
            label: Cow::Borrowed("<memory>"),
        }
    }

    pub fn owned(data: Vec<u8>, endianness: Endianness) -> ByteSource<'static> {
        ByteSource {
            data: Cow::Owned(data),
            endianness,
            label: Cow::Borrowed("<memory>"),
        }
    }

    pub fn from_binary<B: Binary + ?Sized>(binary: &'a B) -> Self {
        ByteSource {
            data: Cow::Borrowed(binary.bytes()),
            endianness: binary.endianness(),
            label: Cow::Borrowed(binary.label()),
        }
    }

    pub fn with_label(mut self, label: impl Into<Cow<'a, str>>) -> Self {
        self.label = label.into();
        self
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Borrow `length` bytes starting at `start`.
    pub fn slice(&self, start: u64, length: u64) -> Result<&[u8], ReadError> {
        let available = self.len();
        match start.checked_add(length) {
            Some(end) if end <= available => Ok(&self.data[start as usize..end as usize]),
            _ => Err(ReadError::OutOfBounds {
                start,
                length,
                available,
            }),
        }
    }

    /// Decode a `width_bits` integer at `start` using this source's byte order.
    ///
    /// Signed widths are read as two's complement and sign-extended.
    pub fn decode_int(&self, start: u64, width_bits: u32, signed: bool) -> Result<Value, ReadError> {
        let size = int_size(width_bits)?;
        let bytes = self.slice(start, size)?;
        let n = bytes.len();
        Ok(match (signed, self.endianness) {
            (false, Endianness::Big) => Value::Unsigned(BigEndian::read_uint(bytes, n)),
            (false, Endianness::Little) => Value::Unsigned(LittleEndian::read_uint(bytes, n)),
            (true, Endianness::Big) => Value::Signed(BigEndian::read_int(bytes, n)),
            (true, Endianness::Little) => Value::Signed(LittleEndian::read_int(bytes, n)),
        })
    }
}

/// Byte size of a supported integer width.
pub(crate) fn int_size(width_bits: u32) -> Result<u64, ReadError> {
    match width_bits {
        8 | 16 | 32 | 64 => Ok(u64::from(width_bits / 8)),
        other => Err(ReadError::InvalidWidth(other)),
    }
}
