//! Traits for interpreting container data

use crate::font_data::FontData;
use crate::uint24::Uint24;

/// A scalar that can be read from little-endian container bytes.
pub trait ReadScalar: Sized {
    /// The number of bytes occupied in the container.
    const RAW_BYTE_LEN: usize;

    /// Read an instance from the front of `bytes`, if enough bytes exist.
    fn read(bytes: &[u8]) -> Option<Self>;
}

impl ReadScalar for u8 {
    const RAW_BYTE_LEN: usize = 1;

    fn read(bytes: &[u8]) -> Option<Self> {
        bytes.first().copied()
    }
}

impl ReadScalar for u16 {
    const RAW_BYTE_LEN: usize = 2;

    fn read(bytes: &[u8]) -> Option<Self> {
        bytes.get(..2).map(|b| u16::from_le_bytes([b[0], b[1]]))
    }
}

impl ReadScalar for u32 {
    const RAW_BYTE_LEN: usize = 4;

    fn read(bytes: &[u8]) -> Option<Self> {
        bytes
            .get(..4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

impl ReadScalar for Uint24 {
    const RAW_BYTE_LEN: usize = 3;

    fn read(bytes: &[u8]) -> Option<Self> {
        bytes.get(..3).map(|b| Uint24::from_le_bytes([b[0], b[1], b[2]]))
    }
}

/// A type that can be read from raw container data.
///
/// This trait is responsible for ensuring the input data is consistent:
/// that the fixed fields are present, and that any lengths derived from
/// them are not out-of-bounds.
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// An error that occurs when reading container data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    OutOfBounds,
    InvalidSignature(u8),
    InvalidVersion(u8),
    InvalidArrayLen,
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::InvalidSignature(byte) => {
                write!(f, "Invalid container signature 0x{byte:02X}")
            }
            ReadError::InvalidVersion(version) => write!(f, "Unsupported version {version}"),
            ReadError::InvalidArrayLen => {
                write!(f, "Specified array length not a multiple of item size")
            }
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
        }
    }
}

impl std::error::Error for ReadError {}
