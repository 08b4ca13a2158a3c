//! Errors that occur while building or writing a container

use crate::read::ReadError;

/// An error occurred while assembling or writing a container.
#[derive(Debug)]
pub enum Error {
    /// Raster heights of zero cannot be represented.
    ZeroHeight,
    /// The description string exceeds the 8-bit length field.
    DescriptionTooLong(usize),
    /// A glyph's pixel buffer does not match `width * height`.
    GlyphRasterMismatch {
        codepoint: u16,
        expected: usize,
        actual: usize,
    },
    /// A glyph's encoded payload exceeds the 16-bit length field.
    PayloadTooLong { codepoint: u16, len: usize },
    /// The glyph payload region outgrew the 24-bit offset field, even
    /// with offsets stored in eighths.
    FontTooLarge,
    /// The container could not be parsed back.
    Read(ReadError),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroHeight => write!(f, "Font height must be at least 1"),
            Error::DescriptionTooLong(len) => {
                write!(f, "Description is {len} bytes; the limit is 255")
            }
            Error::GlyphRasterMismatch {
                codepoint,
                expected,
                actual,
            } => write!(
                f,
                "Glyph {codepoint:#06x}: raster has {actual} pixels, expected {expected}"
            ),
            Error::PayloadTooLong { codepoint, len } => {
                write!(f, "Glyph {codepoint:#06x}: {len} byte payload overflows length field")
            }
            Error::FontTooLarge => write!(f, "Glyph data region exceeds the addressable range"),
            Error::Read(inner) => inner.fmt(f),
            Error::Io(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<ReadError> for Error {
    fn from(src: ReadError) -> Error {
        Error::Read(src)
    }
}

impl From<std::io::Error> for Error {
    fn from(src: std::io::Error) -> Error {
        Error::Io(src)
    }
}
