//! raw container bytes

use std::ops::{Range, RangeBounds};

use crate::read::{ReadError, ReadScalar};

/// A reference to raw binary container data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data. All multi-byte reads are
/// little-endian, as the ZI format requires.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    pub fn read_at<T: ReadScalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Interpret a range of the data as a slice of packed records.
    pub fn read_array<T: bytemuck::AnyBitPattern>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], ReadError> {
        let bytes = self.bytes.get(range).ok_or(ReadError::OutOfBounds)?;
        bytemuck::try_cast_slice(bytes).map_err(|_| ReadError::InvalidArrayLen)
    }

    pub(crate) fn check_in_bounds(&self, offset: usize) -> Result<(), ReadError> {
        self.bytes
            .get(..offset)
            .ok_or(ReadError::OutOfBounds)
            .map(|_| ())
    }

    pub(crate) fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uint24::Uint24;

    #[test]
    fn scalar_reads_are_little_endian() {
        let data = FontData::new(&[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(data.read_at::<u8>(0), Ok(0x01));
        assert_eq!(data.read_at::<u16>(0), Ok(0x0201));
        assert_eq!(data.read_at::<Uint24>(1), Ok(Uint24::new(0x040302)));
        assert_eq!(data.read_at::<u32>(0), Ok(0x04030201));
        assert_eq!(data.read_at::<u32>(1), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn record_casting() {
        let data = FontData::new(&[1, 2, 3, 4, 5, 6]);
        let words: &[[u8; 2]] = data.read_array(0..6).unwrap();
        assert_eq!(words, [[1, 2], [3, 4], [5, 6]]);
        assert_eq!(
            data.read_array::<[u8; 4]>(0..6),
            Err(ReadError::InvalidArrayLen)
        );
    }
}
