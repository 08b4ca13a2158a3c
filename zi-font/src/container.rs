//! The ZI container layout: header, description, character map, payloads.
//!
//! [`ZiFont`] is a zero-copy view that validates the fixed header and
//! locates the pieces; it does no glyph decoding. For the owned,
//! fully-decoded representation see [`Font`](crate::Font).

use bytemuck::AnyBitPattern;

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::uint24::Uint24;

/// Length of the fixed file header.
pub const HEADER_LEN: usize = 0x2C;
/// First byte of every ZI file.
pub const SIGNATURE: u8 = 0x04;
/// The single container version this crate reads and writes.
pub const VERSION: u8 = 6;
/// Size of one character-map record.
pub const CHAR_MAP_RECORD_LEN: usize = 10;
/// Bit 0 of the flags byte: stored start offsets are divided by 8.
pub const OFFSETS_ARE_EIGHTHS: u8 = 0x01;

/// Byte positions of the header fields this crate interprets.
///
/// The remaining header bytes have no known meaning; working files carry
/// fixed values for them (see [`write`](crate::dump_font)).
pub(crate) mod header {
    pub const SIGNATURE: usize = 0x00;
    pub const HEIGHT: usize = 0x07;
    pub const GLYPH_COUNT: usize = 0x0c;
    pub const VERSION: usize = 0x10;
    pub const DESC_LEN: usize = 0x11;
    pub const TOTAL_LEN: usize = 0x14;
    pub const DATA_ADDR: usize = 0x18;
    pub const VARIABLE_WIDTH: usize = 0x1f;
    pub const DESC_SHOWN_LEN: usize = 0x20;
    pub const FLAGS: usize = 0x21;
    pub const SUBSET_ACTUAL: usize = 0x24;
}

/// One 10-byte character-map record.
///
/// Stored little-endian and tightly packed, so the whole map can be cast
/// straight out of the file. The two reserved bytes are written as zero
/// and never interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AnyBitPattern)]
#[repr(C)]
pub struct CharMapRecord {
    codepoint: [u8; 2],
    width: u8,
    reserved: [u8; 2],
    start_offset: [u8; 3],
    payload_len: [u8; 2],
}

impl CharMapRecord {
    pub fn codepoint(&self) -> u16 {
        u16::from_le_bytes(self.codepoint)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Start of the glyph payload, in bytes from the start of the character
    /// map, scaled down by 8 when the container's eighths flag is set.
    pub fn start_offset(&self) -> Uint24 {
        Uint24::from_le_bytes(self.start_offset)
    }

    /// Payload length in bytes, including the mode marker.
    pub fn payload_len(&self) -> u16 {
        u16::from_le_bytes(self.payload_len)
    }
}

/// A validated view over the bytes of a ZI container.
#[derive(Clone, Debug)]
pub struct ZiFont<'a> {
    data: FontData<'a>,
    height: u8,
    glyph_count: u32,
    total_len: u32,
    data_addr: u32,
    desc_shown_len: u8,
    flags: u8,
    description: &'a [u8],
    char_map: &'a [CharMapRecord],
}

impl<'a> ZiFont<'a> {
    /// Create a view from complete container bytes.
    pub fn new(bytes: &'a [u8]) -> Result<Self, ReadError> {
        Self::read(FontData::new(bytes))
    }

    /// Fixed raster height shared by every glyph.
    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    /// `desc_len + 10 * glyph_count` plus the glyph payload region; equal
    /// to the number of bytes following the header in a well-formed file.
    pub fn total_len(&self) -> u32 {
        self.total_len
    }

    /// File offset of the description string.
    pub fn data_addr(&self) -> u32 {
        self.data_addr
    }

    /// The description length minus the trailing `utf-8` suffix, if any.
    pub fn desc_shown_len(&self) -> u8 {
        self.desc_shown_len
    }

    pub fn offsets_are_eighths(&self) -> bool {
        self.flags & OFFSETS_ARE_EIGHTHS != 0
    }

    /// The raw description string that follows the header.
    pub fn description(&self) -> &'a [u8] {
        self.description
    }

    pub fn char_map(&self) -> &'a [CharMapRecord] {
        self.char_map
    }

    /// File offset the character-map's start offsets are measured from.
    pub fn char_map_start(&self) -> usize {
        self.data_addr as usize + self.description.len()
    }

    /// Locate a record's payload: the mode marker byte and the opcode
    /// bytes after it. Fails if the record points outside the file.
    pub fn glyph_payload(&self, record: &CharMapRecord) -> Result<(u8, &'a [u8]), ReadError> {
        let scale = if self.offsets_are_eighths() { 8 } else { 1 };
        let start = self
            .char_map_start()
            .checked_add(record.start_offset().to_u32() as usize * scale)
            .ok_or(ReadError::OutOfBounds)?;
        let len = record.payload_len() as usize;
        if len == 0 {
            return Err(ReadError::MalformedData("zero-length glyph payload"));
        }
        let data = self
            .data
            .slice(start..start + len)
            .ok_or(ReadError::OutOfBounds)?;
        let bytes = data.as_bytes();
        Ok((bytes[0], &bytes[1..]))
    }
}

impl<'a> FontRead<'a> for ZiFont<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        data.check_in_bounds(HEADER_LEN)?;
        let signature: u8 = data.read_at(header::SIGNATURE)?;
        if signature != SIGNATURE {
            return Err(ReadError::InvalidSignature(signature));
        }
        let version: u8 = data.read_at(header::VERSION)?;
        if version != VERSION {
            return Err(ReadError::InvalidVersion(version));
        }
        let height: u8 = data.read_at(header::HEIGHT)?;
        if height == 0 {
            return Err(ReadError::MalformedData("zero raster height"));
        }
        let glyph_count: u32 = data.read_at(header::GLYPH_COUNT)?;
        let desc_len: u8 = data.read_at(header::DESC_LEN)?;
        let total_len: u32 = data.read_at(header::TOTAL_LEN)?;
        let data_addr: u32 = data.read_at(header::DATA_ADDR)?;
        let desc_shown_len: u8 = data.read_at(header::DESC_SHOWN_LEN)?;
        let flags: u8 = data.read_at(header::FLAGS)?;

        if (data_addr as usize) < HEADER_LEN {
            return Err(ReadError::MalformedData("data_addr inside the header"));
        }
        let desc_start = data_addr as usize;
        let desc_end = desc_start + desc_len as usize;
        let description = data
            .slice(desc_start..desc_end)
            .ok_or(ReadError::OutOfBounds)?
            .as_bytes();
        let map_len = glyph_count as usize * CHAR_MAP_RECORD_LEN;
        let char_map = data.read_array(desc_end..desc_end + map_len)?;

        Ok(ZiFont {
            data,
            height,
            glyph_count,
            total_len,
            data_addr,
            desc_shown_len,
            flags,
            description,
            char_map,
        })
    }
}
