//! Assembling fonts into ZI containers.

use crate::codec::{encode, GlyphMode};
use crate::container::{header, CHAR_MAP_RECORD_LEN, HEADER_LEN, SIGNATURE, VERSION};
use crate::error::Error;
use crate::font::Font;
use crate::uint24::Uint24;

/// Header bytes with no known meaning, written with the fixed values
/// observed in working files.
const FIXED_HEADER_BYTES: &[(usize, u8)] = &[
    (0x01, 0xff),
    (0x03, 0x0a),
    (0x04, 0x18),
    (0x05, 0x02),
    (0x08, 0xff),
    (0x09, 0xff),
    (0x0b, 0xff),
    (0x1c, 0xff),
    (0x1e, 0x01),
];

/// A glyph, compressed and placed, during a single container write.
#[derive(Debug, Clone)]
pub struct EncodedGlyph {
    pub codepoint: u16,
    pub width: u8,
    pub mode: GlyphMode,
    /// The mode marker byte followed by the opcode stream.
    pub payload: Vec<u8>,
    /// Payload start in bytes from the start of the character map (never
    /// pre-divided; the record stores this divided by 8 when the eighths
    /// flag is set).
    pub start_offset: u32,
    pub byte_length: u16,
}

struct Layout {
    offsets_are_eighths: bool,
    /// End of the glyph payload region, in bytes from the map start,
    /// including any trailing alignment padding.
    end_offset: u32,
}

fn align_up(value: u32, align: u32) -> u32 {
    (value + align - 1) & !(align - 1)
}

fn encode_glyphs(font: &Font) -> Result<Vec<EncodedGlyph>, Error> {
    let mut encoded = Vec::with_capacity(font.glyphs.len());
    for glyph in &font.glyphs {
        let expected = glyph.width as usize * font.height as usize;
        if glyph.pixels.len() != expected {
            return Err(Error::GlyphRasterMismatch {
                codepoint: glyph.codepoint,
                expected,
                actual: glyph.pixels.len(),
            });
        }
        let mode = GlyphMode::for_pixels(&glyph.pixels);
        let payload = encode(&glyph.pixels, mode);
        let byte_length = u16::try_from(payload.len()).map_err(|_| Error::PayloadTooLong {
            codepoint: glyph.codepoint,
            len: payload.len(),
        })?;
        encoded.push(EncodedGlyph {
            codepoint: glyph.codepoint,
            width: glyph.width,
            mode,
            payload,
            start_offset: 0,
            byte_length,
        });
    }
    // the character map must be written in codepoint order no matter how
    // the caller assembled the font
    encoded.sort_by_key(|glyph| glyph.codepoint);
    Ok(encoded)
}

/// Place every payload, choosing the offset policy: once the payload bytes
/// outgrow the 24-bit offset field, offsets are stored divided by 8 and
/// every payload start is padded to a multiple of 8.
fn layout_glyphs(encoded: &mut [EncodedGlyph]) -> Result<Layout, Error> {
    let payload_sum: u64 = encoded.iter().map(|g| g.byte_length as u64).sum();
    let offsets_are_eighths = payload_sum > Uint24::MAX.to_u32() as u64;
    let align = if offsets_are_eighths { 8 } else { 1 };

    let map_len = (encoded.len() * CHAR_MAP_RECORD_LEN) as u32;
    let mut cursor = align_up(map_len, align);
    for glyph in encoded.iter_mut() {
        glyph.start_offset = cursor;
        if Uint24::checked_new(cursor / align).is_none() {
            return Err(Error::FontTooLarge);
        }
        cursor = align_up(cursor + glyph.byte_length as u32, align);
    }
    Ok(Layout {
        offsets_are_eighths,
        end_offset: cursor,
    })
}

fn assemble(name: &str, height: u8, encoded: &[EncodedGlyph], layout: &Layout) -> Vec<u8> {
    let desc = name.as_bytes();
    let map_len = (encoded.len() * CHAR_MAP_RECORD_LEN) as u32;
    let glyph_count = encoded.len() as u32;
    let total_len = desc.len() as u32 + map_len + (layout.end_offset - map_len);
    let align = if layout.offsets_are_eighths { 8 } else { 1 };

    let mut head = [0u8; HEADER_LEN];
    head[header::SIGNATURE] = SIGNATURE;
    for &(pos, value) in FIXED_HEADER_BYTES {
        head[pos] = value;
    }
    head[header::HEIGHT] = height;
    head[header::GLYPH_COUNT..header::GLYPH_COUNT + 4].copy_from_slice(&glyph_count.to_le_bytes());
    head[header::VERSION] = VERSION;
    head[header::DESC_LEN] = desc.len() as u8;
    head[header::TOTAL_LEN..header::TOTAL_LEN + 4].copy_from_slice(&total_len.to_le_bytes());
    head[header::DATA_ADDR..header::DATA_ADDR + 4]
        .copy_from_slice(&(HEADER_LEN as u32).to_le_bytes());
    head[header::VARIABLE_WIDTH] = 1;
    head[header::DESC_SHOWN_LEN] = if desc.len() > 5 && desc.ends_with(b"utf-8") {
        (desc.len() - 5) as u8
    } else {
        desc.len() as u8
    };
    head[header::FLAGS] = layout.offsets_are_eighths as u8;
    head[header::SUBSET_ACTUAL..header::SUBSET_ACTUAL + 4]
        .copy_from_slice(&glyph_count.to_le_bytes());

    let mut out = Vec::with_capacity(HEADER_LEN + total_len as usize);
    out.extend_from_slice(&head);
    out.extend_from_slice(desc);

    for glyph in encoded {
        let stored = Uint24::new(glyph.start_offset / align);
        out.extend_from_slice(&glyph.codepoint.to_le_bytes());
        out.push(glyph.width);
        out.extend_from_slice(&[0, 0]); // reserved
        out.extend_from_slice(&stored.to_le_bytes());
        out.extend_from_slice(&glyph.byte_length.to_le_bytes());
    }

    // payloads at their laid-out offsets; the gaps are alignment padding
    let map_base = HEADER_LEN + desc.len();
    for glyph in encoded {
        out.resize(map_base + glyph.start_offset as usize, 0);
        out.extend_from_slice(&glyph.payload);
    }
    out.resize(map_base + layout.end_offset as usize, 0);
    out
}

/// Serialize a font into ZI container bytes.
///
/// Glyph modes are chosen per glyph; the character map is written in
/// codepoint order regardless of the order of `font.glyphs`.
pub fn dump_font(font: &Font) -> Result<Vec<u8>, Error> {
    if font.height == 0 {
        return Err(Error::ZeroHeight);
    }
    if font.name.len() > u8::MAX as usize {
        return Err(Error::DescriptionTooLong(font.name.len()));
    }
    let mut encoded = encode_glyphs(font)?;
    let layout = layout_glyphs(&mut encoded)?;
    Ok(assemble(&font.name, font.height, &encoded, &layout))
}

impl Font {
    /// Serialize and write this font to disk.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), Error> {
        std::fs::write(path, dump_font(self)?)?;
        Ok(())
    }
}
