//! The per-glyph opcode bitstream codec.
//!
//! Every glyph payload is a one-byte mode marker followed by a sequence of
//! single-byte opcodes. The top two bits of each opcode select a family,
//! the low six bits are parameters; the two modes interpret the four
//! families differently. [`encode()`] finds a minimum-opcode-count stream
//! via dynamic programming, [`decode()`] replays one.

pub mod decode;
pub mod encode;

pub use decode::{decode, DecodedGlyph};
pub use encode::encode;

/// The encoding grammar used for a glyph's payload.
///
/// The discriminant is the mode marker byte that prefixes the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GlyphMode {
    /// Two-level masks: runs of fully transparent or fully opaque pixels.
    Binary = 0x01,
    /// Eight-level masks: samples quantized to 3 bits.
    AntiAliased = 0x03,
}

impl GlyphMode {
    /// The mode marker byte written at the start of a glyph payload.
    pub const fn marker(self) -> u8 {
        self as u8
    }

    pub fn from_marker(byte: u8) -> Option<GlyphMode> {
        match byte {
            0x01 => Some(GlyphMode::Binary),
            0x03 => Some(GlyphMode::AntiAliased),
            _ => None,
        }
    }

    /// Choose the grammar for a raster.
    ///
    /// Binary masks compress far better under the run-length families, and
    /// most glyph outlines are in fact binary; anything with intermediate
    /// coverage values needs the 3-bit grammar.
    pub fn for_pixels(pixels: &[u8]) -> GlyphMode {
        if pixels.iter().all(|&v| v <= 3 || v >= 252) {
            GlyphMode::Binary
        } else {
            GlyphMode::AntiAliased
        }
    }
}

/// Quantize an 8-bit sample to a 3-bit level (0..=7).
pub(crate) fn quantize3(v: u8) -> u8 {
    ((v as u16 * 7 + 127) / 255) as u8
}

/// Map a 3-bit level (0..=7) back to 0..=255.
pub(crate) fn dequantize3(level: u8) -> u8 {
    ((level as u16 * 255 + 3) / 7) as u8
}

/// Quantize an 8-bit sample to a single coverage bit.
pub(crate) fn quantize1(v: u8) -> u8 {
    (v >= 128) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier() {
        assert_eq!(GlyphMode::for_pixels(&[]), GlyphMode::Binary);
        assert_eq!(GlyphMode::for_pixels(&[0, 255, 3, 252]), GlyphMode::Binary);
        assert_eq!(GlyphMode::for_pixels(&[0, 4, 255]), GlyphMode::AntiAliased);
        assert_eq!(GlyphMode::for_pixels(&[128]), GlyphMode::AntiAliased);
    }

    #[test]
    fn quantization_endpoints() {
        assert_eq!(quantize3(0), 0);
        assert_eq!(quantize3(255), 7);
        assert_eq!(dequantize3(0), 0);
        assert_eq!(dequantize3(7), 255);
        // levels survive a round trip through 8 bits
        for level in 0..8 {
            assert_eq!(quantize3(dequantize3(level)), level);
        }
    }

    #[test]
    fn mode_markers() {
        assert_eq!(GlyphMode::Binary.marker(), 0x01);
        assert_eq!(GlyphMode::AntiAliased.marker(), 0x03);
        assert_eq!(GlyphMode::from_marker(0x03), Some(GlyphMode::AntiAliased));
        assert_eq!(GlyphMode::from_marker(0x02), None);
    }
}
