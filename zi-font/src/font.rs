//! The owned, decoded font model.

use crate::codec::{decode, GlyphMode};
use crate::container::ZiFont;
use crate::error::Error;
use crate::read::ReadError;

/// One glyph: a codepoint and its decoded grayscale raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// 16-bit codepoint, as stored in the character map.
    pub codepoint: u16,
    /// Raster width in pixels; the height is shared by the whole font.
    pub width: u8,
    /// `width * height` samples, row-major, top row first. 0 is fully
    /// transparent, 255 fully opaque.
    pub pixels: Vec<u8>,
}

impl Glyph {
    pub fn new(codepoint: u16, width: u8, pixels: Vec<u8>) -> Glyph {
        Glyph {
            codepoint,
            width,
            pixels,
        }
    }
}

/// A decoded bitmap font.
///
/// Glyphs are kept sorted by codepoint; that order is also the container's
/// character-map order, which is what makes [`Font::glyph_for_codepoint`]
/// a binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    /// Display name, stored as the container's description string.
    pub name: String,
    /// Raster height shared by every glyph.
    pub height: u8,
    pub glyphs: Vec<Glyph>,
}

/// Recoverable damage encountered while loading a container.
///
/// Neither count is fatal: a skipped glyph keeps its codepoint and width
/// with an all-zero raster, and a truncated payload is zero-filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Character-map records pointing outside the file, with an empty
    /// payload, or with an unrecognized mode byte.
    pub skipped_glyphs: u32,
    /// Payloads that ran out of opcodes before filling their raster.
    pub truncated_payloads: u32,
}

impl LoadReport {
    /// `true` if the whole container decoded without damage.
    pub fn is_clean(&self) -> bool {
        self.skipped_glyphs == 0 && self.truncated_payloads == 0
    }
}

/// A [`Font`] together with the [`LoadReport`] describing how cleanly it
/// was read.
#[derive(Debug, Clone)]
pub struct FontLoad {
    pub font: Font,
    pub report: LoadReport,
}

impl Font {
    /// Build a font from parts, sorting the glyphs by codepoint.
    pub fn from_parts(name: impl Into<String>, height: u8, mut glyphs: Vec<Glyph>) -> Font {
        glyphs.sort_by_key(|glyph| glyph.codepoint);
        Font {
            name: name.into(),
            height,
            glyphs,
        }
    }

    /// Look up a glyph by codepoint.
    pub fn glyph_for_codepoint(&self, codepoint: u16) -> Option<&Glyph> {
        self.glyphs
            .binary_search_by_key(&codepoint, |glyph| glyph.codepoint)
            .ok()
            .map(|ix| &self.glyphs[ix])
    }

    /// Decode a complete ZI container.
    ///
    /// Damaged records and truncated payloads are tolerated and surfaced
    /// through the returned [`LoadReport`]; only a header that cannot be
    /// interpreted at all is an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<FontLoad, ReadError> {
        let view = ZiFont::new(bytes)?;
        let height = view.height();
        let mut report = LoadReport::default();
        let mut glyphs = Vec::with_capacity(view.char_map().len());

        for record in view.char_map() {
            let located = view
                .glyph_payload(record)
                .ok()
                .and_then(|(marker, payload)| Some((GlyphMode::from_marker(marker)?, payload)));
            let pixels = match located {
                Some((mode, payload)) => {
                    let decoded = decode(mode, payload, record.width(), height);
                    if decoded.is_truncated() {
                        report.truncated_payloads += 1;
                    }
                    decoded.pixels
                }
                None => {
                    log::warn!(
                        "skipping glyph {:#06x}: unusable character-map record",
                        record.codepoint()
                    );
                    report.skipped_glyphs += 1;
                    vec![0; record.width() as usize * height as usize]
                }
            };
            glyphs.push(Glyph::new(record.codepoint(), record.width(), pixels));
        }

        let font = Font {
            name: String::from_utf8_lossy(view.description()).into_owned(),
            height,
            glyphs,
        };
        Ok(FontLoad { font, report })
    }

    /// Read and decode a container from disk.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<FontLoad, Error> {
        let bytes = std::fs::read(path)?;
        Ok(Font::from_bytes(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_parts_sorts_by_codepoint() {
        let font = Font::from_parts(
            "demo",
            1,
            vec![
                Glyph::new(0x43, 1, vec![0]),
                Glyph::new(0x41, 1, vec![0]),
                Glyph::new(0x42, 1, vec![0]),
            ],
        );
        let codepoints: Vec<u16> = font.glyphs.iter().map(|g| g.codepoint).collect();
        assert_eq!(codepoints, [0x41, 0x42, 0x43]);
        assert_eq!(font.glyph_for_codepoint(0x42).unwrap().codepoint, 0x42);
        assert!(font.glyph_for_codepoint(0x44).is_none());
    }

    #[test]
    fn decodes_static_container() {
        let FontLoad { font, report } = Font::from_bytes(zi_test_data::SINGLE_A).unwrap();
        assert!(report.is_clean());
        assert_eq!(font.name, "demo");
        assert_eq!(font.height, 4);
        assert_eq!(font.glyphs.len(), 1);
        let glyph = font.glyph_for_codepoint('A' as u16).unwrap();
        assert_eq!(glyph.width, 3);
        assert_eq!(glyph.pixels, zi_test_data::A_3X4);
    }

    #[test]
    fn eighths_flag_scales_offsets() {
        let FontLoad { font, report } = Font::from_bytes(zi_test_data::EIGHTHS_FLAG).unwrap();
        assert!(report.is_clean());
        assert_eq!(font.glyphs[0].pixels, zi_test_data::A_3X4);
    }

    #[test]
    fn out_of_bounds_record_is_skipped_not_fatal() {
        let FontLoad { font, report } = Font::from_bytes(zi_test_data::OOB_RECORD).unwrap();
        assert_eq!(report.skipped_glyphs, 1);
        assert_eq!(report.truncated_payloads, 0);
        assert_eq!(font.glyphs.len(), 2);
        // the skipped glyph keeps its identity, with a blank raster
        let skipped = font.glyph_for_codepoint('B' as u16).unwrap();
        assert_eq!(skipped.width, 3);
        assert_eq!(skipped.pixels, vec![0; 12]);
        // the good glyph is unaffected
        assert_eq!(
            font.glyph_for_codepoint('A' as u16).unwrap().pixels,
            zi_test_data::A_3X4
        );
    }

    #[test]
    fn truncated_payload_is_reported() {
        let FontLoad { font, report } = Font::from_bytes(zi_test_data::TRUNCATED_PAYLOAD).unwrap();
        assert_eq!(report.skipped_glyphs, 0);
        assert_eq!(report.truncated_payloads, 1);
        let glyph = &font.glyphs[0];
        assert_eq!(&glyph.pixels[..2], &[0, 255]);
        assert_eq!(&glyph.pixels[2..], &[0; 10]);
    }
}
