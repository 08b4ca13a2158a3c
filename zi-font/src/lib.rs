//! Reading and writing ZI bitmap font containers.
//!
//! ZI is a compact binary container for fixed-height bitmap fonts, built for
//! embedded displays: a 44-byte header, a description string, a fixed-size
//! character map, and one opcode-compressed alpha mask per glyph. Glyph
//! masks are stored under one of two single-byte-opcode grammars, selected
//! per glyph: a binary (2-level) grammar for plain outlines and an
//! anti-aliased (8-level) grammar for everything else.
//!
//! The crate provides both directions:
//!
//! - [`ZiFont`] is a zero-copy view over container bytes, giving raw access
//!   to the header fields, the character map, and each glyph's payload.
//! - [`Font`] is the owned in-memory representation (decoded grayscale
//!   rasters), produced by [`Font::from_bytes`] and consumed by
//!   [`dump_font`].
//!
//! Compression is a per-glyph minimum-opcode-count dynamic program; decoding
//! replays opcodes and is tolerant of truncated or otherwise damaged
//! payloads (see [`LoadReport`]).
//!
//! # Example
//!
//! ```no_run
//! # let path = std::path::Path::new("");
//! let bytes = std::fs::read(path).unwrap();
//! let zi_font::FontLoad { font, report } = zi_font::Font::from_bytes(&bytes).unwrap();
//! assert_eq!(report.skipped_glyphs, 0);
//! println!("{}: {} glyphs, height {}", font.name, font.glyphs.len(), font.height);
//! let rewritten = zi_font::dump_font(&font).unwrap();
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod codec;
pub mod container;
mod error;
mod font;
mod font_data;
mod read;
mod uint24;
mod write;

pub use codec::GlyphMode;
pub use container::ZiFont;
pub use error::Error;
pub use font::{Font, FontLoad, Glyph, LoadReport};
pub use font_data::FontData;
pub use read::{FontRead, ReadError};
pub use uint24::Uint24;
pub use write::{dump_font, EncodedGlyph};
