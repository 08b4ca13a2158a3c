//! hand-assembled ZI containers shared by the zi-font tests.
//!
//! Each container is written out byte-by-byte so the tests exercise the
//! reader against known-good (or known-damaged) files rather than against
//! the writer's own output.

/// The 3x4 'A' raster every sample container encodes.
#[rustfmt::skip]
pub static A_3X4: &[u8] = &[
    0,   255, 0,
    255, 0,   255,
    255, 255, 255,
    255, 0,   255,
];

/// A minimal well-formed container: description "demo", height 4, one
/// binary glyph 'A' (3x4), exact byte offsets (eighths flag clear).
#[rustfmt::skip]
pub static SINGLE_A: &[u8] = &[
    // header (0x2C bytes)
    0x04,                   // 0x00 signature
    0xFF, 0x00, 0x0A,       // 0x01..0x03 unknown constants
    0x18, 0x02, 0x00,       // 0x04..0x06 codepage / subset mode
    0x04,                   // 0x07 height
    0xFF, 0xFF, 0x00, 0xFF, // 0x08..0x0B unknown constants
    0x01, 0x00, 0x00, 0x00, // 0x0C glyph_count
    0x06,                   // 0x10 version
    0x04,                   // 0x11 desc_len
    0x00, 0x00,             // 0x12..0x13
    0x13, 0x00, 0x00, 0x00, // 0x14 total_len = 4 + 10 + 5
    0x2C, 0x00, 0x00, 0x00, // 0x18 data_addr
    0xFF, 0x00, 0x01,       // 0x1C..0x1E unknown constants
    0x01,                   // 0x1F variable width
    0x04,                   // 0x20 desc_shown_len
    0x00,                   // 0x21 flags: exact offsets
    0x00, 0x00,             // 0x22..0x23
    0x01, 0x00, 0x00, 0x00, // 0x24 subset_actual
    0x00, 0x00, 0x00, 0x00, // 0x28..0x2B
    // description
    b'd', b'e', b'm', b'o',
    // character map: one 10-byte record
    0x41, 0x00,             // codepoint 'A'
    0x03,                   // width
    0x00, 0x00,             // reserved
    0x0A, 0x00, 0x00,       // start offset: right after the map
    0x05, 0x00,             // payload length
    // glyph payload: binary mode, 0 1 0 1 0 1 1 1 1 1 0 1
    0x01, 0x41, 0x41, 0xCD, 0x41,
];

/// Same glyph, but stored with the eighths flag set: the map end is padded
/// to 8, the stored start offset is divided by 8, and the payload carries
/// trailing padding out to the next multiple of 8.
#[rustfmt::skip]
pub static EIGHTHS_FLAG: &[u8] = &[
    // header
    0x04,
    0xFF, 0x00, 0x0A,
    0x18, 0x02, 0x00,
    0x04,                   // height
    0xFF, 0xFF, 0x00, 0xFF,
    0x01, 0x00, 0x00, 0x00, // glyph_count
    0x06,
    0x04,                   // desc_len
    0x00, 0x00,
    0x1C, 0x00, 0x00, 0x00, // total_len = 4 + 10 + (24 - 10)
    0x2C, 0x00, 0x00, 0x00,
    0xFF, 0x00, 0x01,
    0x01,
    0x04,
    0x01,                   // flags: offsets are eighths
    0x00, 0x00,
    0x01, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    // description
    b'd', b'e', b'm', b'o',
    // character map
    0x41, 0x00,
    0x03,
    0x00, 0x00,
    0x02, 0x00, 0x00,       // start offset 16 / 8
    0x05, 0x00,
    // padding: map end (10) up to 16
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    // glyph payload + trailing padding up to 24
    0x01, 0x41, 0x41, 0xCD, 0x41,
    0x00, 0x00, 0x00,
];

/// Two records; the second one's start offset points far outside the file
/// and must be skipped by a tolerant loader.
#[rustfmt::skip]
pub static OOB_RECORD: &[u8] = &[
    // header
    0x04,
    0xFF, 0x00, 0x0A,
    0x18, 0x02, 0x00,
    0x04,                   // height
    0xFF, 0xFF, 0x00, 0xFF,
    0x02, 0x00, 0x00, 0x00, // glyph_count
    0x06,
    0x04,                   // desc_len
    0x00, 0x00,
    0x1D, 0x00, 0x00, 0x00, // total_len = 4 + 20 + 5
    0x2C, 0x00, 0x00, 0x00,
    0xFF, 0x00, 0x01,
    0x01,
    0x04,
    0x00,
    0x00, 0x00,
    0x02, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    // description
    b'd', b'e', b'm', b'o',
    // character map
    0x41, 0x00, 0x03, 0x00, 0x00, 0x14, 0x00, 0x00, 0x05, 0x00, // 'A' at 20
    0x42, 0x00, 0x03, 0x00, 0x00, 0xE8, 0x03, 0x00, 0x05, 0x00, // 'B' at 1000: out of bounds
    // glyph payload for 'A'
    0x01, 0x41, 0x41, 0xCD, 0x41,
];

/// One record whose payload stops after two decoded pixels; the rest of
/// the raster must be zero-filled.
#[rustfmt::skip]
pub static TRUNCATED_PAYLOAD: &[u8] = &[
    // header
    0x04,
    0xFF, 0x00, 0x0A,
    0x18, 0x02, 0x00,
    0x04,                   // height
    0xFF, 0xFF, 0x00, 0xFF,
    0x01, 0x00, 0x00, 0x00, // glyph_count
    0x06,
    0x04,                   // desc_len
    0x00, 0x00,
    0x10, 0x00, 0x00, 0x00, // total_len = 4 + 10 + 2
    0x2C, 0x00, 0x00, 0x00,
    0xFF, 0x00, 0x01,
    0x01,
    0x04,
    0x00,
    0x00, 0x00,
    0x01, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    // description
    b'd', b'e', b'm', b'o',
    // character map
    0x41, 0x00, 0x03, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x02, 0x00,
    // glyph payload: one opcode covering 2 of 12 pixels
    0x01, 0x41,
];
