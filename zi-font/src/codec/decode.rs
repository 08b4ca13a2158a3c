//! Replaying opcode streams into grayscale rasters.

use super::{dequantize3, GlyphMode};

/// The result of decoding one glyph payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedGlyph {
    /// `width * height` grayscale samples, row-major.
    pub pixels: Vec<u8>,
    /// Pixels actually produced by the opcode stream. Anything short of
    /// the full raster was zero-filled.
    pub written: usize,
}

impl DecodedGlyph {
    /// `true` if the payload ran out before the raster was full.
    pub fn is_truncated(&self) -> bool {
        self.written < self.pixels.len()
    }
}

/// A write cursor over the output raster; every write is clamped so no
/// opcode, however damaged, can run past the buffer.
struct Raster {
    pixels: Vec<u8>,
    wrote: usize,
}

impl Raster {
    fn new(len: usize) -> Self {
        Raster {
            pixels: vec![0; len],
            wrote: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.wrote == self.pixels.len()
    }

    fn push(&mut self, value: u8) {
        if self.wrote < self.pixels.len() {
            self.pixels[self.wrote] = value;
            self.wrote += 1;
        }
    }

    fn push_run(&mut self, value: u8, count: usize) {
        let count = count.min(self.pixels.len() - self.wrote);
        self.pixels[self.wrote..self.wrote + count].fill(value);
        self.wrote += count;
    }
}

/// Decode a glyph payload (without its mode marker byte) into a raster of
/// `width * height` pixels.
///
/// Surplus opcodes after the raster is full are ignored. If the payload is
/// exhausted early the remainder stays zero; the shortfall is visible via
/// [`DecodedGlyph::is_truncated`] and logged, but is not an error, so
/// damaged files still yield usable fonts.
pub fn decode(mode: GlyphMode, payload: &[u8], width: u8, height: u8) -> DecodedGlyph {
    let mut raster = Raster::new(width as usize * height as usize);

    for &op in payload {
        if raster.is_full() {
            break;
        }
        let family = (op >> 6) & 3;
        let low = op & 0x3f;
        match (mode, family) {
            // both modes: run of background or ink
            (_, 0) => {
                let val = if low & 0x20 != 0 { 255 } else { 0 };
                raster.push_run(val, (low & 0x1f) as usize);
            }
            // both modes: a transparent run then one or two ink pixels
            (_, 1) => {
                raster.push_run(0, (low & 0x1f) as usize);
                raster.push_run(255, if low & 0x20 != 0 { 2 } else { 1 });
            }
            // binary: a transparent run then three or four ink pixels
            (GlyphMode::Binary, 2) => {
                raster.push_run(0, (low & 0x1f) as usize);
                raster.push_run(255, if low & 0x20 != 0 { 4 } else { 3 });
            }
            // binary: up to seven transparent then up to seven ink
            (GlyphMode::Binary, _) => {
                raster.push_run(0, (low >> 3) as usize);
                raster.push_run(255, (low & 7) as usize);
            }
            // anti-aliased: a short transparent run then one mid level
            (GlyphMode::AntiAliased, 2) => {
                raster.push_run(0, (low >> 3) as usize);
                raster.push(dequantize3(low & 7));
            }
            // anti-aliased: two explicit levels
            (GlyphMode::AntiAliased, _) => {
                raster.push(dequantize3(low >> 3));
                raster.push(dequantize3(low & 7));
            }
        }
    }

    if !raster.is_full() {
        log::warn!(
            "glyph payload truncated: decoded {}/{} pixels",
            raster.wrote,
            raster.pixels.len()
        );
    }
    DecodedGlyph {
        written: raster.wrote,
        pixels: raster.pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode, quantize3};
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn empty_raster() {
        let out = decode(GlyphMode::Binary, &[], 0, 8);
        assert!(out.pixels.is_empty());
        assert!(!out.is_truncated());
    }

    #[test]
    fn binary_families() {
        // 00: 5 ink, 01: 2 trans + 2 ink, 10: 1 trans + 3 ink, 11: 2 trans + 1 ink
        let payload = [0x25, 0x62, 0x81, 0xd1];
        let out = decode(GlyphMode::Binary, &payload, 4, 4);
        #[rustfmt::skip]
        let expected = [
            255, 255, 255, 255,
            255, 0, 0, 255,
            255, 0, 255, 255,
            255, 0, 0, 255,
        ];
        assert_eq!(out.pixels, expected);
        assert!(!out.is_truncated());
    }

    #[test]
    fn anti_aliased_families() {
        // 10: 1 trans + level 4, 11: levels 7 and 2
        let payload = [0x8c, 0xfa];
        let out = decode(GlyphMode::AntiAliased, &payload, 5, 1);
        assert_eq!(out.pixels, [0, 146, 255, 73, 0]);
        assert!(out.is_truncated());
        assert_eq!(out.written, 4);
    }

    #[test]
    fn truncated_payload_zero_fills() {
        init_logging();
        let out = decode(GlyphMode::Binary, &[0x3f], 8, 8);
        assert_eq!(out.written, 31);
        assert_eq!(out.pixels[..31], [255; 31]);
        assert_eq!(out.pixels[31..], [0; 33]);
        assert!(out.is_truncated());
    }

    #[test]
    fn surplus_opcodes_are_ignored() {
        let out = decode(GlyphMode::Binary, &[0x22, 0xff, 0xff], 2, 1);
        assert_eq!(out.pixels, [255, 255]);
        assert!(!out.is_truncated());
    }

    #[test]
    fn opcode_never_writes_past_the_raster() {
        // a 31-run into a 3-pixel raster clamps
        let out = decode(GlyphMode::Binary, &[0x3f], 3, 1);
        assert_eq!(out.pixels, [255, 255, 255]);
    }

    #[test]
    fn binary_round_trip_is_exact() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let width = rng.gen_range(0..20u8);
            let height = rng.gen_range(1..20u8);
            let pixels: Vec<u8> = (0..width as usize * height as usize)
                .map(|_| rng.gen_range(0..2u8) * 255)
                .collect();
            let payload = encode(&pixels, GlyphMode::Binary);
            assert_eq!(payload[0], 0x01);
            let out = decode(GlyphMode::Binary, &payload[1..], width, height);
            assert_eq!(out.pixels, pixels);
            assert!(!out.is_truncated());
        }
    }

    #[test]
    fn anti_aliased_round_trip_matches_quantization() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let width = rng.gen_range(1..20u8);
            let height = rng.gen_range(1..20u8);
            let pixels: Vec<u8> = (0..width as usize * height as usize)
                .map(|_| rng.gen())
                .collect();
            let payload = encode(&pixels, GlyphMode::AntiAliased);
            assert_eq!(payload[0], 0x03);
            let out = decode(GlyphMode::AntiAliased, &payload[1..], width, height);
            let expected: Vec<u8> = pixels.iter().map(|&v| dequantize3(quantize3(v))).collect();
            assert_eq!(out.pixels, expected);
            assert!(!out.is_truncated());
        }
    }
}
