/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Pixel repacking routines
//!
//! One small routine per target encoding, each turning a single RGBA
//! quadruplet into the packed bytes a display expects. Alpha is always
//! carried through untouched as the trailing byte.

use crate::common::PixelFormat;

/// Pack one RGBA pixel into `dest` according to `format`.
///
/// `dest` must be exactly `format.bytes_per_pixel()` bytes long.
pub(crate) fn pack_pixel(format: PixelFormat, rgba: [u8; 4], dest: &mut [u8]) {
    debug_assert_eq!(dest.len(), format.bytes_per_pixel());

    match format {
        PixelFormat::Bgra8888 => pack_bgra8888(rgba, dest),
        PixelFormat::Rgb565Alpha => pack_rgb565(rgba, dest),
        PixelFormat::Rgb332Alpha => pack_rgb332(rgba, dest),
        PixelFormat::MonoAlpha => pack_mono(rgba, dest),
    }
}

/// Reversed channel order, alpha last.
fn pack_bgra8888(rgba: [u8; 4], dest: &mut [u8]) {
    dest[0] = rgba[2];
    dest[1] = rgba[1];
    dest[2] = rgba[0];
    dest[3] = rgba[3];
}

/// 5-6-5 bit truncation stored little-endian, then the alpha byte.
fn pack_rgb565(rgba: [u8; 4], dest: &mut [u8]) {
    let [r, g, b, a] = rgba;
    let color = (u16::from(r & 0xf8) << 8) | (u16::from(g & 0xfc) << 3) | (u16::from(b & 0xf8) >> 3);

    dest[..2].copy_from_slice(&color.to_le_bytes());
    dest[2] = a;
}

/// 3-3-2 bit truncation in one byte, then the alpha byte.
fn pack_rgb332(rgba: [u8; 4], dest: &mut [u8]) {
    let [r, g, b, a] = rgba;

    dest[0] = (r & 0xe0) | ((g & 0xe0) >> 3) | ((b & 0xc0) >> 6);
    dest[1] = a;
}

/// Luminance threshold, any channel with its high bit set counts as lit.
fn pack_mono(rgba: [u8; 4], dest: &mut [u8]) {
    let [r, g, b, a] = rgba;

    dest[0] = ((r | g | b) & 0x80) >> 7;
    dest[1] = a;
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};

    use super::*;

    // opaque-ish red, the reference quadruplet for all four encodings
    const RED: [u8; 4] = [0xff, 0x00, 0x00, 0x80];

    #[test]
    fn bgra8888_reverses_channels() {
        let mut dest = [0_u8; 4];
        pack_pixel(PixelFormat::Bgra8888, RED, &mut dest);
        assert_eq!(dest, [0x00, 0x00, 0xff, 0x80]);
    }

    #[test]
    fn rgb565_is_little_endian() {
        let mut dest = [0_u8; 3];
        pack_pixel(PixelFormat::Rgb565Alpha, RED, &mut dest);
        // 0xf800 stored low byte first
        assert_eq!(dest, [0x00, 0xf8, 0x80]);
    }

    #[test]
    fn rgb332_packs_high_bits() {
        let mut dest = [0_u8; 2];
        pack_pixel(PixelFormat::Rgb332Alpha, RED, &mut dest);
        assert_eq!(dest, [0xe0, 0x80]);
    }

    #[test]
    fn mono_thresholds_on_high_bit() {
        let mut dest = [0_u8; 2];
        pack_pixel(PixelFormat::MonoAlpha, RED, &mut dest);
        assert_eq!(dest, [0x01, 0x80]);

        // all channels below the threshold
        pack_pixel(PixelFormat::MonoAlpha, [0x7f, 0x7f, 0x7f, 0xff], &mut dest);
        assert_eq!(dest, [0x00, 0xff]);
    }

    #[test]
    fn white_survives_every_encoding() {
        let white = [0xff_u8, 0xff, 0xff, 0xff];

        let mut dest = [0_u8; 4];
        pack_pixel(PixelFormat::Bgra8888, white, &mut dest);
        assert_eq!(dest, [0xff, 0xff, 0xff, 0xff]);

        pack_pixel(PixelFormat::Rgb565Alpha, white, &mut dest[..3]);
        assert_eq!(dest[..3], [0xff, 0xff, 0xff]);

        pack_pixel(PixelFormat::Rgb332Alpha, white, &mut dest[..2]);
        assert_eq!(dest[..2], [0xff, 0xff]);

        pack_pixel(PixelFormat::MonoAlpha, white, &mut dest[..2]);
        assert_eq!(dest[..2], [0x01, 0xff]);
    }

    #[test]
    fn alpha_passes_through_unchanged() {
        let mut rng = WyRand::new();

        for _ in 0..256 {
            let rgba = [
                rng.generate::<u8>(),
                rng.generate::<u8>(),
                rng.generate::<u8>(),
                rng.generate::<u8>(),
            ];

            let mut dest = [0_u8; 4];
            pack_pixel(PixelFormat::Bgra8888, rgba, &mut dest);
            assert_eq!(dest[3], rgba[3]);

            pack_pixel(PixelFormat::Rgb565Alpha, rgba, &mut dest[..3]);
            assert_eq!(dest[2], rgba[3]);

            pack_pixel(PixelFormat::Rgb332Alpha, rgba, &mut dest[..2]);
            assert_eq!(dest[1], rgba[3]);

            pack_pixel(PixelFormat::MonoAlpha, rgba, &mut dest[..2]);
            assert_eq!(dest[1], rgba[3]);
        }
    }

    #[test]
    fn rgb565_keeps_component_order() {
        let mut rng = WyRand::new();

        for _ in 0..256 {
            let rgba = [
                rng.generate::<u8>(),
                rng.generate::<u8>(),
                rng.generate::<u8>(),
                0xff,
            ];

            let mut dest = [0_u8; 3];
            pack_pixel(PixelFormat::Rgb565Alpha, rgba, &mut dest);

            let color = u16::from_le_bytes([dest[0], dest[1]]);
            assert_eq!((color >> 11) as u8, rgba[0] >> 3);
            assert_eq!(((color >> 5) & 0x3f) as u8, rgba[1] >> 2);
            assert_eq!((color & 0x1f) as u8, rgba[2] >> 3);
        }
    }
}
