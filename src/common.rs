/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// The fixed 8-byte PNG file signature.
pub(crate) const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

/// Maximum number of bytes forwarded to the parser per feed call.
///
/// Chunk payloads larger than this are fed in several bursts so that
/// scratch memory stays bounded regardless of chunk size.
pub(crate) const CHUNK_BURST: usize = 1024;

/// Target pixel encodings the decoded image can be packed into.
///
/// Exactly one format is active per decode; the build configuration picks
/// the default via the `depth32`/`depth16`/`depth8`/`depth1` cargo
/// features, matching a display stack whose color depth is fixed at
/// compile time. [`DecoderOptions`](crate::DecoderOptions) can override it,
/// which is mainly useful for testing all variants in one build.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 4 bytes per pixel, stored `B, G, R, A`.
    Bgra8888,
    /// 3 bytes per pixel, RGB565 as a little-endian `u16` followed by the
    /// raw alpha byte.
    Rgb565Alpha,
    /// 2 bytes per pixel, 3-3-2 packed RGB followed by the raw alpha byte.
    Rgb332Alpha,
    /// 2 bytes per pixel, a 0/1 luminance threshold byte followed by the
    /// raw alpha byte.
    MonoAlpha,
}

impl PixelFormat {
    /// Number of output bytes one decoded pixel occupies.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Bgra8888 => 4,
            PixelFormat::Rgb565Alpha => 3,
            PixelFormat::Rgb332Alpha | PixelFormat::MonoAlpha => 2,
        }
    }

    /// The format selected by the build configuration.
    ///
    /// When more than one depth feature is enabled the smallest depth
    /// wins, so that adding e.g. `depth1` on top of the default `depth32`
    /// behaves predictably.
    pub const fn from_build() -> PixelFormat {
        if cfg!(feature = "depth1") {
            PixelFormat::MonoAlpha
        } else if cfg!(feature = "depth8") {
            PixelFormat::Rgb332Alpha
        } else if cfg!(feature = "depth16") {
            PixelFormat::Rgb565Alpha
        } else {
            PixelFormat::Bgra8888
        }
    }
}
