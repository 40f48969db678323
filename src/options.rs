/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoder options
//!
//! To remove the annoyance of getters and setters
//! all exposed options are declared public.

use crate::common::PixelFormat;

/// Options shared by every decode call
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which the decoder will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    pub max_width: usize,
    /// Maximum height for which the decoder will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    pub max_height: usize,
    /// Target pixel encoding decoded pixels are packed into.
    ///
    /// - Default value: the format selected by the build configuration,
    ///   see [`PixelFormat::from_build`]
    pub format: PixelFormat,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width: 1 << 14,
            max_height: 1 << 14,
            format: PixelFormat::from_build(),
        }
    }
}
