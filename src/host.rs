/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Host-facing entry points
//!
//! A GUI host asks three things of an image decoder: the size of an image
//! (`info`), its pixels (`open`) and releasing those pixels (`close`).
//! [`read_info`] and [`open`] are the first two; closing is dropping the
//! returned [`DecodedImage`]. Registration of these against a host's
//! dispatch table is the host's business, not this crate's.

use std::path::Path;

use log::trace;

use crate::common::PNG_SIGNATURE;
use crate::decoder::{DecodedImage, PngPipeDecoder};
use crate::options::DecoderOptions;
use crate::parser::PixelParser;
use crate::source::{FileSource, MemSource};
use crate::{PixelFormat, PngPipeErrors};

/// Where an image request reads its bytes from.
pub enum ImageSource<'a> {
    /// A file on disk, identified by path. The extension must be `png`.
    File(&'a Path),
    /// An in-memory buffer with optionally pre-declared dimensions.
    Memory(MemoryDescriptor<'a>),
}

/// An in-memory image descriptor as a host hands it over: raw bytes plus
/// whatever the host already recorded about them.
pub struct MemoryDescriptor<'a> {
    /// The complete PNG byte stream.
    pub data: &'a [u8],
    /// Declared width, `0` when unknown.
    pub width: u32,
    /// Declared height, `0` when unknown.
    pub height: u32,
}

/// The answer to an info request.
#[derive(Copy, Clone, Debug)]
pub struct ImageInfo {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
}

fn check_png_extension(path: &Path) -> Result<(), PngPipeErrors> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if !is_png {
        return Err(PngPipeErrors::UnsupportedSource("file extension is not png"));
    }
    Ok(())
}

/// Report an image's dimensions without decoding its pixels.
///
/// File sources run the signature check and header phase. Memory sources
/// with declared dimensions take a fast path: verify the 8-byte PNG magic
/// and answer from the descriptor without parsing; descriptors that
/// declare no size are parsed like a file. The pixel buffer is never
/// allocated on this path.
pub fn read_info<P>(parser: P, source: &ImageSource<'_>) -> Result<ImageInfo, PngPipeErrors>
where
    P: PixelParser,
{
    read_info_with_options(parser, source, DecoderOptions::default())
}

/// [`read_info`] with explicit options.
pub fn read_info_with_options<P>(
    parser: P, source: &ImageSource<'_>, options: DecoderOptions,
) -> Result<ImageInfo, PngPipeErrors>
where
    P: PixelParser,
{
    match source {
        ImageSource::File(path) => {
            check_png_extension(path)?;
            trace!("reading image info from file: {:?}", path);

            let file = FileSource::open(path)?;
            let mut decoder = PngPipeDecoder::new_with_options(file, parser, options);
            let (width, height) = decoder.probe()?;

            Ok(ImageInfo {
                width,
                height,
                format: options.format,
            })
        }
        ImageSource::Memory(desc) => {
            trace!("reading image info from buffer");

            if desc.data.len() < PNG_SIGNATURE.len() || desc.data[..8] != PNG_SIGNATURE {
                return Err(PngPipeErrors::NotAPng);
            }

            if desc.width > 0 && desc.height > 0 {
                // the host already knows the size, answer from the
                // descriptor without re-parsing the stream
                return Ok(ImageInfo {
                    width: desc.width as usize,
                    height: desc.height as usize,
                    format: options.format,
                });
            }

            let source = MemSource::new(desc.data);
            let mut decoder = PngPipeDecoder::new_with_options(source, parser, options);
            let (width, height) = decoder.probe()?;

            Ok(ImageInfo {
                width,
                height,
                format: options.format,
            })
        }
    }
}

/// Decode an image to its packed pixels.
///
/// All-or-nothing: either a complete [`DecodedImage`] is returned with
/// ownership of its buffer, or an error and nothing to release.
pub fn open<P>(parser: P, source: &ImageSource<'_>) -> Result<DecodedImage, PngPipeErrors>
where
    P: PixelParser,
{
    open_with_options(parser, source, DecoderOptions::default())
}

/// [`open`] with explicit options.
pub fn open_with_options<P>(
    parser: P, source: &ImageSource<'_>, options: DecoderOptions,
) -> Result<DecodedImage, PngPipeErrors>
where
    P: PixelParser,
{
    match source {
        ImageSource::File(path) => {
            check_png_extension(path)?;
            trace!("reading image data from file: {:?}", path);

            let file = FileSource::open(path)?;
            PngPipeDecoder::new_with_options(file, parser, options).decode()
        }
        ImageSource::Memory(desc) => {
            trace!("reading image data from buffer");

            let source = MemSource::new(desc.data);
            PngPipeDecoder::new_with_options(source, parser, options).decode()
        }
    }
}
