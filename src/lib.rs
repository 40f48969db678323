/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A streaming PNG decode pipeline
//!
//! This crate consumes a PNG byte stream in bounded-size chunks and drives
//! an incremental pixel parser through a header-then-data sequence,
//! repacking each decoded RGBA pixel into one of four fixed display
//! formats as it arrives. The whole file is never held in memory at once.
//!
//! The parser itself is an external collaborator: this crate does not
//! implement zlib inflation, interlacing, palettes or filters. Anything
//! implementing the [`PixelParser`] contract can be plugged in.
//!
//! # Features
//! - Bounded memory: one 1024 byte scratch buffer plus the output buffer
//! - Four packed output encodings selected at build time (`depth32`,
//!   `depth16`, `depth8`, `depth1` cargo features)
//! - File and in-memory sources behind one trait
//!
//! # Usage
//! ```no_run
//! use png_pipe::{MemSource, PngPipeDecoder};
//! # use png_pipe::{ParserSink, ParserError, PixelParser};
//! # struct SomeParser;
//! # impl PixelParser for SomeParser {
//! #   fn feed(&mut self, _: &[u8], _: &mut dyn ParserSink) -> Result<(), ParserError> { Ok(()) }
//! #   fn width(&self) -> u32 { 0 }
//! #   fn height(&self) -> u32 { 0 }
//! # }
//!
//! fn main() -> Result<(), png_pipe::PngPipeErrors> {
//!     let bytes = [0_u8; 100]; // pretend this is a png
//!     let source = MemSource::new(&bytes);
//!     let decoder = PngPipeDecoder::new(source, SomeParser);
//!     let image = decoder.decode()?;
//!     println!("{}x{}", image.width(), image.height());
//!     Ok(())
//! }
//! ```

pub use crate::common::PixelFormat;
pub use crate::decoder::{DecodedImage, PngPipeDecoder};
pub use crate::errors::PngPipeErrors;
pub use crate::host::{
    open, open_with_options, read_info, read_info_with_options, ImageInfo, ImageSource,
    MemoryDescriptor,
};
pub use crate::options::DecoderOptions;
pub use crate::parser::{ParserError, ParserSink, PixelParser};
pub use crate::source::{ChunkSource, FileSource, MemSource, SourceError};

mod common;
mod decoder;
mod errors;
mod host;
mod options;
mod packer;
mod parser;
mod session;
mod source;
