/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use crate::parser::ParserError;
use crate::source::SourceError;

/// Errors that can occur while driving a PNG stream through the pipeline
#[non_exhaustive]
pub enum PngPipeErrors {
    /// The stream does not start with the 8-byte PNG signature
    NotAPng,
    /// A chunk declared a length that cannot fit non-negative 32-bit
    /// semantics, carries the declared length field
    MalformedChunk(u32),
    /// The source failed to produce bytes, including premature
    /// end-of-stream inside a declared chunk
    IoErrors(SourceError),
    /// The pixel parser signaled a decode error for a feed call
    ParserRejected(ParserError),
    /// The output buffer could not be allocated, carries the requested
    /// size in bytes
    AllocationFailure(usize),
    /// The source descriptor is not one of the supported variants
    UnsupportedSource(&'static str),
    /// Too large dimensions for a given width or height
    TooLargeDimensions(&'static str, usize, usize),
    /// Width or height of zero, invalid image
    ZeroDimensions,
    /// A size calculation overflowed
    OverFlowOccurred,
}

impl Debug for PngPipeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotAPng => {
                writeln!(f, "Invalid signature, stream is not a png")
            }
            Self::MalformedChunk(length) => {
                writeln!(f, "Malformed chunk, declared length {} is invalid", length)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
            Self::ParserRejected(err) => {
                writeln!(f, "Pixel parser rejected the stream: {:?}", err)
            }
            Self::AllocationFailure(size) => {
                writeln!(f, "Could not allocate {} bytes for the output buffer", size)
            }
            Self::UnsupportedSource(reason) => {
                writeln!(f, "Unsupported source: {}", reason)
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension}, {found} exceeds {expected}"
                )
            }
            Self::ZeroDimensions => {
                writeln!(f, "Width or height is zero, invalid image")
            }
            Self::OverFlowOccurred => {
                writeln!(f, "Overflow occurred")
            }
        }
    }
}

impl From<SourceError> for PngPipeErrors {
    fn from(value: SourceError) -> Self {
        PngPipeErrors::IoErrors(value)
    }
}

impl From<ParserError> for PngPipeErrors {
    fn from(value: ParserError) -> Self {
        PngPipeErrors::ParserRejected(value)
    }
}
