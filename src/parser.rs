/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The incremental pixel parser contract
//!
//! Compression, filtering, interlacing and palette expansion live behind
//! this seam. The pipeline feeds the parser raw bytes in whatever bursts
//! the chunk reader produces and the parser reports progress through a
//! [`ParserSink`] it is handed on every feed call.
//!
//! The sink replaces the user-data pointer slot a C parser would offer:
//! the decode session is passed by `&mut` into every callback, so there is
//! only ever one owner of the session state.

use core::fmt::{Debug, Formatter};

/// Error reported by a parser feed call.
///
/// The pipeline treats any parser error as fatal for the current decode;
/// the reason string is carried through for diagnostics only.
pub struct ParserError {
    pub reason: &'static str,
}

impl ParserError {
    pub const fn new(reason: &'static str) -> ParserError {
        ParserError { reason }
    }
}

impl Debug for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", self.reason)
    }
}

/// Receiver for the structural events a parser emits while consuming
/// bytes.
pub trait ParserSink {
    /// The image header has been parsed; `width` and `height` are now
    /// known. Fired exactly once per stream.
    fn header_ready(&mut self, width: u32, height: u32);

    /// One pixel has been fully decoded.
    ///
    /// Pixels arrive in raster order, left-to-right then top-to-bottom,
    /// with no reordering or double delivery; `rgba` holds one byte per
    /// channel. Exactly `width * height` invocations occur per stream.
    fn pixel_ready(&mut self, x: u32, y: u32, rgba: [u8; 4]);

    /// The final pixel has been delivered and the stream is complete.
    /// Fired exactly once per stream, after the last `pixel_ready`.
    fn stream_complete(&mut self);
}

/// An incremental PNG pixel decoder.
///
/// Implementations keep their own state across [`feed`](Self::feed) calls;
/// the pipeline never hands them the whole stream at once. Byte order of
/// feeds follows the stream exactly: the 8-byte signature first, then each
/// chunk as its 8-byte header followed by payload and CRC.
pub trait PixelParser {
    /// Consume `bytes`, advancing internal state and reporting any events
    /// they complete through `sink`.
    ///
    /// An `Err` means the stream is undecodable (bad signature, corrupt
    /// compressed data, invalid filter) and the parser may not be fed
    /// again.
    fn feed(&mut self, bytes: &[u8], sink: &mut dyn ParserSink) -> Result<(), ParserError>;

    /// Image width, valid once `header_ready` has fired.
    fn width(&self) -> u32;

    /// Image height, valid once `header_ready` has fired.
    fn height(&self) -> u32;
}
