/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Shared test harness: a scripted pixel parser plus PNG stream builders.
//!
//! The scripted parser understands just enough PNG structure for tests:
//! IHDR carries big-endian dimensions, IDAT payload bytes are taken
//! verbatim as RGBA quadruplets, IEND completes the stream. There is no
//! inflation or filtering, the streams built here are PNG-shaped, not
//! real PNGs.
#![allow(dead_code)] // not every test binary uses every helper

use png_pipe::{ParserError, ParserSink, PixelParser};

pub const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

#[derive(Default)]
pub struct ScriptedParser {
    buffer: Vec<u8>,
    pending_pixels: Vec<u8>,
    seen_signature: bool,
    width: u32,
    height: u32,
    emitted: u32,
    failed: bool,
}

impl ScriptedParser {
    pub fn new() -> ScriptedParser {
        ScriptedParser::default()
    }

    fn emit_pixels(&mut self, payload: &[u8], sink: &mut dyn ParserSink) {
        self.pending_pixels.extend_from_slice(payload);

        let mut consumed = 0;
        for quad in self.pending_pixels.chunks_exact(4) {
            let rgba = [quad[0], quad[1], quad[2], quad[3]];
            let x = self.emitted % self.width;
            let y = self.emitted / self.width;

            sink.pixel_ready(x, y, rgba);
            self.emitted += 1;
            consumed += 4;
        }
        self.pending_pixels.drain(..consumed);
    }
}

impl PixelParser for ScriptedParser {
    fn feed(&mut self, bytes: &[u8], sink: &mut dyn ParserSink) -> Result<(), ParserError> {
        if self.failed {
            return Err(ParserError::new("parser already failed"));
        }
        self.buffer.extend_from_slice(bytes);

        loop {
            if !self.seen_signature {
                if self.buffer.len() < 8 {
                    return Ok(());
                }
                if self.buffer[..8] != PNG_MAGIC {
                    self.failed = true;
                    return Err(ParserError::new("bad png signature"));
                }
                self.buffer.drain(..8);
                self.seen_signature = true;
                continue;
            }

            if self.buffer.len() < 8 {
                return Ok(());
            }
            let length =
                u32::from_be_bytes([self.buffer[0], self.buffer[1], self.buffer[2], self.buffer[3]])
                    as usize;
            let total = 8 + length + 4;
            if self.buffer.len() < total {
                return Ok(());
            }

            let ctype = [self.buffer[4], self.buffer[5], self.buffer[6], self.buffer[7]];
            let payload = self.buffer[8..8 + length].to_vec();
            self.buffer.drain(..total);

            match &ctype {
                b"IHDR" => {
                    if payload.len() < 8 {
                        self.failed = true;
                        return Err(ParserError::new("short ihdr"));
                    }
                    self.width =
                        u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
                    self.height =
                        u32::from_be_bytes([payload[4], payload[5], payload[6], payload[7]]);
                    sink.header_ready(self.width, self.height);
                }
                b"IDAT" => self.emit_pixels(&payload, sink),
                b"IEND" => sink.stream_complete(),
                _ => {}
            }
        }
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// A parser that accepts a fixed number of feed calls and then rejects.
pub struct FailingParser {
    pub feeds_before_failure: usize,
}

impl PixelParser for FailingParser {
    fn feed(&mut self, _bytes: &[u8], _sink: &mut dyn ParserSink) -> Result<(), ParserError> {
        if self.feeds_before_failure == 0 {
            return Err(ParserError::new("scripted failure"));
        }
        self.feeds_before_failure -= 1;
        Ok(())
    }

    fn width(&self) -> u32 {
        0
    }

    fn height(&self) -> u32 {
        0
    }
}

/// One PNG chunk: big-endian length, type tag, payload and a junk CRC
/// (the scripted parser never checks it).
pub fn chunk(ctype: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + payload.len());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(ctype);
    out.extend_from_slice(payload);
    out.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
    out
}

pub fn ihdr_payload(width: u32, height: u32) -> Vec<u8> {
    let mut payload = Vec::with_capacity(13);
    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    // bit depth, color type, compression, filter, interlace
    payload.extend_from_slice(&[8, 6, 0, 0, 0]);
    payload
}

/// Build a PNG-shaped stream holding `pixels` in one IDAT chunk.
pub fn build_png(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize);

    let flat: Vec<u8> = pixels.iter().flatten().copied().collect();

    let mut stream = Vec::new();
    stream.extend_from_slice(&PNG_MAGIC);
    stream.extend_from_slice(&chunk(b"IHDR", &ihdr_payload(width, height)));
    stream.extend_from_slice(&chunk(b"IDAT", &flat));
    stream.extend_from_slice(&chunk(b"IEND", &[]));
    stream
}

/// Same as [`build_png`] but with the pixel payload split across several
/// IDAT chunks of `split` bytes each, allowing pixels to straddle chunk
/// boundaries.
pub fn build_png_multi_idat(width: u32, height: u32, pixels: &[[u8; 4]], split: usize) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize);

    let flat: Vec<u8> = pixels.iter().flatten().copied().collect();

    let mut stream = Vec::new();
    stream.extend_from_slice(&PNG_MAGIC);
    stream.extend_from_slice(&chunk(b"IHDR", &ihdr_payload(width, height)));
    for part in flat.chunks(split) {
        stream.extend_from_slice(&chunk(b"IDAT", part));
    }
    stream.extend_from_slice(&chunk(b"IEND", &[]));
    stream
}
