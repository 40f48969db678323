/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Per-decode mutable state
//!
//! One [`DecodeSession`] exists per decode call, owned by the decoder and
//! lent to the pixel parser as its event sink. It carries the two phase
//! flags, the image dimensions once known, the output buffer and the
//! write cursor. Nothing here is shared across decodes.

use log::{error, trace};

use crate::common::PixelFormat;
use crate::packer::pack_pixel;
use crate::parser::ParserSink;
use crate::PngPipeErrors;

pub(crate) struct DecodeSession {
    header_ready: bool,
    data_ready: bool,
    width: usize,
    height: usize,
    format: PixelFormat,
    output: Option<Vec<u8>>,
    write_cursor: usize,
}

impl DecodeSession {
    pub fn new(format: PixelFormat) -> DecodeSession {
        DecodeSession {
            header_ready: false,
            data_ready: false,
            width: 0,
            height: 0,
            format,
            output: None,
            write_cursor: 0,
        }
    }

    pub const fn is_header_ready(&self) -> bool {
        self.header_ready
    }

    pub const fn is_data_ready(&self) -> bool {
        self.data_ready
    }

    /// Width and height reported by the parser, valid once
    /// [`is_header_ready`](Self::is_header_ready) returns true.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Allocate the output buffer, zero filled and sized
    /// `width * height * bytes_per_pixel`.
    ///
    /// Called exactly once per decode, after the header phase has
    /// established the dimensions.
    pub fn allocate(&mut self) -> Result<(), PngPipeErrors> {
        debug_assert!(self.header_ready);
        debug_assert!(self.output.is_none());

        let size = self
            .width
            .checked_mul(self.height)
            .and_then(|px| px.checked_mul(self.format.bytes_per_pixel()))
            .ok_or(PngPipeErrors::OverFlowOccurred)?;

        trace!("allocating memory for image: {} bytes", size);

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(size)
            .map_err(|_| PngPipeErrors::AllocationFailure(size))?;
        buffer.resize(size, 0);

        self.output = Some(buffer);
        self.write_cursor = 0;

        Ok(())
    }

    /// Move the finished buffer out of the session.
    pub fn take_output(&mut self) -> Option<Vec<u8>> {
        self.output.take()
    }

    /// Rewind the write cursor to the buffer's logical start.
    ///
    /// Subtracts exactly `bytes_per_pixel * width * height`, the distance
    /// a complete raster-order pass advances it.
    fn rewind_to_start(&mut self) {
        let advanced = self.format.bytes_per_pixel() * self.width * self.height;

        debug_assert_eq!(self.write_cursor, advanced);
        self.write_cursor = self.write_cursor.saturating_sub(advanced);
    }
}

impl ParserSink for DecodeSession {
    fn header_ready(&mut self, width: u32, height: u32) {
        trace!("image header read successfully, size: {} x {}", width, height);

        self.width = width as usize;
        self.height = height as usize;
        self.header_ready = true;
    }

    fn pixel_ready(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        trace!(
            "received pixel ({},{}) with rgba color ({:#04x},{:#04x},{:#04x},{:#04x})",
            x, y, rgba[0], rgba[1], rgba[2], rgba[3]
        );

        let bpp = self.format.bytes_per_pixel();
        let cursor = self.write_cursor;

        // Pixels may only arrive once the data phase has allocated the
        // buffer, and never more than width*height of them. Either being
        // violated is a defect in the parser, not a decode error.
        match self.output.as_mut() {
            Some(buffer) if cursor + bpp <= buffer.len() => {
                pack_pixel(self.format, rgba, &mut buffer[cursor..cursor + bpp]);
                self.write_cursor += bpp;
            }
            Some(_) => {
                debug_assert!(false, "parser delivered more than width*height pixels");
                error!("pixel delivered past the end of the output buffer, dropped");
            }
            None => {
                debug_assert!(false, "parser delivered a pixel before allocation");
                error!("pixel delivered before the output buffer exists, dropped");
            }
        }
    }

    fn stream_complete(&mut self) {
        trace!("image read successfully");

        self.data_ready = true;
        self.rewind_to_start();
    }
}
