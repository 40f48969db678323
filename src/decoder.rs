/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use log::{error, trace};

use crate::common::{CHUNK_BURST, PNG_SIGNATURE};
use crate::options::DecoderOptions;
use crate::parser::PixelParser;
use crate::session::DecodeSession;
use crate::source::ChunkSource;
use crate::{PixelFormat, PngPipeErrors};

/// A streaming PNG decoder.
///
/// Reads the stream one chunk at a time, feeding each chunk to the pixel
/// parser in bounded bursts and packing decoded pixels into the target
/// format as they arrive. One decoder drives exactly one decode; the
/// session state it owns is never shared or reused across calls.
///
/// # Usage
///
/// ## Just probing for dimensions
/// ```no_run
/// use png_pipe::{MemSource, PngPipeDecoder};
/// # use png_pipe::{ParserSink, ParserError, PixelParser};
/// # struct SomeParser;
/// # impl PixelParser for SomeParser {
/// #   fn feed(&mut self, _: &[u8], _: &mut dyn ParserSink) -> Result<(), ParserError> { Ok(()) }
/// #   fn width(&self) -> u32 { 0 }
/// #   fn height(&self) -> u32 { 0 }
/// # }
///
/// fn main() -> Result<(), png_pipe::PngPipeErrors> {
///     let bytes = [0_u8; 16];
///     let mut decoder = PngPipeDecoder::new(MemSource::new(&bytes), SomeParser);
///     let (width, height) = decoder.probe()?;
///     println!("{} x {}", width, height);
///     Ok(())
/// }
/// ```
pub struct PngPipeDecoder<T, P>
where
    T: ChunkSource,
    P: PixelParser,
{
    source: T,
    parser: P,
    options: DecoderOptions,
    session: DecodeSession,
    fed_signature: bool,
}

impl<T, P> PngPipeDecoder<T, P>
where
    T: ChunkSource,
    P: PixelParser,
{
    /// Create a new decoder reading the stream from `source` and driving
    /// `parser` with its bytes.
    pub fn new(source: T, parser: P) -> PngPipeDecoder<T, P> {
        PngPipeDecoder::new_with_options(source, parser, DecoderOptions::default())
    }

    /// Create a new decoder with specified options
    ///
    /// # Arguments
    /// * `source`: Where the PNG byte stream is read from
    /// * `parser`: The incremental pixel parser fed with those bytes
    /// * `options`: Specialized options for this decode
    pub fn new_with_options(source: T, parser: P, options: DecoderOptions) -> PngPipeDecoder<T, P> {
        PngPipeDecoder {
            source,
            parser,
            session: DecodeSession::new(options.format),
            options,
            fed_signature: false,
        }
    }

    /// Read one chunk from the source and forward it to the parser.
    ///
    /// A chunk travels as its 8-byte header (4-byte big-endian length plus
    /// 4-byte type tag) followed by `length + 4` bytes of payload and CRC,
    /// forwarded in bursts of at most 1024 bytes. Type and CRC validation
    /// are the parser's job.
    fn read_next_chunk(&mut self) -> Result<(), PngPipeErrors> {
        let mut header = [0_u8; 8];
        self.source.read_exact_bytes(&mut header)?;

        let declared = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
        // declared length plus the CRC must fit non-negative 32-bit
        // signed semantics, anything above that is a corrupt length field
        if declared > i32::MAX as u32 - 4 {
            error!("invalid chunk length {}", declared);
            return Err(PngPipeErrors::MalformedChunk(declared));
        }

        if let Err(e) = self.parser.feed(&header, &mut self.session) {
            error!("error reading image: couldn't parse chunk header");
            return Err(PngPipeErrors::ParserRejected(e));
        }
        trace!("chunk size: {}", declared);

        // the 4 CRC bytes travel with the payload
        let mut remaining = declared as usize + 4;
        let mut burst = [0_u8; CHUNK_BURST];

        while remaining > 0 {
            let to_read = remaining.min(CHUNK_BURST);

            self.source.read_exact_bytes(&mut burst[..to_read])?;

            if let Err(e) = self.parser.feed(&burst[..to_read], &mut self.session) {
                error!("error reading image: couldn't parse chunk data");
                return Err(PngPipeErrors::ParserRejected(e));
            }
            remaining -= to_read;
        }
        Ok(())
    }

    /// Run the header phase: verify the file signature and read chunks
    /// until the parser has seen the image header.
    ///
    /// After this returns `Ok` the image dimensions are known and
    /// [`dimensions`](Self::dimensions) returns them. Never allocates the
    /// pixel buffer. Calling it again is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), PngPipeErrors> {
        if self.session.is_header_ready() {
            return self.check_dimensions();
        }

        if !self.fed_signature {
            let mut signature = [0_u8; 8];
            self.source.read_exact_bytes(&mut signature)?;

            if signature != PNG_SIGNATURE {
                return Err(PngPipeErrors::NotAPng);
            }
            if self.parser.feed(&signature, &mut self.session).is_err() {
                error!("error reading header: couldn't parse file signature");
                return Err(PngPipeErrors::NotAPng);
            }
            self.fed_signature = true;
        }

        // a stream that never produces a header runs out of chunks and
        // fails the read above, there is no iteration cap
        while !self.session.is_header_ready() {
            trace!("reading header: read next chunk");
            self.read_next_chunk()?;
        }
        self.check_dimensions()
    }

    fn check_dimensions(&self) -> Result<(), PngPipeErrors> {
        let (width, height) = self.session.dimensions();

        if width == 0 || height == 0 {
            return Err(PngPipeErrors::ZeroDimensions);
        }
        if width > self.options.max_width {
            return Err(PngPipeErrors::TooLargeDimensions(
                "width",
                self.options.max_width,
                width,
            ));
        }
        if height > self.options.max_height {
            return Err(PngPipeErrors::TooLargeDimensions(
                "height",
                self.options.max_height,
                height,
            ));
        }
        Ok(())
    }

    /// Image width and height, or `None` if the header phase has not run.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        if self.session.is_header_ready() {
            return Some(self.session.dimensions());
        }
        None
    }

    /// Read just enough of the stream to learn the image dimensions.
    ///
    /// Runs the signature check and header phase only; the pixel buffer is
    /// never allocated.
    pub fn probe(&mut self) -> Result<(usize, usize), PngPipeErrors> {
        self.decode_headers()?;
        Ok(self.session.dimensions())
    }

    /// Decode the whole image, consuming the decoder.
    ///
    /// Runs the header phase if it has not run yet, allocates the output
    /// buffer, then reads chunks until the parser reports the stream
    /// complete. On any failure every partially-built resource is dropped
    /// before the error returns; no partial image is ever handed out.
    pub fn decode(mut self) -> Result<DecodedImage, PngPipeErrors> {
        self.decode_headers()?;
        self.session.allocate()?;

        while !self.session.is_data_ready() {
            self.read_next_chunk()?;
        }

        let (width, height) = self.session.dimensions();
        debug_assert_eq!(self.parser.width() as usize, width);
        debug_assert_eq!(self.parser.height() as usize, height);

        let Some(data) = self.session.take_output() else {
            // allocate() ran above, the buffer must exist
            return Err(PngPipeErrors::AllocationFailure(0));
        };

        Ok(DecodedImage {
            data,
            width,
            height,
            format: self.options.format,
        })
    }
}

/// An owned, fully decoded image.
///
/// Holds the packed pixel storage for exactly one decode. Dropping the
/// image (or consuming it with [`into_data`](Self::into_data)) is the
/// single release matching the decode's single allocation.
pub struct DecodedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl DecodedImage {
    /// Image width in pixels.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The encoding the pixels are packed in.
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Length in bytes of one pixel row.
    pub const fn stride(&self) -> usize {
        self.width * self.format.bytes_per_pixel()
    }

    /// The packed pixels in raster order, starting at the first pixel.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image, returning the packed pixel storage.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl Debug for DecodedImage {
    // the pixel storage can be huge, print its size instead of its bytes
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(
            f,
            "DecodedImage {{ {} x {}, {:?}, {} bytes }}",
            self.width,
            self.height,
            self.format,
            self.data.len()
        )
    }
}
