/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Byte sources the chunk reader can pull from
//!
//! A source is a forward-only byte stream with an external read position.
//! Two variants exist, a file on disk and a borrowed in-memory buffer;
//! both sit behind [`ChunkSource`] so the decoder is generic over them.

use core::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Errors from reading bytes out of a source
pub enum SourceError {
    /// Underlying std I/O error, file variant only
    StdIoError(std::io::Error),
    /// The source ended before a full read could be satisfied,
    /// (expected, read)
    NotEnoughBytes(usize, usize),
}

impl Debug for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::StdIoError(err) => {
                writeln!(f, "Underlying I/O error: {}", err)
            }
            Self::NotEnoughBytes(expected, read) => {
                writeln!(
                    f,
                    "Not enough bytes, expected {} but the source gave {}",
                    expected, read
                )
            }
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(value: std::io::Error) -> Self {
        SourceError::StdIoError(value)
    }
}

/// A sequentially readable byte source feeding the chunk reader.
///
/// Implementations never need to look ahead; the chunk reader only asks
/// for exactly the bytes the current chunk declares.
pub trait ChunkSource {
    /// Read bytes into `buf` returning how many bytes were actually read.
    ///
    /// A return of `0` with a non-empty `buf` means end of stream.
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;

    /// Fill `buf` completely or fail.
    ///
    /// Ending before `buf` is full is an error; a chunk that declares
    /// more bytes than its stream holds must surface as
    /// [`SourceError::NotEnoughBytes`], never as a short success.
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        let mut filled = 0;

        while filled < buf.len() {
            let read = self.read_bytes(&mut buf[filled..])?;
            if read == 0 {
                return Err(SourceError::NotEnoughBytes(buf.len(), filled));
            }
            filled += read;
        }
        Ok(())
    }
}

/// A seekable file on disk read sequentially from the start.
pub struct FileSource {
    file: File,
}

impl FileSource {
    /// Open the file at `path` for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<FileSource, SourceError> {
        let file = File::open(path)?;
        Ok(FileSource { file })
    }
}

impl ChunkSource for FileSource {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        self.file.read(buf).map_err(SourceError::from)
    }
}

/// A borrowed in-memory byte slice plus a read offset.
pub struct MemSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> MemSource<'a> {
    /// Create a source reading from the start of `data`.
    pub const fn new(data: &'a [u8]) -> MemSource<'a> {
        MemSource { data, position: 0 }
    }

    /// Number of bytes not yet consumed.
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl ChunkSource for MemSource<'_> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        let can_read = buf.len().min(self.remaining());

        buf[..can_read].copy_from_slice(&self.data[self.position..self.position + can_read]);
        self.position += can_read;

        Ok(can_read)
    }
}
