//! Compression support
//!
//! Input compression is detected from magic bytes rather than the file name,
//! so a gzip or bzip2 stream is decoded even when it is called `*.pdb`. Output is
//! compressed when the destination path ends in `.gz`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::IoResult;

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Compression detected at the start of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamCompression {
    Plain,
    Gzip,
    Bzip2,
}

/// Classify a stream by its leading bytes
pub fn detect_compression(head: &[u8]) -> StreamCompression {
    if head.starts_with(GZIP_MAGIC) {
        StreamCompression::Gzip
    } else if head.starts_with(BZIP2_MAGIC) {
        StreamCompression::Bzip2
    } else {
        StreamCompression::Plain
    }
}

/// Check if a path indicates a gzip file (by extension)
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Wrap a byte stream in a line reader, decoding gzip or bzip2 when the
/// magic bytes say so
pub fn decompress<R: Read + 'static>(reader: R) -> IoResult<Box<dyn BufRead>> {
    let mut buffered = BufReader::new(reader);
    let head = buffered.fill_buf()?;
    match detect_compression(head) {
        StreamCompression::Plain => Ok(Box::new(buffered)),
        StreamCompression::Gzip => Ok(Box::new(BufReader::new(MultiGzDecoder::new(buffered)))),
        StreamCompression::Bzip2 => Ok(Box::new(BufReader::new(MultiBzDecoder::new(buffered)))),
    }
}

/// Open a file for reading, transparently decoding gzip and bzip2
pub fn open_file(path: &Path) -> IoResult<Box<dyn BufRead>> {
    let file = File::open(path)?;
    decompress(file)
}

/// Writer that can optionally gzip-compress output
pub enum MaybeGzWriter<W: Write> {
    /// Plain uncompressed writer
    Plain(W),
    /// Gzip-compressed writer
    Gzip(GzEncoder<W>),
}

impl<W: Write> Write for MaybeGzWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            MaybeGzWriter::Plain(w) => w.write(buf),
            MaybeGzWriter::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            MaybeGzWriter::Plain(w) => w.flush(),
            MaybeGzWriter::Gzip(w) => w.flush(),
        }
    }
}

impl<W: Write> MaybeGzWriter<W> {
    /// Finish compression and return the underlying writer
    pub fn finish(self) -> std::io::Result<W> {
        match self {
            MaybeGzWriter::Plain(w) => Ok(w),
            MaybeGzWriter::Gzip(w) => w.finish(),
        }
    }
}

/// Create a file for writing, gzip-compressed when the path ends in `.gz`
pub fn create_file(path: &Path) -> IoResult<MaybeGzWriter<BufWriter<File>>> {
    let file = BufWriter::new(File::create(path)?);
    if is_gzip_path(path) {
        Ok(MaybeGzWriter::Gzip(GzEncoder::new(file, Compression::default())))
    } else {
        Ok(MaybeGzWriter::Plain(file))
    }
}
