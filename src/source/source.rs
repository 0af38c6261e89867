use std::convert::Infallible;
use std::io::{self, BufRead};

/// A producer of bytes, consumed one at a time by a read loop.
///
/// Callers are expected to check [`has_more`](ByteSource::has_more) before every call to
/// [`next_byte`](ByteSource::next_byte).
pub trait ByteSource {
    /// The error raised when the source can't be read.
    type Error;

    /// Returns true if at least one more byte can be read.
    fn has_more(&mut self) -> Result<bool, Self::Error>;

    /// Reads and consumes the next byte.
    fn next_byte(&mut self) -> Result<u8, Self::Error>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    fn has_more(&mut self) -> Result<bool, Self::Error> {
        (**self).has_more()
    }

    fn next_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).next_byte()
    }
}

/// A source reading from a byte slice. It can't fail.
///
/// # Panics
/// [`next_byte`](ByteSource::next_byte) panics if the slice is already exhausted.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Creates a source which yields each byte of `bytes` in order.
    pub const fn new(bytes: &'a [u8]) -> SliceSource<'a> {
        SliceSource { bytes }
    }

    /// Returns the bytes that haven't been read yet.
    pub const fn remaining(&self) -> &'a [u8] {
        self.bytes
    }
}

impl ByteSource for SliceSource<'_> {
    type Error = Infallible;

    fn has_more(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.bytes.is_empty())
    }

    fn next_byte(&mut self) -> Result<u8, Self::Error> {
        let Some((&first, rest)) = self.bytes.split_first() else {
            panic!("next_byte called on an exhausted SliceSource!");
        };
        self.bytes = rest;
        Ok(first)
    }
}

/// A source reading from any [`BufRead`], such as a locked stdin or a
/// [`BufReader`](std::io::BufReader) over a file.
///
/// Reads interrupted by a signal are retried. Calling [`next_byte`](ByteSource::next_byte) at the
/// end of the input returns an [`UnexpectedEof`](io::ErrorKind::UnexpectedEof) error.
#[derive(Debug)]
pub struct ReaderSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    /// Creates a source which reads bytes from `reader`, without buffering any further.
    pub const fn new(reader: R) -> ReaderSource<R> {
        ReaderSource { reader }
    }

    /// Returns the reader, positioned just after the last byte that was read.
    ///
    /// # Examples
    /// ```
    /// # use std::io::{BufRead, Cursor};
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// # use strbuf::source::ReaderSource;
    /// let mut source = ReaderSource::new(Cursor::new(b"key:value"));
    /// let mut key = ByteBuffer::new();
    /// key.try_fill_until(&mut source, b':').unwrap();
    ///
    /// let mut rest = source.into_inner();
    /// assert_eq!(key, *b"key");
    /// assert_eq!(rest.fill_buf().unwrap(), b"value");
    /// ```
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error),
            }
        }
    }
}

impl<R: BufRead> ByteSource for ReaderSource<R> {
    type Error = io::Error;

    fn has_more(&mut self) -> Result<bool, Self::Error> {
        Ok(self.peek()?.is_some())
    }

    fn next_byte(&mut self) -> Result<u8, Self::Error> {
        match self.peek()? {
            Some(byte) => {
                self.reader.consume(1);
                Ok(byte)
            },
            None => Err(io::ErrorKind::UnexpectedEof.into()),
        }
    }
}
