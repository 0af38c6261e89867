use std::alloc::GlobalAlloc;

use super::{ByteSource, FillError};
use crate::collections::contiguous::ByteBuffer;

impl<A: GlobalAlloc> ByteBuffer<A> {
    /// Appends bytes from `source` until it has no more, returning the number of bytes appended.
    ///
    /// # Errors
    /// Returns [`FillError::Source`] if the source fails and [`FillError::Alloc`] if the buffer
    /// can't grow. Bytes appended before the failure are kept. A byte that was read but couldn't be
    /// appended is lost.
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// # use strbuf::source::SliceSource;
    /// let mut buf = ByteBuffer::new();
    /// let read = buf.try_fill_from(SliceSource::new(b"read me")).unwrap();
    /// assert_eq!(read, 7);
    /// assert_eq!(buf, *b"read me");
    /// ```
    pub fn try_fill_from<S: ByteSource>(
        &mut self,
        mut source: S,
    ) -> Result<usize, FillError<S::Error>> {
        let mut appended = 0;

        while source.has_more().map_err(FillError::Source)? {
            let byte = source.next_byte().map_err(FillError::Source)?;
            self.try_push(byte).map_err(FillError::Alloc)?;
            appended += 1;
        }

        Ok(appended)
    }

    /// Appends bytes from `source` up to the first `delimiter`, which is consumed but not
    /// appended, or until the source has no more.
    ///
    /// Returns the number of bytes consumed from the source, including the delimiter. A return
    /// value of 0 means that the source was already exhausted, while an empty line returns 1.
    ///
    /// # Errors
    /// As with [`try_fill_from`](ByteBuffer::try_fill_from).
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// # use strbuf::source::SliceSource;
    /// let mut source = SliceSource::new(b"first\nsecond");
    ///
    /// let mut line = ByteBuffer::new();
    /// assert_eq!(line.try_fill_until(&mut source, b'\n').unwrap(), 6);
    /// assert_eq!(line, *b"first");
    ///
    /// let mut line = ByteBuffer::new();
    /// assert_eq!(line.try_fill_until(&mut source, b'\n').unwrap(), 6);
    /// assert_eq!(line, *b"second");
    /// ```
    pub fn try_fill_until<S: ByteSource>(
        &mut self,
        mut source: S,
        delimiter: u8,
    ) -> Result<usize, FillError<S::Error>> {
        let mut consumed = 0;

        while source.has_more().map_err(FillError::Source)? {
            let byte = source.next_byte().map_err(FillError::Source)?;
            consumed += 1;

            if byte == delimiter {
                break;
            }

            self.try_push(byte).map_err(FillError::Alloc)?;
        }

        Ok(consumed)
    }
}
