//! Sources of bytes for read loops, and the loops themselves.
//!
//! A [`ByteSource`] exposes the two operations a read loop needs: whether there is more input and
//! the next byte of it. [`ByteBuffer::try_fill_from`](crate::collections::contiguous::ByteBuffer::try_fill_from)
//! and [`try_fill_until`](crate::collections::contiguous::ByteBuffer::try_fill_until) drive such a
//! loop, appending every byte to a buffer.
#![warn(missing_docs)]

mod error;
mod fill;
mod source;

pub use error::*;
pub use source::*;
