use derive_more::{Display, Error, IsVariant};

use crate::util::error::AllocError;

/// An error raised while filling a buffer from a [`ByteSource`](super::ByteSource).
///
/// Bytes appended before the error stay in the buffer. The append that failed, if any, left no
/// trace.
#[derive(Debug, Display, Error, IsVariant)]
pub enum FillError<E> {
    /// The source failed to report or produce its next byte.
    #[display("Failed to read from source: {_0}")]
    Source(E),
    /// The buffer couldn't grow to hold the next byte.
    #[display("Failed to grow buffer: {_0}")]
    Alloc(AllocError),
}
