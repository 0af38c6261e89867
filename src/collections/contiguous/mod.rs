//! Contiguous collection types. Namely [`ByteBuffer`], a growable string of bytes with a
//! terminated view, and [`Region`], the raw allocation it is built on.
#![warn(missing_docs)]

pub mod byte_buffer;
pub mod region;

#[doc(inline)]
pub use byte_buffer::{ByteBuffer, TerminatedView};
#[doc(inline)]
pub use region::{MAX_CAP, Region};
