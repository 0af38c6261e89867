//! Collection types.
//!
//! # Purpose
//! The collections here exist to manage memory by hand in a way that safe code can't misuse:
//! every allocation is owned by exactly one value, released when that value is dropped, and only
//! reachable through borrows that the compiler checks.
//!
//! # Method
//! [`ByteBuffer`](contiguous::ByteBuffer) implements [`Deref<Target = [u8]>`](std::ops::Deref)
//! and DerefMut over its contents, so searching, comparing and iterating come from the slice
//! methods. The terminator sits just past that slice and can't be reached through it.
//!
//! ```
//! # use strbuf::collections::contiguous::ByteBuffer;
//! let buf = ByteBuffer::from("key=value");
//! assert_eq!(buf.iter().position(|&b| b == b'='), Some(3));
//! assert_eq!(buf.last(), Some(&b'e'));
//! assert_eq!(buf.as_terminated_view().last(), Some(&0));
//! ```

pub mod contiguous;
