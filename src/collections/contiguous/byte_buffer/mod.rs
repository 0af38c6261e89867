//! A module containing [`ByteBuffer`] and its borrowed [`TerminatedView`].
//!
//! [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from [`std::slice`] are used for
//! borrowed iteration, through ByteBuffer's [`Deref<Target = [u8]>`](std::ops::Deref).
//!
//! Both types are also re-exported under the parent module.

mod byte_buffer;
mod view;

pub use byte_buffer::*;
pub use view::*;
