//! A module containing [`Region`], the raw allocation behind a
//! [`ByteBuffer`](super::ByteBuffer).
//!
//! [`Region`] is also re-exported under the parent module.

mod region;
mod tests;

pub use region::*;
