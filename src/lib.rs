//! This crate provides a growable string of bytes that can always be handed to consumers expecting
//! a zero-terminated string, along with the raw allocation it is built on.
//!
//! # Purpose
//! C-style code usually wraps a resizable string in a record plus a handful of functions: create
//! it, append a character, view it as a C string, destroy it. Each of those is easy to misuse by
//! hand. Forgetting the destroy leaks, calling it twice frees twice, and holding a view across an
//! append reads freed memory. This crate expresses the same record in Rust, so that those mistakes
//! don't compile.
//!
//! # Method
//! [`ByteBuffer`](collections::contiguous::ByteBuffer) owns a
//! [`Region`](collections::contiguous::Region): `cap + 1` bytes from a
//! [`GlobalAlloc`](std::alloc::GlobalAlloc), where the extra byte is always available for the
//! terminator. The terminator is rewritten after every append, so producing a
//! [`TerminatedView`](collections::contiguous::TerminatedView) is free and needs only a shared
//! borrow. Views borrow the buffer, so any append or destroy while one is alive is rejected by the
//! borrow checker. Destroying consumes the buffer, so using it afterwards can't be expressed.
//!
//! Capacity doubles on growth (starting at 8), so a long run of single byte appends reallocates
//! only a logarithmic number of times. Appending a slice reserves space for all of it at once.
//!
//! # Error Handling
//! Just like a standard library collection, most methods panic on capacity overflow and report
//! allocator failure through [`handle_alloc_error`](std::alloc::handle_alloc_error), because
//! nobody wants to handle an error on every push. Each of them has a `try_` counterpart returning
//! [`AllocError`], which leaves the buffer exactly as it was when it fails.
//!
//! Errors are strongly typed, using enums for static dispatch rather than dynamic, with small
//! structs that implement [`Error`](std::error::Error).
//!
//! # Logging
//! Region reallocations and releases are reported at the `trace` level through [`tracing`], failed
//! allocations at the `debug` level. Nothing is logged unless the application installs a
//! subscriber.
//!
//! # Dependencies
//! The `ffi` feature (enabled by default) uses `libc` to measure views with `strlen`, the same way a
//! C consumer would.
//!
//! This crate also depends on some derive macros because they're helpful and remove the need for
//! some very repetitive programming.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;
pub mod memory;
pub mod source;

pub(crate) mod util;

pub use util::error::{AllocError, AllocFailed, CapacityOverflow};
