//! The allocator seam used by this crate's collections.
//!
//! Collections are generic over any [`GlobalAlloc`], which is stable and already implemented by
//! [`System`](std::alloc::System). [`Global`] is the default and forwards to whichever allocator
//! is registered with `#[global_allocator]`, so buffers share memory with the rest of the program.
//! Supplying another allocator is mostly useful for arenas or for injecting failures in tests.

use std::alloc::{self, GlobalAlloc, Layout};

/// A zero-sized handle to the registered global allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

// SAFETY: Every method forwards to the matching std::alloc function, which upholds the
// GlobalAlloc contract for the registered allocator.
unsafe impl GlobalAlloc for Global {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: The caller upholds the contract of GlobalAlloc::alloc.
        unsafe { alloc::alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: The caller upholds the contract of GlobalAlloc::dealloc.
        unsafe { alloc::dealloc(ptr, layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: The caller upholds the contract of GlobalAlloc::alloc_zeroed.
        unsafe { alloc::alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: The caller upholds the contract of GlobalAlloc::realloc.
        unsafe { alloc::realloc(ptr, layout, new_size) }
    }
}
