use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr;

/// An allocator for tests which forwards to [`System`], counts allocation events and can be told
/// to start failing.
///
/// A "grant" is one successful `alloc` or `realloc`. While `budget` is `Some(n)`, only `n` more
/// grants are handed out and every later request returns null.
#[derive(Debug, Default)]
pub struct FaultyAlloc {
    budget: Cell<Option<usize>>,
    grants: Cell<usize>,
    frees: Cell<usize>,
    freed_bytes: Cell<usize>,
}

impl FaultyAlloc {
    pub fn unlimited() -> FaultyAlloc {
        FaultyAlloc::default()
    }

    pub fn failing_after(grants: usize) -> FaultyAlloc {
        let alloc = FaultyAlloc::default();
        alloc.set_budget(Some(grants));
        alloc
    }

    pub fn set_budget(&self, budget: Option<usize>) {
        self.budget.set(budget);
    }

    /// Makes every following allocation request fail.
    pub fn fail_from_now(&self) {
        self.set_budget(Some(0));
    }

    /// The number of successful `alloc` and `realloc` calls.
    pub fn grants(&self) -> usize {
        self.grants.get()
    }

    pub fn frees(&self) -> usize {
        self.frees.get()
    }

    /// The total size of every layout passed to `dealloc`.
    pub fn freed_bytes(&self) -> usize {
        self.freed_bytes.get()
    }

    fn take_grant(&self) -> bool {
        match self.budget.get() {
            Some(0) => false,
            Some(remaining) => {
                self.budget.set(Some(remaining - 1));
                true
            },
            None => true,
        }
    }

    fn record(&self, ptr: *mut u8) -> *mut u8 {
        if !ptr.is_null() {
            self.grants.set(self.grants.get() + 1);
        }
        ptr
    }
}

// SAFETY: All requests are forwarded to System unchanged, or refused by returning null, which the
// GlobalAlloc contract allows.
unsafe impl GlobalAlloc for FaultyAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if !self.take_grant() {
            return ptr::null_mut();
        }
        // SAFETY: The caller upholds the contract of GlobalAlloc::alloc.
        self.record(unsafe { System.alloc(layout) })
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.frees.set(self.frees.get() + 1);
        self.freed_bytes.set(self.freed_bytes.get() + layout.size());
        // SAFETY: ptr was allocated by System through this allocator with the same layout.
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if !self.take_grant() {
            return ptr::null_mut();
        }
        // SAFETY: The caller upholds the contract of GlobalAlloc::realloc and ptr belongs to
        // System.
        self.record(unsafe { System.realloc(ptr, layout, new_size) })
    }
}

// SAFETY: Forwards every call to the referenced allocator, which upholds the contract itself. This
// lets a test keep observing the allocator after the collection using it has been dropped.
unsafe impl GlobalAlloc for &FaultyAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: The caller upholds the contract of GlobalAlloc::alloc.
        unsafe { (**self).alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: The caller upholds the contract of GlobalAlloc::dealloc.
        unsafe { (**self).dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: The caller upholds the contract of GlobalAlloc::realloc.
        unsafe { (**self).realloc(ptr, layout, new_size) }
    }
}
