use std::alloc::{GlobalAlloc, Layout};
use std::fmt::{self, Debug, Formatter};
use std::ptr::NonNull;

use tracing::{debug, trace};

use crate::memory::Global;
use crate::util::error::{AllocError, AllocFailed, CapacityOverflow};
use crate::util::unreachable::UnreachableExtension;

/// The largest capacity a Region can have. One byte less than [`isize::MAX`] so that the
/// terminator slot always fits in a valid [`Layout`].
pub const MAX_CAP: usize = isize::MAX as usize - 1;

/// A growable, uninitialized allocation of bytes, owned exclusively by its holder.
///
/// A Region with capacity `cap > 0` owns exactly `cap + 1` bytes. The extra byte is the slot for a
/// terminator, so that a buffer holding `cap` bytes can always produce a terminated view without
/// reallocating. A Region with capacity 0 owns no memory at all and holds a dangling pointer.
///
/// Regions never shrink and never read their contents; tracking which bytes are initialized is
/// the responsibility of the owner.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `cap` | `O(1)` |
/// | `try_realloc` | `O(n)`*, `O(1)` |
/// | `release` | `O(1)` |
///
/// \* Growth may move the allocation, copying all `n` bytes, unless the allocator can extend it in
/// place.
pub struct Region<A: GlobalAlloc = Global> {
    pub(crate) ptr: NonNull<u8>,
    pub(crate) cap: usize,
    pub(crate) alloc: A,
}

impl Region {
    /// Creates a new Region with capacity 0 in the global allocator. Nothing is allocated.
    pub const fn new() -> Region {
        Region::new_in(Global)
    }
}

impl<A: GlobalAlloc> Region<A> {
    /// Creates a new Region with capacity 0 that will allocate from `alloc` once it grows.
    pub const fn new_in(alloc: A) -> Region<A> {
        Region {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
        }
    }

    /// Returns the capacity of the Region, excluding the terminator slot.
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns true if the Region currently owns an allocation.
    pub const fn is_allocated(&self) -> bool {
        self.cap != 0
    }

    /// Returns a reference to the allocator backing this Region.
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Grows the Region so that it can hold `new_cap` bytes, plus the terminator slot. Bytes that
    /// were within the old allocation keep their values. A `new_cap` no larger than the current
    /// capacity is a no-op, Regions don't shrink.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if `new_cap` exceeds [`MAX_CAP`] and [`AllocFailed`] if the
    /// allocator can't satisfy the request. In both cases the Region is unchanged and still owns
    /// its previous allocation.
    pub fn try_realloc(&mut self, new_cap: usize) -> Result<(), AllocError> {
        if new_cap <= self.cap {
            return Ok(());
        }

        let new_layout = Self::make_layout(new_cap)?;

        let raw_ptr = if self.cap == 0 {
            // SAFETY: new_layout has a non-zero size because it always includes the terminator
            // slot.
            unsafe { self.alloc.alloc(new_layout) }
        } else {
            let old_layout = Self::make_layout(self.cap)?;

            // SAFETY: ptr was allocated by self.alloc with old_layout. The new size is non-zero
            // and make_layout guarantees that it doesn't overflow isize::MAX.
            unsafe { self.alloc.realloc(self.ptr.as_ptr(), old_layout, new_layout.size()) }
        };

        let Some(new_ptr) = NonNull::new(raw_ptr) else {
            debug!(old_cap = self.cap, new_cap, "region allocation failed");
            return Err(AllocFailed { layout: new_layout }.into());
        };

        trace!(old_cap = self.cap, new_cap, "region reallocated");
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// Frees the owned allocation, if any, returning the Region to capacity 0.
    pub fn release(&mut self) {
        if self.cap == 0 {
            return;
        }

        // SAFETY: cap was accepted by make_layout when the Region grew to it, and the same cap
        // always produces the same layout.
        let layout = unsafe { Self::make_layout(self.cap).unreachable() };

        // SAFETY: ptr is allocated in self.alloc with this exact layout and is forgotten below, so
        // it can't be freed twice.
        unsafe { self.alloc.dealloc(self.ptr.as_ptr(), layout) }

        trace!(cap = self.cap, "region released");
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    /// A helper function to create the [`Layout`] of a Region with capacity `cap`, including the
    /// terminator slot.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if `cap` exceeds [`MAX_CAP`].
    pub(crate) fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        if cap > MAX_CAP {
            return Err(CapacityOverflow);
        }

        Layout::array::<u8>(cap + 1).map_err(|_| CapacityOverflow)
    }
}

impl<A: GlobalAlloc + Default> Default for Region<A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<A: GlobalAlloc> Drop for Region<A> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<A: GlobalAlloc> Debug for Region<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}

// SAFETY: Regions own their allocation through a unique pointer, so they can be sent whenever the
// allocator can.
unsafe impl<A: GlobalAlloc + Send> Send for Region<A> {}
// SAFETY: Region's API only hands out the pointer by value and performs no interior mutation, so
// sharing a Region is as safe as sharing its allocator.
unsafe impl<A: GlobalAlloc + Sync> Sync for Region<A> {}
