use std::alloc::GlobalAlloc;
use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::ffi::{CString, NulError};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::io;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use tracing::trace;

use super::TerminatedView;
use crate::collections::contiguous::region::{MAX_CAP, Region};
use crate::memory::Global;
use crate::util::error::{AllocError, CapacityOverflow};
use crate::util::fmt::DebugBytes;
use crate::util::result::AllocResultExtension;

const MIN_CAP: usize = 8;

const GROWTH_FACTOR: usize = 2;

/// The terminated view of a buffer that has never allocated.
static EMPTY_TERMINATED: [u8; 1] = [0];

/// A growable string of bytes which can always produce a zero-terminated view of its contents.
///
/// The terminator is not part of the content: it is excluded from [`len`](ByteBuffer::len) and
/// from the slice that ByteBuffer derefs to. It is kept in place after every append, so that
/// [`as_terminated_view`](ByteBuffer::as_terminated_view) never needs to allocate or mutate.
///
/// Every growing method has a `try_` variant returning an [`AllocError`]. When one of those fails,
/// the buffer is left exactly as it was before the call. The other variants panic on capacity
/// overflow and call [`handle_alloc_error`](std::alloc::handle_alloc_error) when the allocator
/// fails.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of bytes in the ByteBuffer.
/// - `m`: The number of bytes being appended.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `push_unchecked` | `O(1)` |
/// | `extend_from_slice` | `O(m)`*, `O(n+m)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `as_terminated_view` | `O(1)` |
/// | `destroy` | `O(1)` |
///
/// \* If the ByteBuffer doesn't have enough capacity for the new bytes, it is reallocated once,
/// to at least double its capacity.
///
/// \** If the ByteBuffer already has enough capacity for the additional bytes, `reserve` is `O(1)`.
pub struct ByteBuffer<A: GlobalAlloc = Global> {
    pub(crate) region: Region<A>,
    pub(crate) len: usize,
}

impl ByteBuffer {
    /// Creates a new, empty ByteBuffer. Memory will be allocated when the first byte is appended.
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// let buf = ByteBuffer::new();
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.cap(), 0);
    /// ```
    pub const fn new() -> ByteBuffer {
        ByteBuffer::new_in(Global)
    }

    /// Creates a new ByteBuffer with capacity exactly equal to the provided value, allowing that
    /// many bytes to be appended without reallocation.
    ///
    /// # Panics
    /// Panics if `cap` exceeds [`MAX_CAP`].
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// let mut buf = ByteBuffer::with_cap(5);
    /// assert_eq!(buf.cap(), 5);
    /// buf.extend_from_slice(b"Hello");
    /// assert_eq!(buf.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> ByteBuffer {
        ByteBuffer::try_with_cap(cap).or_handle_alloc_error()
    }

    /// Fallible version of [`with_cap`](ByteBuffer::with_cap).
    ///
    /// # Errors
    /// Returns an [`AllocError`] if the allocation can't be made.
    pub fn try_with_cap(cap: usize) -> Result<ByteBuffer, AllocError> {
        ByteBuffer::try_with_cap_in(cap, Global)
    }
}

impl<A: GlobalAlloc> ByteBuffer<A> {
    /// Creates a new, empty ByteBuffer which will allocate from `alloc`.
    pub const fn new_in(alloc: A) -> ByteBuffer<A> {
        ByteBuffer {
            region: Region::new_in(alloc),
            len: 0,
        }
    }

    /// Creates a new ByteBuffer with capacity `cap`, allocated from `alloc`.
    ///
    /// # Errors
    /// Returns an [`AllocError`] if the allocation can't be made.
    pub fn try_with_cap_in(cap: usize, alloc: A) -> Result<ByteBuffer<A>, AllocError> {
        let mut buf = ByteBuffer::new_in(alloc);
        buf.realloc_with_cap(cap)?;
        Ok(buf)
    }

    /// Returns the number of bytes in the ByteBuffer, excluding the terminator.
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// let buf = ByteBuffer::from("abc");
    /// assert_eq!(buf.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the ByteBuffer contains no bytes.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of bytes the ByteBuffer can hold without reallocating.
    pub const fn cap(&self) -> usize {
        self.region.cap()
    }

    /// Returns a reference to the allocator backing this ByteBuffer.
    pub const fn allocator(&self) -> &A {
        self.region.allocator()
    }

    /// Returns the contents of the ByteBuffer, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        self
    }

    /// Appends a single byte to the end of the ByteBuffer, growing it if required.
    ///
    /// # Panics
    /// Panics if the required capacity would exceed [`MAX_CAP`].
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// let mut buf = ByteBuffer::new();
    /// buf.push(b'H');
    /// buf.push(b'i');
    /// assert_eq!(buf.as_terminated_view().as_bytes_with_nul(), b"Hi\0");
    /// ```
    pub fn push(&mut self, byte: u8) {
        self.try_push(byte).or_handle_alloc_error()
    }

    /// Appends a single byte to the end of the ByteBuffer, growing it if required.
    ///
    /// # Errors
    /// Returns an [`AllocError`] if the ByteBuffer needed to grow and couldn't. The ByteBuffer is
    /// unchanged in that case.
    pub fn try_push(&mut self, byte: u8) -> Result<(), AllocError> {
        if self.len == self.cap() {
            self.grow(1)?;
        }

        // SAFETY: The capacity has just been adjusted to support the addition of the new byte.
        unsafe { self.push_unchecked(byte) }
        Ok(())
    }

    /// Appends a single byte, assuming that there is enough capacity to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that [`len`](ByteBuffer::len) is less than
    /// [`cap`](ByteBuffer::cap), using methods like [`reserve`](ByteBuffer::reserve) or
    /// [`with_cap`](ByteBuffer::with_cap). Using this method on a ByteBuffer without enough
    /// capacity is undefined behavior.
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// let mut buf = ByteBuffer::with_cap(3);
    /// for byte in *b"abc" {
    ///     // SAFETY: buf was created with room for exactly these three bytes.
    ///     unsafe { buf.push_unchecked(byte) }
    /// }
    /// assert_eq!(buf, *b"abc");
    /// ```
    pub unsafe fn push_unchecked(&mut self, byte: u8) {
        // SAFETY: The caller guarantees len < cap, so both len and len + 1 are within the cap + 1
        // bytes owned by the Region.
        unsafe { self.region.ptr.add(self.len).write(byte) }
        self.len += 1;
        self.terminate();
    }

    /// Appends all bytes of `bytes` in order, reallocating at most once.
    ///
    /// # Panics
    /// Panics if the required capacity would exceed [`MAX_CAP`].
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// let mut buf = ByteBuffer::new();
    /// buf.extend_from_slice(b"Hello, ");
    /// buf.extend_from_slice(b"world!");
    /// assert_eq!(buf, *b"Hello, world!");
    /// ```
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.try_extend_from_slice(bytes).or_handle_alloc_error()
    }

    /// Appends all bytes of `bytes` in order, reallocating at most once.
    ///
    /// # Errors
    /// Returns an [`AllocError`] if the ByteBuffer needed to grow and couldn't. No bytes are
    /// appended in that case.
    pub fn try_extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), AllocError> {
        if bytes.is_empty() {
            return Ok(());
        }

        self.try_reserve(bytes.len())?;

        // SAFETY: The Region has room for len + bytes.len() bytes after reserving. bytes can't
        // overlap the Region, because the borrow checker prevents borrowing self while it is
        // mutably borrowed.
        unsafe {
            ptr::copy_nonoverlapping(
                bytes.as_ptr(),
                self.region.ptr.add(self.len).as_ptr(),
                bytes.len(),
            );
        }

        self.len += bytes.len();
        self.terminate();
        Ok(())
    }

    /// Ensures that the ByteBuffer has capacity to hold an additional `extra` bytes. After invoking
    /// this method, the capacity will be >= len + extra.
    ///
    /// # Panics
    /// Panics if the required capacity would exceed [`MAX_CAP`].
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).or_handle_alloc_error()
    }

    /// Fallible version of [`reserve`](ByteBuffer::reserve).
    ///
    /// # Errors
    /// Returns an [`AllocError`] if the ByteBuffer couldn't grow. The ByteBuffer is unchanged in
    /// that case.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), AllocError> {
        if self.cap() - self.len >= extra {
            return Ok(());
        }

        self.grow(extra)
    }

    /// Returns a read-only view of the contents followed by a zero terminator.
    ///
    /// The view borrows the ByteBuffer, so it can't outlive it or be held across an append.
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// let buf = ByteBuffer::new();
    /// assert_eq!(buf.as_terminated_view().as_bytes_with_nul(), b"\0");
    ///
    /// let buf = ByteBuffer::from("Hi");
    /// let view = buf.as_terminated_view();
    /// assert_eq!(view.len(), 2);
    /// assert_eq!(view.to_c_str().unwrap(), c"Hi");
    /// ```
    pub fn as_terminated_view(&self) -> TerminatedView<'_> {
        if !self.region.is_allocated() {
            return TerminatedView::new(&EMPTY_TERMINATED);
        }

        // SAFETY: The Region is allocated, so it owns cap + 1 >= len + 1 bytes. All bytes up to
        // and including len are initialized, the last being the terminator. The returned view
        // borrows self, so nothing can mutate them while it lives.
        let bytes = unsafe { slice::from_raw_parts(self.region.ptr.as_ptr(), self.len + 1) };
        TerminatedView::new(bytes)
    }

    /// Releases the memory owned by the ByteBuffer. This is equivalent to dropping it, but makes
    /// the end of its lifetime explicit at the call site.
    pub fn destroy(self) {
        trace!(len = self.len, cap = self.cap(), "byte buffer destroyed");
        drop(self);
    }

    /// Converts the contents into an owned [`CString`], releasing the ByteBuffer.
    ///
    /// # Errors
    /// Returns a [`NulError`] if the contents contain a zero byte.
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// let buf = ByteBuffer::from("line");
    /// assert_eq!(buf.into_c_string().unwrap().as_bytes_with_nul(), b"line\0");
    /// ```
    pub fn into_c_string(self) -> Result<CString, NulError> {
        CString::new(self.as_bytes())
    }

    /// Copies the contents into an owned boxed slice, releasing the ByteBuffer.
    pub fn into_boxed_bytes(self) -> Box<[u8]> {
        Box::from(self.as_bytes())
    }

    /// Grows the Region so that at least `extra` more bytes fit, following the growth policy.
    ///
    /// # Errors
    /// Returns an [`AllocError`] if the new capacity overflows or can't be allocated.
    pub(crate) fn grow(&mut self, extra: usize) -> Result<(), AllocError> {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;

        // If doubling would pass the maximum capacity, use the maximum. If even that isn't enough,
        // realloc_with_cap reports the overflow.
        let doubled = cmp::min(self.cap().saturating_mul(GROWTH_FACTOR), MAX_CAP);
        let new_cap = cmp::max(required, cmp::max(doubled, MIN_CAP));

        self.realloc_with_cap(new_cap)
    }

    /// Reallocates the Region with the provided capacity, then restores the terminator.
    ///
    /// # Errors
    /// Returns an [`AllocError`] if the new capacity overflows or can't be allocated.
    pub(crate) fn realloc_with_cap(&mut self, new_cap: usize) -> Result<(), AllocError> {
        self.region.try_realloc(new_cap)?;
        self.terminate();
        Ok(())
    }

    /// Writes the terminator after the last byte of content, if the Region is allocated.
    fn terminate(&mut self) {
        if self.region.is_allocated() {
            // SAFETY: len <= cap and the Region owns cap + 1 bytes.
            unsafe { self.region.ptr.add(self.len).write(0) }
        }
    }
}

impl<A: GlobalAlloc> Extend<u8> for ByteBuffer<A> {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for byte in iter {
            self.push(byte);
        }
    }
}

impl<'a, A: GlobalAlloc> Extend<&'a u8> for ByteBuffer<A> {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl FromIterator<u8> for ByteBuffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut buf = ByteBuffer::new();
        buf.extend(iter);
        buf
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(value: &[u8]) -> Self {
        let mut buf = ByteBuffer::new();
        buf.extend_from_slice(value);
        buf
    }
}

impl From<&str> for ByteBuffer {
    fn from(value: &str) -> Self {
        ByteBuffer::from(value.as_bytes())
    }
}

impl<A: GlobalAlloc + Default> Default for ByteBuffer<A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<A: GlobalAlloc> Deref for ByteBuffer<A> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len bytes of the Region are initialized. The pointer is nonnull and
        // dangling only when len is 0, which is valid for an empty slice. The borrow checker
        // enforces that self isn't mutated due to this function taking a &self.
        unsafe { slice::from_raw_parts(self.region.ptr.as_ptr(), self.len) }
    }
}

impl<A: GlobalAlloc> DerefMut for ByteBuffer<A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As with deref, the first len bytes are initialized. The terminator sits after
        // them, so it can't be overwritten through this slice.
        unsafe { slice::from_raw_parts_mut(self.region.ptr.as_ptr(), self.len) }
    }
}

impl<A: GlobalAlloc> AsRef<[u8]> for ByteBuffer<A> {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl<A: GlobalAlloc> AsMut<[u8]> for ByteBuffer<A> {
    fn as_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl<A: GlobalAlloc> Borrow<[u8]> for ByteBuffer<A> {
    fn borrow(&self) -> &[u8] {
        self
    }
}

impl<A: GlobalAlloc> BorrowMut<[u8]> for ByteBuffer<A> {
    fn borrow_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl<'a, A: GlobalAlloc> IntoIterator for &'a ByteBuffer<A> {
    type Item = &'a u8;

    type IntoIter = slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A: GlobalAlloc + Clone> Clone for ByteBuffer<A> {
    fn clone(&self) -> Self {
        let mut buf = ByteBuffer::new_in(self.allocator().clone());
        buf.try_extend_from_slice(self).or_handle_alloc_error();
        buf
    }
}

impl<A: GlobalAlloc, B: GlobalAlloc> PartialEq<ByteBuffer<B>> for ByteBuffer<A> {
    fn eq(&self, other: &ByteBuffer<B>) -> bool {
        **self == **other
    }
}

impl<A: GlobalAlloc> Eq for ByteBuffer<A> {}

impl<A: GlobalAlloc> PartialEq<[u8]> for ByteBuffer<A> {
    fn eq(&self, other: &[u8]) -> bool {
        **self == *other
    }
}

impl<A: GlobalAlloc> PartialEq<&[u8]> for ByteBuffer<A> {
    fn eq(&self, other: &&[u8]) -> bool {
        **self == **other
    }
}

impl<A: GlobalAlloc, const N: usize> PartialEq<[u8; N]> for ByteBuffer<A> {
    fn eq(&self, other: &[u8; N]) -> bool {
        **self == *other
    }
}

impl<A: GlobalAlloc> Hash for ByteBuffer<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<A: GlobalAlloc> Debug for ByteBuffer<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("contents", &DebugBytes(self))
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<A: GlobalAlloc> Display for ByteBuffer<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self))
    }
}

impl<A: GlobalAlloc> fmt::Write for ByteBuffer<A> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.try_extend_from_slice(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl<A: GlobalAlloc> io::Write for ByteBuffer<A> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.try_extend_from_slice(buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.try_extend_from_slice(buf)?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
