use std::ffi::{CStr, FromBytesWithNulError, c_char};
use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;

use crate::util::fmt::DebugBytes;
use crate::util::unreachable::UnreachableExtension;

/// A read-only view of a [`ByteBuffer`](super::ByteBuffer)'s contents, followed by a zero
/// terminator.
///
/// The view derefs to the terminated bytes, so its slice is one byte longer than
/// [`len`](TerminatedView::len). It borrows the buffer it came from and is invalidated, at compile
/// time, by anything that could move or free the buffer's storage.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminatedView<'a> {
    bytes: &'a [u8],
}

impl<'a> TerminatedView<'a> {
    /// Wraps `bytes`, which must end with a terminator.
    pub(crate) fn new(bytes: &'a [u8]) -> TerminatedView<'a> {
        debug_assert_eq!(bytes.last(), Some(&0), "terminated view is missing its terminator");
        TerminatedView { bytes }
    }

    /// Returns the number of bytes of content, excluding the terminator.
    pub const fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    /// Returns true if the view holds nothing but the terminator.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the content, without the terminator.
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.bytes[..self.len()]
    }

    /// Returns the content, followed by the terminator.
    pub const fn as_bytes_with_nul(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns a pointer to the first byte, suitable for any consumer that reads up to a zero
    /// byte.
    pub const fn as_ptr(&self) -> *const c_char {
        self.bytes.as_ptr().cast()
    }

    /// Interprets the view as a [`CStr`].
    ///
    /// # Errors
    /// Returns an error if the content itself contains a zero byte, because the resulting `CStr`
    /// wouldn't cover all of it.
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// let buf = ByteBuffer::from(&b"a\0b"[..]);
    /// assert!(buf.as_terminated_view().to_c_str().is_err());
    /// ```
    pub fn to_c_str(&self) -> Result<&'a CStr, FromBytesWithNulError> {
        CStr::from_bytes_with_nul(self.bytes)
    }

    /// Returns the [`CStr`] that a terminator-based consumer would see: the content up to its
    /// first zero byte.
    ///
    /// # Examples
    /// ```
    /// # use strbuf::collections::contiguous::ByteBuffer;
    /// let buf = ByteBuffer::from(&b"a\0b"[..]);
    /// assert_eq!(buf.as_terminated_view().until_nul(), c"a");
    /// ```
    pub fn until_nul(&self) -> &'a CStr {
        // SAFETY: The view always ends with a terminator, so a zero byte is always found.
        unsafe { CStr::from_bytes_until_nul(self.bytes).unreachable() }
    }

    /// Returns the length of the content as measured by `strlen`.
    #[cfg(feature = "ffi")]
    pub fn c_len(&self) -> usize {
        // SAFETY: The pointer is valid for the whole view, which ends with a terminator, so strlen
        // never reads out of bounds.
        unsafe { libc::strlen(self.as_ptr()) }
    }
}

impl Deref for TerminatedView<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes
    }
}

impl AsRef<[u8]> for TerminatedView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl PartialEq<[u8]> for TerminatedView<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for TerminatedView<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.bytes == other
    }
}

impl Debug for TerminatedView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        DebugBytes(self.bytes).fmt(f)
    }
}
