use std::fmt::{self, Debug, Formatter};

/// Formats a byte slice as an escaped byte string literal, like `b"Hi\n"`.
pub struct DebugBytes<'a>(pub &'a [u8]);

impl Debug for DebugBytes<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "b\"{}\"", self.0.escape_ascii())
    }
}
