use std::fmt::Debug;
use std::hint;

/// Unwrapping for results produced by a fallible std API that can't fail for the arguments given,
/// such as a view that is known to end with a terminator, or a layout that was already accepted
/// once.
///
/// Debug builds check the claim and panic with the unexpected failure. Release builds trust it and
/// compile the failing branch away with [`unreachable_unchecked`](hint::unreachable_unchecked).
pub(crate) trait UnreachableExtension<T> {
    /// Returns the contained success value.
    ///
    /// # Safety
    /// The value must be Ok. Unwrapping an Err is undefined behavior in release builds.
    unsafe fn unreachable(self) -> T;
}

impl<T, E: Debug> UnreachableExtension<T> for Result<T, E> {
    unsafe fn unreachable(self) -> T {
        match self {
            Ok(val) => val,
            Err(err) if cfg!(debug_assertions) => unreachable!("value was Err({err:?})"),
            // SAFETY: The caller guarantees that the value is Ok.
            Err(_) => unsafe { hint::unreachable_unchecked() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::panic::assert_panics;

    #[test]
    fn test_unwraps_success() {
        // SAFETY: Both values are Ok.
        unsafe {
            assert_eq!(Ok::<_, ()>(3).unreachable(), 3);
            assert_eq!(Ok::<_, ()>("ok").unreachable(), "ok");
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_failure_panics_in_debug() {
        // SAFETY: Debug builds check the value, so an Err panics instead of being undefined.
        assert_panics!({ unsafe { Err::<u8, _>("no nul").unreachable() } }, "Err(\"no nul\")");
    }
}
