use std::alloc;
use std::error::Error;

use crate::util::error::AllocError;

pub(crate) trait ResultExtension<T, E: Error> {
    /// A method similar to [`Result::unwrap`], except that it applies only to types which implement
    /// [`Error`] and panics with the message of the error itself.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{}", error),
        }
    }
}

pub(crate) trait AllocResultExtension<T> {
    /// Unwraps the result of a growth request the way infallible collection methods should: an
    /// allocator failure is reported through [`alloc::handle_alloc_error`], while a capacity
    /// overflow panics.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`AllocError::CapacityOverflow`].
    fn or_handle_alloc_error(self) -> T;
}

impl<T> AllocResultExtension<T> for Result<T, AllocError> {
    fn or_handle_alloc_error(self) -> T {
        match self {
            Ok(val) => val,
            Err(AllocError::AllocFailed(failed)) => alloc::handle_alloc_error(failed.layout),
            Err(error) => Err::<T, _>(error).throw(),
        }
    }
}
