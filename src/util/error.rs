use std::alloc::Layout;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// The requested capacity can't be represented by a valid allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// The allocator returned null for the provided [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocFailed {
    pub layout: Layout,
}

impl Display for AllocFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to allocate {} bytes!", self.layout.size())
    }
}

impl Error for AllocFailed {}

/// Any reason that a buffer couldn't grow. The buffer is left unmodified whenever one of these is
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum AllocError {
    CapacityOverflow(CapacityOverflow),
    AllocFailed(AllocFailed),
}

impl From<AllocError> for io::Error {
    fn from(value: AllocError) -> Self {
        io::Error::new(io::ErrorKind::OutOfMemory, value)
    }
}
