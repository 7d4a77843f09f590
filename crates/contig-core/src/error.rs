//! Error types for container operations.
//!
//! Two failure families are reported through `Result`:
//!
//! - [`ContigError::IndexOutOfRange`] for checked access and invalid
//!   positions passed to insert/erase.
//! - [`ContigError::AllocationFailure`] and [`ContigError::CapacityOverflow`]
//!   when a buffer cannot be obtained.
//!
//! Failures raised by the element type itself (a panicking `Clone`,
//! `clone_from` or comparison) are not wrapped: they unwind through the
//! container unchanged. Every operation documents whether the container is
//! left untouched (strong) or valid-but-modified (basic) when that happens.

use std::error::Error;
use std::fmt;

/// Errors returned by container operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContigError {
    /// A checked access or position argument lies outside the live range.
    IndexOutOfRange {
        /// The offending index (or range bound).
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// The allocator refused to provide a block.
    AllocationFailure {
        /// Size of the refused block in bytes.
        bytes: usize,
        /// Alignment of the refused block in bytes.
        align: usize,
    },
    /// The requested element count cannot be expressed as an allocation.
    ///
    /// Raised before the allocator is consulted, either because growth
    /// arithmetic overflowed or because the byte size exceeds `isize::MAX`.
    CapacityOverflow {
        /// The element count that was requested.
        requested: usize,
    },
}

impl ContigError {
    /// Whether this error came from the memory subsystem rather than from
    /// a bad position argument.
    pub fn is_allocation(&self) -> bool {
        matches!(
            self,
            Self::AllocationFailure { .. } | Self::CapacityOverflow { .. }
        )
    }

    /// Escalate the error into a panic.
    ///
    /// Used by trait impls (`Clone`, `Extend`, `FromIterator`) whose
    /// signatures cannot carry an error.
    #[cold]
    #[inline(never)]
    #[track_caller]
    pub fn escalate(self) -> ! {
        panic!("{self}")
    }
}

impl fmt::Display for ContigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index out of range: index {index}, len {len}")
            }
            Self::AllocationFailure { bytes, align } => {
                write!(
                    f,
                    "allocation failure: {bytes} bytes with alignment {align}"
                )
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements requested")
            }
        }
    }
}

impl Error for ContigError {}

/// The allocator could not satisfy a request.
///
/// Carries no detail; the container attaches the layout when it converts
/// this into [`ContigError::AllocationFailure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "memory allocation failed")
    }
}

impl Error for AllocError {}
