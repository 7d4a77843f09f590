//! Contig: a contiguous, growable vector with a pluggable allocator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the contig sub-crates. For most users, adding `contig` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use contig::prelude::*;
//!
//! let mut v: Vector<u32> = Vector::new();
//! v.push(1)?;
//! v.push(2)?;
//! v.push(3)?;
//!
//! // Positions are indices; cursors convert back with `index_of`.
//! let at = v.index_of(&(v.begin() + 1)).unwrap();
//! v.insert(at, 99)?;
//! assert_eq!(v, [1, 99, 2, 3]);
//!
//! let next = v.erase_range(1..3)?;
//! assert_eq!(v[next], 3);
//! assert_eq!(v.capacity(), 4);
//!
//! // Out-of-range access is an error, not a panic.
//! assert_eq!(
//!     v.at(7),
//!     Err(ContigError::IndexOutOfRange { index: 7, len: 2 })
//! );
//! # Ok::<(), ContigError>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `contig-core` | Error taxonomy and growth arithmetic |
//! | [`vec`] | `contig-vec` | `Vector`, allocators, cursors, iterators |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Errors and growth policy (`contig-core`).
///
/// [`types::ContigError`] is returned by every fallible container
/// operation; [`types::growth`] holds the capacity arithmetic.
pub use contig_core as types;

/// The container and its collaborators (`contig-vec`).
///
/// [`vec::Vector`] is the container, [`vec::Allocator`] the capability it
/// draws blocks from, and [`vec::Cursor`] / [`vec::CursorMut`] its
/// random-access positions.
pub use contig_vec as vec;

/// Common imports for typical contig usage.
///
/// ```rust
/// use contig::prelude::*;
/// ```
pub mod prelude {
    // Container and allocation
    pub use contig_vec::{Allocator, Global, Vector};

    // Positions and iteration
    pub use contig_vec::{Cursor, CursorMut, IntoIter, Iter};

    // Errors
    pub use contig_core::{AllocError, ContigError};
}
