//! A contiguous, growable vector with a pluggable allocator.
//!
//! [`Vector`] stores its elements in one block obtained from an
//! [`Allocator`], tracks the live prefix and the allocated limit, and
//! grows geometrically. Positions are plain indices; [`Cursor`] and
//! [`CursorMut`] add random-access traversal tagged by container type.
//!
//! # Architecture
//!
//! ```text
//! Vector<T, A>                (policy: growth, insert/erase/assign)
//! ├── RawStorage<T, A>        (block + live prefix, the only raw memory)
//! ├── Staging<T, A>           (replacement block built before commit)
//! ├── relocate                (copy-assign shifts inside the live range)
//! └── Cursor / CursorMut      (checked random-access positions)
//! ```
//!
//! # Failure model
//!
//! Fallible operations return [`ContigError`]. Allocation always happens
//! before any live element is touched, and replacement buffers are fully
//! built before they are committed, so a refused allocation or a panicking
//! element copy during reallocation leaves the vector unchanged. Shifts
//! inside the live range give the weaker guarantee: the vector stays valid
//! and droppable but may be partly modified.
//!
//! Trait impls that cannot return a `Result` (`Clone`, `FromIterator`,
//! `Extend`, `From`) panic with the error's message instead.
//!
//! # Example
//!
//! ```
//! use contig_vec::Vector;
//!
//! let mut v = Vector::new();
//! for i in 0..5 {
//!     v.push(i)?;
//! }
//! v.insert(2, 10)?;
//! v.erase(0)?;
//! assert_eq!(v, [1, 10, 2, 3, 4]);
//! assert_eq!(v.capacity(), 8);
//! # Ok::<(), contig_vec::ContigError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod alloc;
mod assign;
pub mod cursor;
mod erase;
mod insert;
pub mod iter;
mod raw;
mod relocate;
mod staging;
mod vector;

// Public re-exports for the primary API surface.
pub use alloc::{Allocator, Global};
pub use contig_core::{AllocError, ContigError};
pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter};
pub use vector::{swap, Vector};
