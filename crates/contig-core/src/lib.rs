//! Core types for the contig container workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! error taxonomy shared by every container operation and the growth policy
//! arithmetic that decides how large a replacement buffer must be.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod growth;

pub use error::{AllocError, ContigError};
