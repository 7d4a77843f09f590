//! Test utilities for contig development.
//!
//! Provides an instrumented allocator ([`TrackingAllocator`]) that records
//! every block it hands out and can be told to refuse specific requests,
//! and element fixtures ([`Probe`], [`ProbeLedger`]) that count copies,
//! assignments and destructions and can panic on demand.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod allocator;
pub mod fixtures;

pub use allocator::TrackingAllocator;
pub use fixtures::{Probe, ProbeLedger};
