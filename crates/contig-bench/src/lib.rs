//! Benchmark workloads for the contig container workspace.
//!
//! Provides deterministic, seed-driven inputs so every run of a benchmark
//! exercises the same sequence of operations:
//!
//! - [`positions`]: insertion/erasure indices that stay valid as the
//!   vector grows or shrinks
//! - [`filled`]: a vector of `len` sequential values with exact capacity
//! - [`Record`]: a heap-owning element whose copies cost an allocation

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use contig_vec::Vector;

/// Element with a heap payload, so copy-construction and copy-assignment
/// are not free.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub label: String,
}

impl Record {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            label: format!("record-{id}"),
        }
    }
}

/// `count` pseudo-random positions for a sequence that starts at
/// `start_len` and changes length by `step` after each operation
/// (+1 for inserts, -1 for erases).
///
/// Position `k` is always valid for the length at step `k`: at most the
/// current length for inserts, strictly less for erases.
pub fn positions(start_len: usize, count: usize, step: isize, seed: u64) -> Vec<usize> {
    let mut out = Vec::with_capacity(count);
    let mut len = start_len as isize;
    let mut state = seed;
    for _ in 0..count {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let bound = if step > 0 { len + 1 } else { len.max(1) };
        out.push(((state >> 33) % bound as u64) as usize);
        len += step;
    }
    out
}

/// A vector of `0..len` with capacity exactly `len`.
pub fn filled(len: usize) -> Vector<u64> {
    (0..len as u64).collect()
}

/// A vector of [`Record`]s `0..len` with capacity exactly `len`.
pub fn filled_records(len: usize) -> Vector<Record> {
    (0..len as u64).map(Record::new).collect()
}
