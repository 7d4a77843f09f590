//! Build-then-commit replacement buffers.
//!
//! Every operation that needs a new block (growth, reallocating insert,
//! `reserve`, size-growing assign) builds the complete replacement in a
//! [`Staging`] buffer first. The live container is not touched until
//! [`Staging::commit`]. If a clone panics while the replacement is being
//! built, unwinding drops the staging buffer, which destroys exactly the
//! elements constructed so far and releases the new block. The original
//! storage is left as it was.

use contig_core::ContigError;

use crate::alloc::Allocator;
use crate::raw::RawStorage;

/// A replacement buffer under construction.
pub(crate) struct Staging<T, A: Allocator> {
    fresh: RawStorage<T, A>,
}

impl<T, A: Allocator> Staging<T, A> {
    /// Allocate the replacement block. Nothing is constructed yet.
    pub(crate) fn try_new(capacity: usize, alloc: A) -> Result<Self, ContigError> {
        Ok(Self {
            fresh: RawStorage::try_with_capacity_in(capacity, alloc)?,
        })
    }

    /// Construct `value` in the next slot.
    ///
    /// # Panics
    ///
    /// Panics if the block is already full. Callers size it up front.
    #[track_caller]
    pub(crate) fn push(&mut self, value: T) {
        let overflow = self.fresh.push_within_capacity(value);
        assert!(overflow.is_ok(), "staging buffer sized too small");
    }

    /// Copy-construct every element of `src`, in order.
    pub(crate) fn clone_from_slice(&mut self, src: &[T])
    where
        T: Clone,
    {
        for item in src {
            self.push(item.clone());
        }
    }

    /// Copy-construct `count` copies of `value`.
    pub(crate) fn fill(&mut self, count: usize, value: &T)
    where
        T: Clone,
    {
        for _ in 0..count {
            self.push(value.clone());
        }
    }

    /// Construct at most `limit` items pulled from `iter`, never more than
    /// the remaining slots. Returns how many were constructed.
    pub(crate) fn extend_bounded<I>(&mut self, iter: &mut I, limit: usize) -> usize
    where
        I: Iterator<Item = T>,
    {
        let limit = limit.min(self.fresh.spare());
        let mut taken = 0;
        while taken < limit {
            match iter.next() {
                Some(item) => {
                    self.push(item);
                    taken += 1;
                }
                None => break,
            }
        }
        taken
    }

    /// Swap the finished buffer into `target`, destroying the old elements
    /// and releasing the old block. Cannot fail.
    pub(crate) fn commit(self, target: &mut RawStorage<T, A>) {
        tracing::trace!(
            target: "contig::storage",
            old_capacity = target.capacity(),
            new_capacity = self.fresh.capacity(),
            len = self.fresh.len(),
            "committing replacement buffer"
        );
        target.adopt(self.fresh);
    }

    /// Hand the finished buffer over as a new storage owner.
    pub(crate) fn into_storage(self) -> RawStorage<T, A> {
        self.fresh
    }
}
