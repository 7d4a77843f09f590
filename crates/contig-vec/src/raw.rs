//! The storage owner: one allocated block and its live prefix.
//!
//! [`RawStorage`] is the only type that touches uninitialized memory. It
//! owns a block of `cap` slots starting at `start`; the first `len` slots
//! hold constructed elements and the rest are uninitialized. In cursor
//! terms, `start <= finish (= start + len) <= limit (= start + cap)` holds
//! in every state observable outside this module.
//!
//! Element-level policy (where to construct, what to shift) belongs to the
//! container. This module only offers the primitives that keep `len`
//! consistent with what has actually been constructed.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use contig_core::{growth, ContigError};

use crate::alloc::{Allocator, Global};

/// Exclusive owner of one allocated block of `T` slots.
pub(crate) struct RawStorage<T, A: Allocator = Global> {
    /// First slot. Dangling while `cap == 0`.
    start: NonNull<T>,
    /// Constructed elements, all at the front of the block.
    len: usize,
    /// Allocated slots.
    cap: usize,
    alloc: A,
    _owns: PhantomData<T>,
}

// SAFETY: the storage owns its elements and its block exclusively.
unsafe impl<T: Send, A: Allocator + Send> Send for RawStorage<T, A> {}
// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawStorage<T, A> {}

impl<T, A: Allocator> RawStorage<T, A> {
    const ELEMENT_NOT_ZST: () = assert!(
        mem::size_of::<T>() != 0,
        "zero-sized element types are not supported"
    );

    /// Empty storage. Allocates nothing.
    pub(crate) fn new_in(alloc: A) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::ELEMENT_NOT_ZST;
        Self {
            start: NonNull::dangling(),
            len: 0,
            cap: 0,
            alloc,
            _owns: PhantomData,
        }
    }

    /// Storage with exactly `capacity` slots and no live elements.
    ///
    /// Fails without side effects if the count is not representable or the
    /// allocator refuses the block.
    pub(crate) fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, ContigError> {
        let mut storage = Self::new_in(alloc);
        if capacity == 0 {
            return Ok(storage);
        }
        growth::check_capacity(capacity, mem::size_of::<T>()).inspect_err(|_| {
            tracing::debug!(target: "contig::storage", requested = capacity, "capacity overflow");
        })?;
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| ContigError::CapacityOverflow {
                requested: capacity,
            })?;
        let block = storage.alloc.allocate(layout).map_err(|_| {
            tracing::debug!(
                target: "contig::storage",
                bytes = layout.size(),
                align = layout.align(),
                "allocator refused block"
            );
            ContigError::AllocationFailure {
                bytes: layout.size(),
                align: layout.align(),
            }
        })?;
        storage.start = block.cast();
        storage.cap = capacity;
        Ok(storage)
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    /// Uninitialized slots between `finish` and `limit`.
    pub(crate) fn spare(&self) -> usize {
        self.cap - self.len
    }

    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    pub(crate) fn as_ptr(&self) -> *const T {
        self.start.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.start.as_ptr()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: [start, start + len) holds constructed elements; `start`
        // is non-null and aligned even when dangling.
        unsafe { slice::from_raw_parts(self.start.as_ptr(), self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` makes the borrow unique.
        unsafe { slice::from_raw_parts_mut(self.start.as_ptr(), self.len) }
    }

    /// Construct `value` at `finish` and advance it.
    ///
    /// Hands the value back if the block is full.
    pub(crate) fn push_within_capacity(&mut self, value: T) -> Result<(), T> {
        if self.len == self.cap {
            return Err(value);
        }
        // SAFETY: `len < cap`, so the slot at `finish` is allocated and
        // uninitialized.
        unsafe { self.start.as_ptr().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Move the last element out and retreat `finish`.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the new `finish` was constructed and is now
        // outside the live prefix, so it is read exactly once.
        Some(unsafe { self.start.as_ptr().add(self.len).read() })
    }

    /// Destroy every element at or after `new_len`. No-op if `new_len >= len`.
    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = self.len - new_len;
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.len = new_len;
        // SAFETY: [new_len, new_len + tail) was constructed and is no
        // longer covered by `len`.
        unsafe {
            let first = self.start.as_ptr().add(new_len);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, tail));
        }
    }

    /// Replace this storage with `fresh`, destroying the old elements and
    /// releasing the old block. Cannot fail.
    pub(crate) fn adopt(&mut self, fresh: Self) {
        let old = mem::replace(self, fresh);
        drop(old);
    }

    /// Exchange blocks, cursors and allocators. Touches no element.
    pub(crate) fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Move `finish` without constructing or destroying anything.
    ///
    /// # Safety
    ///
    /// Every slot in `[0, len)` must be constructed and owned by this
    /// storage; slots dropped out of the range must already have been moved
    /// out or destroyed by the caller.
    pub(crate) unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.cap);
        self.len = len;
    }

    fn release(&mut self) {
        if self.cap == 0 {
            return;
        }
        // SAFETY: the block was allocated with exactly this layout in
        // `try_with_capacity_in`, which already validated it.
        unsafe {
            let layout = Layout::from_size_align_unchecked(
                mem::size_of::<T>() * self.cap,
                mem::align_of::<T>(),
            );
            self.alloc.deallocate(self.start.cast(), layout);
        }
        self.cap = 0;
        self.start = NonNull::dangling();
    }
}

impl<T, A: Allocator> Drop for RawStorage<T, A> {
    fn drop(&mut self) {
        self.truncate(0);
        self.release();
    }
}
