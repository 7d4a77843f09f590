//! The allocator capability consumed by the storage owner.
//!
//! Only raw block acquisition and release live here. Constructing and
//! destroying elements inside a block is the storage owner's job and is
//! never exposed as a public capability.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::{self, NonNull};

use contig_core::AllocError;

/// Raw block allocation for a container.
///
/// Allocators are carried by value inside each container and cloned when a
/// container is cloned, so stateful allocators should share their state
/// (e.g. behind an `Rc`).
///
/// # Safety
///
/// A block returned by [`allocate`](Allocator::allocate) must be valid for
/// reads and writes of `layout.size()` bytes, aligned to `layout.align()`,
/// and stay valid until it is passed to
/// [`deallocate`](Allocator::deallocate) on this allocator or a clone of it.
pub unsafe trait Allocator: Clone {
    /// Obtain a block fitting `layout`.
    ///
    /// Zero-sized layouts yield a dangling, well-aligned pointer.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Release a block. Never fails. Zero-sized layouts are a no-op.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this allocator (or a
    /// clone) with the same `layout`, and not released since.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The process-wide heap, via `std::alloc`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Global;

unsafe impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Ok(dangling(layout));
        }
        // SAFETY: the layout has a non-zero size.
        let ptr = unsafe { std::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or(AllocError)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }
        // SAFETY: the caller guarantees `ptr` came from `allocate` with
        // this non-zero-sized layout.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

fn dangling(layout: Layout) -> NonNull<u8> {
    // An address equal to the alignment is non-null and suitably aligned.
    NonNull::new(ptr::without_provenance_mut(layout.align())).unwrap_or(NonNull::dangling())
}
