//! An allocator that keeps books.
//!
//! [`TrackingAllocator`] forwards to [`Global`] and records each live block
//! by address. Clones share one ledger, so a container and every copy made
//! from it report into the same counts. Refusals are scheduled by attempt
//! number: `fail_next()` refuses the very next request, `fail_nth(3)` the
//! third one from now.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::cell::RefCell;
use std::fmt;
use std::ptr::NonNull;
use std::rc::Rc;

use contig_vec::{AllocError, Allocator, Global};
use indexmap::IndexMap;
use smallvec::SmallVec;

#[derive(Default)]
struct Ledger {
    attempts: usize,
    allocations: usize,
    deallocations: usize,
    /// Attempt numbers still to be refused.
    refusals: SmallVec<[usize; 4]>,
    /// Live blocks by address, in allocation order.
    live: IndexMap<usize, Layout>,
}

/// Instrumented allocator backed by the global heap.
#[derive(Clone, Default)]
pub struct TrackingAllocator {
    ledger: Rc<RefCell<Ledger>>,
}

impl TrackingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse the next allocation request.
    pub fn fail_next(&self) {
        self.fail_nth(1);
    }

    /// Refuse the `n`-th allocation request from now (1-based).
    pub fn fail_nth(&self, n: usize) {
        let mut ledger = self.ledger.borrow_mut();
        let attempt = ledger.attempts + n;
        ledger.refusals.push(attempt);
    }

    /// Drop every scheduled refusal.
    pub fn disarm(&self) {
        self.ledger.borrow_mut().refusals.clear();
    }

    /// Requests seen, refused or not.
    pub fn attempts(&self) -> usize {
        self.ledger.borrow().attempts
    }

    /// Requests that produced a block, including zero-sized ones.
    pub fn allocations(&self) -> usize {
        self.ledger.borrow().allocations
    }

    pub fn deallocations(&self) -> usize {
        self.ledger.borrow().deallocations
    }

    /// Blocks handed out and not yet returned.
    pub fn live_blocks(&self) -> usize {
        self.ledger.borrow().live.len()
    }

    /// Total bytes across live blocks.
    pub fn live_bytes(&self) -> usize {
        self.ledger.borrow().live.values().map(Layout::size).sum()
    }

    /// Layout of the most recently allocated block that is still live.
    pub fn newest_block(&self) -> Option<Layout> {
        self.ledger.borrow().live.last().map(|(_, layout)| *layout)
    }
}

impl PartialEq for TrackingAllocator {
    /// Two handles are equal when they share a ledger.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ledger, &other.ledger)
    }
}

impl Eq for TrackingAllocator {}

impl fmt::Debug for TrackingAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ledger = self.ledger.borrow();
        f.debug_struct("TrackingAllocator")
            .field("attempts", &ledger.attempts)
            .field("allocations", &ledger.allocations)
            .field("deallocations", &ledger.deallocations)
            .field("live_blocks", &ledger.live.len())
            .finish()
    }
}

// SAFETY: every block comes from `Global`, which upholds the contract;
// bookkeeping never alters the pointer or layout passed through.
unsafe impl Allocator for TrackingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.attempts += 1;
        let attempt = ledger.attempts;
        if let Some(at) = ledger.refusals.iter().position(|&n| n == attempt) {
            ledger.refusals.swap_remove(at);
            return Err(AllocError);
        }
        let block = Global.allocate(layout)?;
        ledger.allocations += 1;
        if layout.size() != 0 {
            ledger.live.insert(block.as_ptr() as usize, layout);
        }
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        {
            let mut ledger = self.ledger.borrow_mut();
            ledger.deallocations += 1;
            if layout.size() != 0 {
                let recorded = ledger.live.shift_remove(&(ptr.as_ptr() as usize));
                assert_eq!(
                    recorded,
                    Some(layout),
                    "block released with a layout it was not allocated with"
                );
            }
        }
        // SAFETY: forwarded unchanged from a caller bound by the same
        // contract, and the block came from `Global`.
        unsafe { Global.deallocate(ptr, layout) }
    }
}
