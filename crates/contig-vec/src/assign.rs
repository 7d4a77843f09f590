//! Whole-content replacement.
//!
//! Each form picks one of three strategies by comparing the new length `n`
//! with the current capacity and length:
//!
//! - `n > capacity`: build a complete replacement sized exactly `n` and
//!   commit it. On failure the vector is unchanged.
//! - `len < n <= capacity`: copy-assign over the existing elements and
//!   copy-construct the rest in place.
//! - `n <= len`: copy-assign over the first `n` and destroy the surplus.
//!
//! The in-place strategies keep capacity and leave the vector valid but
//! partly assigned if an element copy panics.

use contig_core::ContigError;

use crate::alloc::Allocator;
use crate::relocate;
use crate::staging::Staging;
use crate::vector::Vector;

impl<T: Clone, A: Allocator> Vector<T, A> {
    /// Replace the contents with `count` copies of `value`.
    pub fn assign_fill(&mut self, count: usize, value: &T) -> Result<(), ContigError> {
        let len = self.len();
        if count > self.capacity() {
            let mut fresh = Self::try_from_elem_in(count, value, self.allocator().clone())?;
            self.swap(&mut fresh);
        } else if count > len {
            relocate::assign_fill(self.as_mut_slice(), value);
            for _ in len..count {
                self.construct_within(value.clone());
            }
        } else {
            relocate::assign_fill(&mut self.as_mut_slice()[..count], value);
            self.buf.truncate(count);
        }
        Ok(())
    }

    /// Replace the contents with a copy of `src`.
    pub fn assign_slice(&mut self, src: &[T]) -> Result<(), ContigError> {
        let len = self.len();
        let count = src.len();
        if count > self.capacity() {
            let mut staging = Staging::try_new(count, self.allocator().clone())?;
            staging.clone_from_slice(src);
            staging.commit(&mut self.buf);
        } else if count > len {
            self.as_mut_slice().clone_from_slice(&src[..len]);
            for item in &src[len..] {
                self.construct_within(item.clone());
            }
        } else {
            self.as_mut_slice()[..count].clone_from_slice(src);
            self.buf.truncate(count);
        }
        Ok(())
    }

    /// Replace the contents with everything `iter` yields.
    ///
    /// A source with an exact `size_hint` larger than the capacity is
    /// collected into one block of that size. Otherwise the source is
    /// consumed in a single pass: existing elements are overwritten while
    /// both sides last, then the surplus is destroyed or the remaining
    /// items are appended under the usual growth policy.
    pub fn assign_iter<I>(&mut self, iter: I) -> Result<(), ContigError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        if let (lower, Some(upper)) = iter.size_hint() {
            if lower == upper && upper > self.capacity() {
                let mut staging = Staging::try_new(upper, self.allocator().clone())?;
                staging.extend_bounded(&mut iter, upper);
                staging.commit(&mut self.buf);
                for item in iter {
                    self.push(item)?;
                }
                return Ok(());
            }
        }
        let mut kept = 0;
        for slot in self.as_mut_slice() {
            match iter.next() {
                Some(item) => {
                    *slot = item;
                    kept += 1;
                }
                None => break,
            }
        }
        if kept < self.len() {
            self.buf.truncate(kept);
            return Ok(());
        }
        for item in iter {
            self.push(item)?;
        }
        Ok(())
    }
}
