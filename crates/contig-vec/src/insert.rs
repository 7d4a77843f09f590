//! Positional insertion: one value, `n` copies, a slice, or an iterator.
//!
//! Every form returns the index of the first inserted element (the given
//! index when nothing is inserted) and rejects an index past `len` with
//! [`ContigError::IndexOutOfRange`] before touching anything.
//!
//! With enough spare capacity the tail is opened up in place: the slots
//! that land past the old `finish` are copy-constructed there, the rest of
//! the tail is copy-assigned towards the back, and the gap is assigned.
//! Without it, a replacement block holding prefix, new elements and tail
//! is built and committed.

use contig_core::{growth, ContigError};

use crate::alloc::Allocator;
use crate::relocate;
use crate::vector::Vector;

impl<T: Clone, A: Allocator> Vector<T, A> {
    fn check_position(&self, index: usize) -> Result<(), ContigError> {
        let len = self.len();
        if index > len {
            return Err(ContigError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Insert `value` before `index`.
    ///
    /// When full, the buffer grows to `max(1, 2 * len)` slots and is
    /// rebuilt; the vector is unchanged if that fails. In place, a
    /// panicking `clone_from` while shifting leaves it valid but partly
    /// shifted.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize, ContigError> {
        self.check_position(index)?;
        let len = self.len();
        if self.buf.spare() == 0 {
            let capacity = growth::grown_capacity(len)?;
            self.rebuild(capacity, index, |staging| staging.push(value))?;
            return Ok(index);
        }
        if index == len {
            self.construct_within(value);
            return Ok(index);
        }
        let last = self.as_slice()[len - 1].clone();
        self.construct_within(last);
        let slots = self.as_mut_slice();
        relocate::assign_backward(slots, index..len - 1, 1);
        slots[index] = value;
        Ok(index)
    }

    /// Insert `count` copies of `value` before `index`.
    ///
    /// A reallocation sizes the new block to `len + max(len, count)`.
    pub fn insert_fill(&mut self, index: usize, count: usize, value: &T) -> Result<usize, ContigError> {
        self.check_position(index)?;
        if count == 0 {
            return Ok(index);
        }
        let len = self.len();
        if self.buf.spare() < count {
            let capacity = growth::bulk_capacity(len, count)?;
            self.rebuild(capacity, index, |staging| staging.fill(count, value))?;
            return Ok(index);
        }
        let after = len - index;
        if after > count {
            for from in len - count..len {
                let item = self.as_slice()[from].clone();
                self.construct_within(item);
            }
            let slots = self.as_mut_slice();
            relocate::assign_backward(slots, index..len - count, count);
            relocate::assign_fill(&mut slots[index..index + count], value);
        } else {
            for _ in after..count {
                self.construct_within(value.clone());
            }
            for from in index..len {
                let item = self.as_slice()[from].clone();
                self.construct_within(item);
            }
            relocate::assign_fill(&mut self.as_mut_slice()[index..len], value);
        }
        Ok(index)
    }

    /// Insert a copy of every element of `src` before `index`, in order.
    ///
    /// A reallocation sizes the new block to `len + max(len, src.len())`.
    pub fn insert_slice(&mut self, index: usize, src: &[T]) -> Result<usize, ContigError> {
        self.check_position(index)?;
        let count = src.len();
        if count == 0 {
            return Ok(index);
        }
        let len = self.len();
        if self.buf.spare() < count {
            let capacity = growth::bulk_capacity(len, count)?;
            self.rebuild(capacity, index, |staging| staging.clone_from_slice(src))?;
            return Ok(index);
        }
        let after = len - index;
        if after > count {
            for from in len - count..len {
                let item = self.as_slice()[from].clone();
                self.construct_within(item);
            }
            let slots = self.as_mut_slice();
            relocate::assign_backward(slots, index..len - count, count);
            slots[index..index + count].clone_from_slice(src);
        } else {
            for item in &src[after..] {
                self.construct_within(item.clone());
            }
            for from in index..len {
                let item = self.as_slice()[from].clone();
                self.construct_within(item);
            }
            self.as_mut_slice()[index..len].clone_from_slice(&src[..after]);
        }
        Ok(index)
    }

    /// Insert everything `iter` yields before `index`, in order.
    ///
    /// An exact `size_hint` is trusted to size a single reallocation, or,
    /// with enough spare capacity, to append the new elements and rotate
    /// them into place. Any other source is inserted one element at a time,
    /// which may reallocate repeatedly. A source that yields more than its
    /// exact hint has the surplus inserted one at a time after the rest.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> Result<usize, ContigError>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_position(index)?;
        let mut iter = iter.into_iter();
        let count = match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => upper,
            _ => return self.insert_each(index, iter),
        };
        if count == 0 {
            return self.insert_each(index, iter);
        }
        let len = self.len();
        let taken = if self.buf.spare() < count {
            let capacity = growth::bulk_capacity(len, count)?;
            self.rebuild(capacity, index, |staging| staging.extend_bounded(&mut iter, count))?
        } else {
            let mut taken = 0;
            while taken < count {
                match iter.next() {
                    Some(item) => {
                        self.construct_within(item);
                        taken += 1;
                    }
                    None => break,
                }
            }
            self.as_mut_slice()[index..].rotate_right(taken);
            taken
        };
        self.insert_each(index + taken, iter)?;
        Ok(index)
    }

    /// Single-pass insertion, one element at a time.
    fn insert_each<I>(&mut self, index: usize, iter: I) -> Result<usize, ContigError>
    where
        I: Iterator<Item = T>,
    {
        let mut at = index;
        for item in iter {
            self.insert(at, item)?;
            at += 1;
        }
        Ok(index)
    }
}
