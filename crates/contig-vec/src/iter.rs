//! Borrowing and owning iteration.
//!
//! [`Iter`] walks a pair of [`Cursor`]s towards each other, so forward and
//! reverse traversal share one implementation. [`IntoIter`] consumes the
//! container and moves each element out.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::alloc::Allocator;
use crate::cursor::Cursor;
use crate::raw::RawStorage;

/// Borrowing iterator over the live range of a container of type `C`.
pub struct Iter<'a, T, C> {
    front: Cursor<'a, T, C>,
    back: Cursor<'a, T, C>,
}

impl<'a, T, C> Iter<'a, T, C> {
    pub(crate) fn new(front: Cursor<'a, T, C>, back: Cursor<'a, T, C>) -> Self {
        Self { front, back }
    }

    /// The cursor at the next element the iterator will yield from the
    /// front.
    pub fn cursor(&self) -> Cursor<'a, T, C> {
        self.front
    }
}

impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.front.post_inc().get()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.back - self.front).max(0) as usize;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        let remaining = self.len();
        if n >= remaining {
            self.front = self.back;
            return None;
        }
        self.front += n as isize;
        self.next()
    }
}

impl<'a, T, C> DoubleEndedIterator for Iter<'a, T, C> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back.dec().get()
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for Iter<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Owning iterator that moves elements out of a consumed container.
pub struct IntoIter<T, A: Allocator> {
    storage: RawStorage<T, A>,
    /// Slots before `head` have already been moved out.
    head: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(crate) fn new(storage: RawStorage<T, A>) -> Self {
        Self { storage, head: 0 }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        &self.storage.as_slice()[self.head..]
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.head == self.storage.len() {
            return None;
        }
        let at = self.head;
        self.head += 1;
        // SAFETY: `at` is inside the live range and below `head` from now
        // on, so the slot is read exactly once and never dropped again.
        Some(unsafe { ptr::read(self.storage.as_ptr().add(at)) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.storage.len() - self.head;
        (remaining, Some(remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.storage.len() {
            return None;
        }
        self.storage.pop()
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let len = self.storage.len();
        let head = self.head;
        // SAFETY: slots below `head` were moved out; hide the whole range
        // from the storage before destroying the unread tail ourselves.
        unsafe {
            self.storage.set_len(0);
            let rest = self.storage.as_mut_ptr().add(head);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(rest, len - head));
        }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::Global;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Tag;

    fn storage_of(values: &[u32]) -> RawStorage<u32, Global> {
        let mut s = RawStorage::try_with_capacity_in(values.len(), Global).unwrap();
        for &v in values {
            s.push_within_capacity(v).unwrap();
        }
        s
    }

    #[test]
    fn iter_walks_both_ends() {
        let data = [1, 2, 3, 4];
        let mut it: Iter<'_, i32, Tag> =
            Iter::new(Cursor::new(&data, 0), Cursor::new(&data, data.len()));
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.len(), 2);
        assert_eq!(it.collect::<Vec<_>>(), vec![&2, &3]);
    }

    #[test]
    fn iter_reverse_and_nth() {
        let data = [1, 2, 3, 4, 5];
        let it: Iter<'_, i32, Tag> =
            Iter::new(Cursor::new(&data, 0), Cursor::new(&data, data.len()));
        assert_eq!(it.clone().rev().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
        let mut it = it;
        assert_eq!(it.nth(3), Some(&4));
        assert_eq!(it.nth(3), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn into_iter_moves_elements_out_from_both_ends() {
        let mut it = IntoIter::new(storage_of(&[1, 2, 3]));
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next_back(), Some(3));
        assert_eq!(it.as_slice(), &[2]);
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn dropping_partially_consumed_into_iter_drops_rest_once() {
        struct Counted(Rc<Cell<usize>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut s = RawStorage::try_with_capacity_in(4, Global).unwrap();
        for _ in 0..4 {
            assert!(s.push_within_capacity(Counted(drops.clone())).is_ok());
        }
        let mut it = IntoIter::new(s);
        drop(it.next());
        assert_eq!(drops.get(), 1);
        drop(it);
        assert_eq!(drops.get(), 4);
    }
}
