//! The [`Vector`] container: construction, access, capacity and append.
//!
//! The insert, erase and assign families live in their own modules
//! (`insert.rs`, `erase.rs`, `assign.rs`) as further `impl` blocks on the
//! same type.
//!
//! # Safety tiers
//!
//! Allocation always happens before any live element is touched. Every
//! operation that replaces the buffer (growth, reallocating insert,
//! [`reserve`](Vector::reserve), size-growing assign) builds the replacement
//! completely and commits it only on success, so an allocation error or a
//! panicking `Clone` leaves the container exactly as it was. Operations that
//! shift elements inside the live range by copy-assignment (in-place insert,
//! erase, in-place assign) leave the container valid but possibly partially
//! modified if an element's `clone_from` panics.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

use contig_core::{growth, ContigError};

use crate::alloc::{Allocator, Global};
use crate::cursor::{Cursor, CursorMut};
use crate::iter::{IntoIter, Iter};
use crate::raw::RawStorage;
use crate::staging::Staging;

/// A contiguous, growable sequence of `T` backed by one block from `A`.
///
/// Elements are copied with `Clone` whenever they move between blocks and
/// copy-assigned with `Clone::clone_from` when they shift inside the live
/// range.
pub struct Vector<T, A: Allocator = Global> {
    pub(crate) buf: RawStorage<T, A>,
}

impl<T> Vector<T> {
    /// An empty vector on the global heap. Allocates nothing.
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// An empty vector with exactly `capacity` slots.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ContigError> {
        Self::try_with_capacity_in(capacity, Global)
    }

    /// `count` copies of `value`, with capacity exactly `count`.
    pub fn try_from_elem(count: usize, value: &T) -> Result<Self, ContigError>
    where
        T: Clone,
    {
        Self::try_from_elem_in(count, value, Global)
    }

    /// A copy of every element of `src`, with capacity exactly `src.len()`.
    pub fn try_from_slice(src: &[T]) -> Result<Self, ContigError>
    where
        T: Clone,
    {
        Self::try_from_slice_in(src, Global)
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// An empty vector using `alloc`. Allocates nothing.
    pub fn new_in(alloc: A) -> Self {
        Self {
            buf: RawStorage::new_in(alloc),
        }
    }

    /// An empty vector with exactly `capacity` slots from `alloc`.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, ContigError> {
        Ok(Self {
            buf: RawStorage::try_with_capacity_in(capacity, alloc)?,
        })
    }

    /// `count` copies of `value` in a block of exactly `count` slots.
    ///
    /// If a clone panics, the copies made so far are destroyed and the
    /// block is released before the panic continues.
    pub fn try_from_elem_in(count: usize, value: &T, alloc: A) -> Result<Self, ContigError>
    where
        T: Clone,
    {
        let mut staging = Staging::try_new(count, alloc)?;
        staging.fill(count, value);
        Ok(Self {
            buf: staging.into_storage(),
        })
    }

    /// A copy of `src` in a block of exactly `src.len()` slots.
    pub fn try_from_slice_in(src: &[T], alloc: A) -> Result<Self, ContigError>
    where
        T: Clone,
    {
        let mut staging = Staging::try_new(src.len(), alloc)?;
        staging.clone_from_slice(src);
        Ok(Self {
            buf: staging.into_storage(),
        })
    }

    /// Collect `iter` into a new vector.
    ///
    /// An exact `size_hint` sizes the block once up front; otherwise the
    /// elements are appended one at a time under the usual growth policy.
    pub fn try_from_iter_in<I>(iter: I, alloc: A) -> Result<Self, ContigError>
    where
        I: IntoIterator<Item = T>,
        T: Clone,
    {
        let mut iter = iter.into_iter();
        let mut vector = match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => {
                let mut staging = Staging::try_new(upper, alloc)?;
                staging.extend_bounded(&mut iter, upper);
                Self {
                    buf: staging.into_storage(),
                }
            }
            _ => Self::new_in(alloc),
        };
        for item in iter {
            vector.push(item)?;
        }
        Ok(vector)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Theoretical ceiling on the element count. Informational only.
    pub fn max_size(&self) -> usize {
        growth::max_size(std::mem::size_of::<T>())
    }

    /// The allocator this vector draws its blocks from.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&T, ContigError> {
        let len = self.len();
        self.buf
            .as_slice()
            .get(index)
            .ok_or(ContigError::IndexOutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ContigError> {
        let len = self.len();
        self.buf
            .as_mut_slice()
            .get_mut(index)
            .ok_or(ContigError::IndexOutOfRange { index, len })
    }

    /// The first element.
    pub fn front(&self) -> Option<&T> {
        self.buf.as_slice().first()
    }

    /// The first element, mutably.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.buf.as_mut_slice().first_mut()
    }

    /// The last element.
    pub fn back(&self) -> Option<&T> {
        self.buf.as_slice().last()
    }

    /// The last element, mutably.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.buf.as_mut_slice().last_mut()
    }

    /// Pointer to the first slot. Dangling (but aligned) while capacity is 0.
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Mutable pointer to the first slot.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    /// The live elements.
    pub fn as_slice(&self) -> &[T] {
        self.buf.as_slice()
    }

    /// The live elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buf.as_mut_slice()
    }

    /// Cursor at the first element.
    pub fn begin(&self) -> Cursor<'_, T, Self> {
        Cursor::new(self.buf.as_slice(), 0)
    }

    /// Cursor one past the last element.
    pub fn end(&self) -> Cursor<'_, T, Self> {
        Cursor::new(self.buf.as_slice(), self.len())
    }

    /// Writable cursor at the first element.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, Self> {
        CursorMut::new(self.buf.as_mut_slice(), 0)
    }

    /// Writable cursor one past the last element.
    pub fn end_mut(&mut self) -> CursorMut<'_, T, Self> {
        let len = self.len();
        CursorMut::new(self.buf.as_mut_slice(), len)
    }

    /// The element index a cursor denotes, if it lies within `[begin, end]`.
    ///
    /// Turns a cursor into a position that insert and erase accept.
    pub fn index_of(&self, cursor: &Cursor<'_, T, Self>) -> Option<usize> {
        usize::try_from(cursor.position())
            .ok()
            .filter(|&index| index <= self.len())
    }

    /// Forward (and, via `.rev()`, reverse) iteration over the live range.
    pub fn iter(&self) -> Iter<'_, T, Self> {
        Iter::new(self.begin(), self.end())
    }

    /// Mutable iteration over the live range.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.buf.as_mut_slice().iter_mut()
    }

    /// Append `value`.
    ///
    /// With a spare slot this constructs in place and no existing element
    /// moves. Otherwise the buffer grows to `max(1, 2 * len)` slots: every
    /// element is copied into the new block followed by `value`, and only
    /// then does the new block replace the old one, which invalidates every
    /// outstanding position. On failure the vector is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), ContigError>
    where
        T: Clone,
    {
        match self.buf.push_within_capacity(value) {
            Ok(()) => Ok(()),
            Err(value) => {
                let len = self.len();
                let capacity = growth::grown_capacity(len)?;
                self.rebuild(capacity, len, |staging| staging.push(value))
            }
        }
    }

    /// Append a default-constructed element, under the same growth and
    /// rollback rules as [`push`](Vector::push).
    pub fn push_default(&mut self) -> Result<(), ContigError>
    where
        T: Default + Clone,
    {
        self.push(T::default())
    }

    /// Remove and return the last element. Capacity is unchanged.
    pub fn pop(&mut self) -> Option<T> {
        self.buf.pop()
    }

    /// Grow the buffer to exactly `capacity` slots if it is smaller.
    ///
    /// Never shrinks. Copies every element into the new block; on failure
    /// the vector is unchanged.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), ContigError>
    where
        T: Clone,
    {
        if capacity <= self.capacity() {
            return Ok(());
        }
        let len = self.len();
        self.rebuild(capacity, len, |_| ())
    }

    /// Exchange contents, capacity and allocator with `other` in O(1).
    ///
    /// No element is constructed or destroyed.
    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
    }

    /// Build a replacement block of `capacity` slots holding
    /// `self[..split]`, whatever `middle` constructs, then `self[split..]`,
    /// and commit it.
    ///
    /// Nothing observable changes unless every step succeeds.
    pub(crate) fn rebuild<R>(
        &mut self,
        capacity: usize,
        split: usize,
        middle: impl FnOnce(&mut Staging<T, A>) -> R,
    ) -> Result<R, ContigError>
    where
        T: Clone,
    {
        let mut staging = Staging::try_new(capacity, self.buf.allocator().clone())?;
        let live = self.buf.as_slice();
        staging.clone_from_slice(&live[..split]);
        let produced = middle(&mut staging);
        staging.clone_from_slice(&live[split..]);
        staging.commit(&mut self.buf);
        Ok(produced)
    }

    /// Construct `value` at `finish`. Callers have checked for a spare slot.
    #[track_caller]
    pub(crate) fn construct_within(&mut self, value: T) {
        let overflow = self.buf.push_within_capacity(value);
        assert!(overflow.is_ok(), "constructed past the allocated limit");
    }
}

/// Exchange the contents of two vectors in O(1).
pub fn swap<T, A: Allocator>(a: &mut Vector<T, A>, b: &mut Vector<T, A>) {
    a.swap(b);
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: Allocator> Clone for Vector<T, A> {
    /// Copy construction: capacity is exactly `self.len()`.
    fn clone(&self) -> Self {
        Self::try_from_slice_in(self.as_slice(), self.allocator().clone())
            .unwrap_or_else(|err| err.escalate())
    }

    /// Copy assignment, with the same three-way policy as
    /// [`assign_slice`](Vector::assign_slice).
    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.assign_slice(source.as_slice()) {
            err.escalate();
        }
    }
}

impl<T, A: Allocator> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for Vector<T, A> {
    /// Sizes first, then element by element.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, A: Allocator> Eq for Vector<T, A> {}

impl<T: PartialEq, A: Allocator, const N: usize> PartialEq<[T; N]> for Vector<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, A: Allocator> PartialEq<[T]> for Vector<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, A: Allocator> PartialEq<&[T]> for Vector<T, A> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialOrd, A: Allocator> PartialOrd for Vector<T, A> {
    /// Lexicographic.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, A: Allocator> Ord for Vector<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, A: Allocator> Hash for Vector<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(src: &[T]) -> Self {
        Self::try_from_slice(src).unwrap_or_else(|err| err.escalate())
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(items: [T; N]) -> Self {
        let mut vector =
            Self::try_with_capacity(N).unwrap_or_else(|err| err.escalate());
        for item in items {
            vector.construct_within(item);
        }
        vector
    }
}

impl<T: Clone> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::try_from_iter_in(iter, Global).unwrap_or_else(|err| err.escalate())
    }
}

impl<T: Clone, A: Allocator> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let end = self.len();
        if let Err(err) = self.insert_iter(end, iter) {
            err.escalate();
        }
    }
}

impl<T, A: Allocator> IntoIterator for Vector<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self.buf)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Vector<T, A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_without_allocation() {
        let v: Vector<i32> = Vector::new();
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 0);
        assert!(v.is_empty());
        assert_eq!(v.begin(), v.end());
    }

    #[test]
    fn appends_follow_doubling_sequence() {
        let mut v = Vector::new();
        let mut capacities = Vec::new();
        for i in 0..9 {
            v.push(i).unwrap();
            if capacities.last() != Some(&v.capacity()) {
                capacities.push(v.capacity());
            }
        }
        assert_eq!(v.len(), 9);
        assert_eq!(capacities, vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn push_with_spare_capacity_keeps_addresses() {
        let mut v = Vector::try_with_capacity(4).unwrap();
        v.push(1u64).unwrap();
        let first = v.as_ptr();
        v.push(2).unwrap();
        v.push(3).unwrap();
        assert_eq!(v.as_ptr(), first);
        assert!(std::ptr::eq(&v[0], first));
    }

    #[test]
    fn checked_access_reports_out_of_range() {
        let v = Vector::from([1, 2, 3]);
        assert_eq!(v.at(2), Ok(&3));
        assert_eq!(
            v.at(3),
            Err(ContigError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn push_default_appends_default_and_grows() {
        let mut v: Vector<u32> = Vector::from([7]);
        v.push_default().unwrap();
        v.push_default().unwrap();
        assert_eq!(v, [7, 0, 0]);
        assert_eq!(v.capacity(), 4);
    }

    #[test]
    fn front_back_and_pop() {
        let mut v = Vector::from([4, 5, 6]);
        assert_eq!(v.front(), Some(&4));
        assert_eq!(v.back(), Some(&6));
        *v.back_mut().unwrap() = 60;
        assert_eq!(v.pop(), Some(60));
        assert_eq!(v.len(), 2);
        assert_eq!(v.capacity(), 3);
    }

    #[test]
    fn fill_construction_sizes_exactly() {
        let v = Vector::try_from_elem(5, &"x".to_string()).unwrap();
        assert_eq!(v.len(), 5);
        assert_eq!(v.capacity(), 5);
        assert!(v.iter().all(|s| s == "x"));
    }

    #[test]
    fn reserve_grows_exactly_and_never_shrinks() {
        let mut v: Vector<u8> = Vector::new();
        v.reserve(10).unwrap();
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 10);
        v.reserve(3).unwrap();
        assert_eq!(v.capacity(), 10);
    }

    #[test]
    fn reserve_preserves_contents() {
        let mut v = Vector::from([1, 2, 3]);
        v.reserve(100).unwrap();
        assert_eq!(v, [1, 2, 3]);
        assert_eq!(v.capacity(), 100);
    }

    #[test]
    fn clone_is_equal_and_independent() {
        let a = Vector::from(["a".to_string(), "b".to_string()]);
        let mut b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.capacity(), a.len());
        b.push("c".to_string()).unwrap();
        b[0].push('!');
        assert_eq!(a, ["a".to_string(), "b".to_string()]);
        assert_ne!(a, b);
    }

    #[test]
    fn swap_exchanges_everything() {
        let mut a = Vector::from([1, 2, 3]);
        let mut b = Vector::try_with_capacity(10).unwrap();
        b.push(9).unwrap();
        swap(&mut a, &mut b);
        assert_eq!(a, [9]);
        assert_eq!(a.capacity(), 10);
        assert_eq!(b, [1, 2, 3]);
        assert_eq!(b.capacity(), 3);
    }

    #[test]
    fn comparisons_are_size_then_lexicographic() {
        let short = Vector::from([1, 2]);
        let long = Vector::from([1, 2, 0]);
        let bigger = Vector::from([1, 3]);
        assert_ne!(short, long);
        assert!(short < long);
        assert!(long < bigger);
        assert_eq!(short.cmp(&short.clone()), Ordering::Equal);
    }

    #[test]
    fn cursors_span_the_live_range() {
        let v = Vector::from([10, 20, 30]);
        let begin = v.begin();
        let end = v.end();
        assert_eq!(end - begin, 3);
        assert_eq!(*(begin + 1), 20);
        assert_eq!(v.index_of(&(begin + 2)), Some(2));
        assert_eq!(v.index_of(&end), Some(3));
        assert_eq!(v.index_of(&(end + 1)), None);
    }

    #[test]
    fn mutable_cursor_edits_in_place() {
        let mut v = Vector::from([1, 2, 3]);
        {
            let mut c = v.begin_mut();
            c += 1;
            *c *= 10;
        }
        assert_eq!(v, [1, 20, 3]);
    }

    #[test]
    fn iteration_forward_reverse_and_owning() {
        let v = Vector::from([1, 2, 3]);
        assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(v.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(v.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn from_iter_with_unknown_length_uses_growth() {
        let v: Vector<u32> = (0..20).filter(|n| n % 2 == 0).collect();
        assert_eq!(v.len(), 10);
        assert_eq!(v.capacity(), 16);
    }

    #[test]
    fn from_iter_with_exact_length_sizes_once() {
        let v: Vector<u32> = (0..10).collect();
        assert_eq!(v.capacity(), 10);
    }

    #[test]
    fn max_size_reflects_element_size() {
        let bytes: Vector<u8> = Vector::new();
        let words: Vector<u64> = Vector::new();
        assert_eq!(bytes.max_size(), isize::MAX as usize);
        assert_eq!(words.max_size(), isize::MAX as usize / 8);
    }
}
