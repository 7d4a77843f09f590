//! Random-access cursors over a container's live range.
//!
//! A [`Cursor`] is a position inside one container's elements, tagged at the
//! type level with the container type `C` so that cursors of different
//! container types cannot be compared or subtracted. It owns nothing and is
//! `Copy`. [`CursorMut`] is the writable counterpart; it converts into a
//! [`Cursor`] but never the other way round.
//!
//! Cursors borrow the range they point into, so the borrow checker rejects
//! any mutation of the container while a cursor is alive. Moving a cursor
//! is plain integer arithmetic and may leave the range (one-past-the-end is
//! the usual stop position); only dereferencing checks bounds, and
//! dereferencing outside the live range panics.
//!
//! Comparing cursors taken from two different containers of the same type
//! yields an unspecified answer.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Deref, DerefMut, Index, IndexMut, Sub, SubAssign};

#[cold]
#[inline(never)]
#[track_caller]
fn out_of_range(pos: isize, len: usize) -> ! {
    panic!("cursor dereferenced outside live range: position {pos}, len {len}")
}

fn slot(pos: isize, len: usize) -> Option<usize> {
    usize::try_from(pos).ok().filter(|&i| i < len)
}

/// A read-only position within a container of type `C`.
pub struct Cursor<'a, T, C> {
    range: &'a [T],
    pos: isize,
    _tag: PhantomData<fn() -> C>,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(crate) fn new(range: &'a [T], pos: usize) -> Self {
        Self {
            range,
            pos: pos as isize,
            _tag: PhantomData,
        }
    }

    /// The underlying position, counted in elements from the first slot.
    pub fn position(&self) -> isize {
        self.pos
    }

    /// The element under the cursor, or `None` outside the live range.
    pub fn get(&self) -> Option<&'a T> {
        let range = self.range;
        slot(self.pos, range.len()).map(|i| &range[i])
    }

    /// The element `n` slots away from the cursor (`cursor[n]`).
    ///
    /// # Panics
    ///
    /// Panics if that slot is outside the live range.
    #[track_caller]
    pub fn at(&self, n: isize) -> &'a T {
        let range = self.range;
        let pos = self.pos.wrapping_add(n);
        match slot(pos, range.len()) {
            Some(i) => &range[i],
            None => out_of_range(pos, range.len()),
        }
    }

    /// Advance by one (prefix increment).
    pub fn inc(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_add(1);
        self
    }

    /// Advance by one, returning the position before the move (postfix
    /// increment).
    pub fn post_inc(&mut self) -> Self {
        let before = *self;
        self.inc();
        before
    }

    /// Step back by one (prefix decrement).
    pub fn dec(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_sub(1);
        self
    }

    /// Step back by one, returning the position before the move.
    pub fn post_dec(&mut self) -> Self {
        let before = *self;
        self.dec();
        before
    }
}

impl<T, C> Clone for Cursor<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for Cursor<'_, T, C> {}

impl<T, C> Deref for Cursor<'_, T, C> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        self.at(0)
    }
}

impl<T, C> Index<isize> for Cursor<'_, T, C> {
    type Output = T;

    #[track_caller]
    fn index(&self, n: isize) -> &T {
        self.at(n)
    }
}

impl<T, C> AddAssign<isize> for Cursor<'_, T, C> {
    fn add_assign(&mut self, n: isize) {
        self.pos = self.pos.wrapping_add(n);
    }
}

impl<T, C> SubAssign<isize> for Cursor<'_, T, C> {
    fn sub_assign(&mut self, n: isize) {
        self.pos = self.pos.wrapping_sub(n);
    }
}

impl<T, C> Add<isize> for Cursor<'_, T, C> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<'a, T, C> Add<Cursor<'a, T, C>> for isize {
    type Output = Cursor<'a, T, C>;

    fn add(self, cursor: Cursor<'a, T, C>) -> Cursor<'a, T, C> {
        cursor + self
    }
}

impl<T, C> Sub<isize> for Cursor<'_, T, C> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

/// Distance between two cursors into the same container.
impl<'b, T, C> Sub<Cursor<'b, T, C>> for Cursor<'_, T, C> {
    type Output = isize;

    fn sub(self, other: Cursor<'b, T, C>) -> isize {
        self.pos.wrapping_sub(other.pos)
    }
}

impl<'b, T, C> PartialEq<Cursor<'b, T, C>> for Cursor<'_, T, C> {
    fn eq(&self, other: &Cursor<'b, T, C>) -> bool {
        self.pos == other.pos
    }
}

impl<T, C> Eq for Cursor<'_, T, C> {}

impl<'b, T, C> PartialOrd<Cursor<'b, T, C>> for Cursor<'_, T, C> {
    fn partial_cmp(&self, other: &Cursor<'b, T, C>) -> Option<Ordering> {
        Some(self.pos.cmp(&other.pos))
    }
}

impl<T, C> Ord for Cursor<'_, T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos.cmp(&other.pos)
    }
}

impl<T, C> Hash for Cursor<'_, T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl<T, C> fmt::Debug for Cursor<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.pos)
            .field("len", &self.range.len())
            .finish()
    }
}

/// A writable position within a container of type `C`.
///
/// Not `Copy`: two live copies would alias the same element mutably.
pub struct CursorMut<'a, T, C> {
    range: &'a mut [T],
    pos: isize,
    _tag: PhantomData<fn() -> C>,
}

impl<'a, T, C> CursorMut<'a, T, C> {
    pub(crate) fn new(range: &'a mut [T], pos: usize) -> Self {
        Self {
            range,
            pos: pos as isize,
            _tag: PhantomData,
        }
    }

    /// The underlying position, counted in elements from the first slot.
    pub fn position(&self) -> isize {
        self.pos
    }

    /// The element under the cursor, or `None` outside the live range.
    pub fn get(&self) -> Option<&T> {
        slot(self.pos, self.range.len()).map(|i| &self.range[i])
    }

    /// Mutable access to the element under the cursor.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        slot(self.pos, self.range.len()).map(|i| &mut self.range[i])
    }

    /// The element `n` slots away from the cursor.
    ///
    /// # Panics
    ///
    /// Panics if that slot is outside the live range.
    #[track_caller]
    pub fn at(&self, n: isize) -> &T {
        self.as_cursor().at(n)
    }

    /// Mutable access to the element `n` slots away from the cursor.
    ///
    /// # Panics
    ///
    /// Panics if that slot is outside the live range.
    #[track_caller]
    pub fn at_mut(&mut self, n: isize) -> &mut T {
        let pos = self.pos.wrapping_add(n);
        let len = self.range.len();
        match slot(pos, len) {
            Some(i) => &mut self.range[i],
            None => out_of_range(pos, len),
        }
    }

    /// Advance by one (prefix increment).
    pub fn inc(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_add(1);
        self
    }

    /// Advance by one and return a read-only view of the position before
    /// the move (postfix increment).
    pub fn post_inc(&mut self) -> Cursor<'_, T, C> {
        self.inc();
        self.as_cursor() - 1
    }

    /// Step back by one (prefix decrement).
    pub fn dec(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_sub(1);
        self
    }

    /// Step back by one and return a read-only view of the position before
    /// the move.
    pub fn post_dec(&mut self) -> Cursor<'_, T, C> {
        self.dec();
        self.as_cursor() + 1
    }

    /// A read-only cursor at the same position, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T, C> {
        Cursor {
            range: &*self.range,
            pos: self.pos,
            _tag: PhantomData,
        }
    }
}

impl<'a, T, C> From<CursorMut<'a, T, C>> for Cursor<'a, T, C> {
    fn from(cursor: CursorMut<'a, T, C>) -> Self {
        Cursor {
            range: cursor.range,
            pos: cursor.pos,
            _tag: PhantomData,
        }
    }
}

impl<T, C> Deref for CursorMut<'_, T, C> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        self.at(0)
    }
}

impl<T, C> DerefMut for CursorMut<'_, T, C> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        self.at_mut(0)
    }
}

impl<T, C> Index<isize> for CursorMut<'_, T, C> {
    type Output = T;

    #[track_caller]
    fn index(&self, n: isize) -> &T {
        self.at(n)
    }
}

impl<T, C> IndexMut<isize> for CursorMut<'_, T, C> {
    #[track_caller]
    fn index_mut(&mut self, n: isize) -> &mut T {
        self.at_mut(n)
    }
}

impl<T, C> AddAssign<isize> for CursorMut<'_, T, C> {
    fn add_assign(&mut self, n: isize) {
        self.pos = self.pos.wrapping_add(n);
    }
}

impl<T, C> SubAssign<isize> for CursorMut<'_, T, C> {
    fn sub_assign(&mut self, n: isize) {
        self.pos = self.pos.wrapping_sub(n);
    }
}

impl<T, C> Add<isize> for CursorMut<'_, T, C> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<T, C> Sub<isize> for CursorMut<'_, T, C> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<'b, T, C> Sub<&Cursor<'b, T, C>> for &CursorMut<'_, T, C> {
    type Output = isize;

    fn sub(self, other: &Cursor<'b, T, C>) -> isize {
        self.pos.wrapping_sub(other.pos)
    }
}

impl<'b, T, C> PartialEq<Cursor<'b, T, C>> for CursorMut<'_, T, C> {
    fn eq(&self, other: &Cursor<'b, T, C>) -> bool {
        self.pos == other.pos
    }
}

impl<'b, T, C> PartialOrd<Cursor<'b, T, C>> for CursorMut<'_, T, C> {
    fn partial_cmp(&self, other: &Cursor<'b, T, C>) -> Option<Ordering> {
        Some(self.pos.cmp(&other.pos))
    }
}

impl<'b, T, C> Sub<&CursorMut<'b, T, C>> for &CursorMut<'_, T, C> {
    type Output = isize;

    fn sub(self, other: &CursorMut<'b, T, C>) -> isize {
        self.pos.wrapping_sub(other.pos)
    }
}

impl<'b, T, C> PartialEq<CursorMut<'b, T, C>> for CursorMut<'_, T, C> {
    fn eq(&self, other: &CursorMut<'b, T, C>) -> bool {
        self.pos == other.pos
    }
}

impl<'b, T, C> PartialOrd<CursorMut<'b, T, C>> for CursorMut<'_, T, C> {
    fn partial_cmp(&self, other: &CursorMut<'b, T, C>) -> Option<Ordering> {
        Some(self.pos.cmp(&other.pos))
    }
}

impl<T, C> fmt::Debug for CursorMut<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.pos)
            .field("len", &self.range.len())
            .finish()
    }
}
