//! Random-access cursors bound to positions in a `BidiVec`.
//!
//! A cursor is a logical position (0 is the first live element, `len()` is one
//! past the last) plus a borrow of the container. Cursor arithmetic is never
//! checked: a cursor may be moved anywhere, and only dereferencing cares about
//! bounds. Dereferencing comes in two contracts:
//!
//! - checked (`get`, `at`): returns `None` outside `[0, len)`;
//! - unchecked (`get_unchecked`, `at_unchecked`): `unsafe`, undefined
//!   behavior outside `[0, len)`.
//!
//! Cursors borrow the container, so any insertion, removal or reallocation
//! ends their lifetime; none survives a mutation of the container.
//!
//! `CursorMut` converts into `Cursor` through `From`; the reverse conversion
//! does not exist.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::bidi_vec::BidiVec;

/// Read-only random-access cursor.
pub struct Cursor<'a, T> {
    vec: &'a BidiVec<T>,
    pos: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(vec: &'a BidiVec<T>, pos: usize) -> Cursor<'a, T> {
        Cursor { vec, pos }
    }

    /// Logical position of the cursor.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The element under the cursor, or `None` if the cursor is outside the
    /// live range.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.vec.get(self.pos)
    }

    /// The element under the cursor.
    ///
    /// # Safety
    ///
    /// The cursor must be within `[0, len)` of its container.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &'a T {
        unsafe { self.vec.get_unchecked(self.pos) }
    }

    /// The element `offset` positions away from the cursor, or `None` if that
    /// position is outside the live range.
    #[inline]
    pub fn at(&self, offset: isize) -> Option<&'a T> {
        self.vec.get(self.pos.wrapping_add_signed(offset))
    }

    /// The element `offset` positions away from the cursor.
    ///
    /// # Safety
    ///
    /// `position() + offset` must be within `[0, len)` of the container.
    #[inline]
    pub unsafe fn at_unchecked(&self, offset: isize) -> &'a T {
        unsafe { self.vec.get_unchecked(self.pos.wrapping_add_signed(offset)) }
    }

    /// Pre-increment: advances the cursor and returns it.
    #[inline]
    pub fn move_next(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_add(1);
        self
    }

    /// Pre-decrement: moves the cursor back and returns it.
    #[inline]
    pub fn move_prev(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_sub(1);
        self
    }

    /// Post-increment: advances the cursor, returning its previous value.
    #[inline]
    pub fn post_inc(&mut self) -> Self {
        let prev = *self;
        self.move_next();
        prev
    }

    /// Post-decrement: moves the cursor back, returning its previous value.
    #[inline]
    pub fn post_dec(&mut self) -> Self {
        let prev = *self;
        self.move_prev();
        prev
    }

    /// Signed distance from `origin` to this cursor.
    #[inline]
    pub fn offset_from(&self, origin: &Cursor<'_, T>) -> isize {
        debug_assert!(std::ptr::eq(self.vec, origin.vec));
        (self.pos as isize).wrapping_sub(origin.pos as isize)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("len", &self.vec.len())
            .finish()
    }
}

/// Cursors are equal when they point at the same position of the same
/// container.
impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.vec, other.vec) && self.pos == other.pos
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        std::ptr::eq(self.vec, other.vec).then(|| self.pos.cmp(&other.pos))
    }
}

impl<T> Add<isize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, offset: isize) -> Self {
        self += offset;
        self
    }
}

impl<T> Sub<isize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, offset: isize) -> Self {
        self -= offset;
        self
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, offset: isize) {
        self.pos = self.pos.wrapping_add_signed(offset);
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, offset: isize) {
        self.pos = self.pos.wrapping_add_signed(offset.wrapping_neg());
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, origin: Cursor<'a, T>) -> isize {
        self.offset_from(&origin)
    }
}

/// Random-access cursor with mutable access to the element under it.
pub struct CursorMut<'a, T> {
    vec: &'a mut BidiVec<T>,
    pos: usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(vec: &'a mut BidiVec<T>, pos: usize) -> CursorMut<'a, T> {
        CursorMut { vec, pos }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.vec.get(self.pos)
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.vec.get_mut(self.pos)
    }

    /// # Safety
    ///
    /// The cursor must be within `[0, len)` of its container.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        unsafe { self.vec.get_unchecked_mut(self.pos) }
    }

    #[inline]
    pub fn at_mut(&mut self, offset: isize) -> Option<&mut T> {
        self.vec.get_mut(self.pos.wrapping_add_signed(offset))
    }

    /// # Safety
    ///
    /// `position() + offset` must be within `[0, len)` of the container.
    #[inline]
    pub unsafe fn at_unchecked_mut(&mut self, offset: isize) -> &mut T {
        unsafe { self.vec.get_unchecked_mut(self.pos.wrapping_add_signed(offset)) }
    }

    #[inline]
    pub fn move_next(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_add(1);
        self
    }

    #[inline]
    pub fn move_prev(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_sub(1);
        self
    }

    /// A read-only cursor at the same position, borrowing from this one.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.vec, self.pos)
    }

    /// Signed distance from `origin` to this cursor.
    #[inline]
    pub fn offset_from(&self, origin: &Cursor<'_, T>) -> isize {
        self.as_cursor().offset_from(origin)
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("pos", &self.pos)
            .field("len", &self.vec.len())
            .finish()
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Cursor<'a, T> {
        Cursor::new(cursor.vec, cursor.pos)
    }
}

impl<T> Add<isize> for CursorMut<'_, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, offset: isize) -> Self {
        self += offset;
        self
    }
}

impl<T> Sub<isize> for CursorMut<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, offset: isize) -> Self {
        self -= offset;
        self
    }
}

impl<T> AddAssign<isize> for CursorMut<'_, T> {
    #[inline]
    fn add_assign(&mut self, offset: isize) {
        self.pos = self.pos.wrapping_add_signed(offset);
    }
}

impl<T> SubAssign<isize> for CursorMut<'_, T> {
    #[inline]
    fn sub_assign(&mut self, offset: isize) {
        self.pos = self.pos.wrapping_add_signed(offset.wrapping_neg());
    }
}

#[cfg(test)]
mod tests {
    use crate::BidiVec;

    #[test]
    fn test_cursor_walk() {
        let v: BidiVec<i32> = (0..5).collect();
        let mut c = v.begin();
        let end = v.end();
        let mut seen = Vec::new();
        while c != end {
            seen.push(*c.get().unwrap());
            c.move_next();
        }
        assert_eq!(seen, [0, 1, 2, 3, 4]);
        assert!(c.get().is_none());

        c.move_prev();
        assert_eq!(c.get(), Some(&4));
        let prev = c.post_dec();
        assert_eq!(prev.position(), 4);
        assert_eq!(c.position(), 3);
        let prev = c.post_inc();
        assert_eq!(prev.position(), 3);
        assert_eq!(c.position(), 4);
    }

    #[test]
    fn test_cursor_arithmetic() {
        let v: BidiVec<i32> = (10..20).collect();
        let begin = v.begin();
        let end = v.end();
        assert_eq!(end - begin, 10);
        assert_eq!(begin - end, -10);

        let mut c = begin + 3;
        assert_eq!(c.get(), Some(&13));
        c += 4;
        assert_eq!(c.get(), Some(&17));
        c -= 2;
        assert_eq!(c.get(), Some(&15));
        assert_eq!((c - 5).get(), Some(&10));
        assert_eq!(c.at(-1), Some(&14));
        assert_eq!(c.at(100), None);
        assert!(begin < c && c < end);
        assert_eq!(unsafe { *c.at_unchecked(2) }, 17);
        assert_eq!(unsafe { *c.get_unchecked() }, 15);
    }

    #[test]
    fn test_cursor_before_begin_is_not_dereferenceable() {
        let v: BidiVec<i32> = (0..3).collect();
        let c = v.begin() - 1;
        assert!(c.get().is_none());
        assert_eq!((c + 1).get(), Some(&0));
    }

    #[test]
    fn test_cursors_of_different_containers() {
        let a: BidiVec<i32> = (0..3).collect();
        let b: BidiVec<i32> = (0..3).collect();
        assert_ne!(a.begin(), b.begin());
        assert!(a.begin().partial_cmp(&b.begin()).is_none());
    }

    #[test]
    fn test_cursor_mut_writes() {
        let mut v: BidiVec<i32> = (0..5).collect();
        {
            let mut c = v.begin_mut() + 2;
            *c.get_mut().unwrap() = 20;
            *c.at_mut(1).unwrap() = 30;
            c.move_next().move_next();
            *c.get_mut().unwrap() *= 10;
            unsafe { *c.at_unchecked_mut(-4) = -1 };
            let c: crate::Cursor<'_, i32> = c.into();
            assert_eq!(c.position(), 4);
            assert_eq!(c.get(), Some(&40));
        }
        assert_eq!(v, [-1, 1, 20, 30, 40]);

        let mut end = v.end_mut();
        assert!(end.get_mut().is_none());
        end -= 1;
        assert_eq!(end.get(), Some(&40));
    }
}
