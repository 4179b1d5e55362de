use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};

use crate::cursor::{Cursor, CursorMut};
use crate::error::Error;
use crate::growth::{self, Placement};
use crate::iter::IntoIter;
use crate::raw::RawStorage;
use crate::result::{self, Result};

/// A contiguous growable sequence with amortized O(1) insertion and removal at
/// both ends.
///
/// `BidiVec` owns one allocation tracked by four positions:
///
/// ```text
/// start_of_storage   first_live          end_of_live     end_of_storage
///        |  front slack  |   live elements    |  back slack   |
/// ```
///
/// The live range always lies within the allocation but need not touch either
/// boundary. Slack slots are uninitialized. When an insertion runs out of room,
/// the buffer is reallocated to `max(len, requested) + len` slots and the live
/// range is placed a quarter of the way in, so both `push_front` and
/// `push_back` get amortized O(1) growth.
///
/// The elements are always stored contiguously, so `BidiVec<T>` dereferences
/// to `[T]` and can stand in for `Vec<T>` wherever a slice is expected.
///
/// # Panic safety
///
/// Reallocating insertions have the strong guarantee: if the new allocation
/// cannot be sized or the element constructor fails (returns `Err` or panics),
/// the container is left exactly as it was. In-place shifting insertions
/// construct the new element before moving anything and relocation of Rust
/// values cannot fail, so they leave the container unchanged as well; only
/// the reallocation path is documented as strong, matching `Vec::insert`.
///
/// # Examples
///
/// ```
/// use bidivec::BidiVec;
///
/// let mut v = BidiVec::new();
/// v.push_back(2);
/// v.push_front(1);
/// v.push_back(3);
/// v.insert(0, 0);
/// assert_eq!(v, [0, 1, 2, 3]);
/// assert_eq!(v.pop_front(), Some(0));
/// assert_eq!(v.pop_back(), Some(3));
/// ```
pub struct BidiVec<T> {
    /// The allocation; `start_of_storage` is slot 0 and `end_of_storage` is
    /// `buf.capacity()`.
    buf: RawStorage<T>,
    /// Slot of the first live element (`first_live`).
    head: usize,
    /// Number of live elements; `end_of_live` is `head + len`.
    len: usize,
}

impl<T> BidiVec<T> {
    /// Creates an empty `BidiVec` without allocating.
    pub const fn new() -> BidiVec<T> {
        BidiVec {
            buf: RawStorage::new(),
            head: 0,
            len: 0,
        }
    }

    /// Creates an empty `BidiVec` with room for `capacity` elements, all of it
    /// placed as back slack.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`max_size`](Self::max_size).
    pub fn with_capacity(capacity: usize) -> BidiVec<T> {
        match Self::try_with_capacity(capacity) {
            Ok(v) => v,
            Err(e) => result::fail(e),
        }
    }

    /// Fallible version of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<BidiVec<T>> {
        Ok(BidiVec {
            buf: RawStorage::allocate(capacity)?,
            head: 0,
            len: 0,
        })
    }

    /// Creates a `BidiVec` of `len` elements produced by `f(index)`.
    ///
    /// The result has no slack: `len() == capacity() == len`.
    pub fn from_fn<F>(len: usize, mut f: F) -> BidiVec<T>
    where
        F: FnMut(usize) -> T,
    {
        let mut v = BidiVec::with_capacity(len);
        for i in 0..len {
            let value = f(i);
            // `len` tracks the constructed prefix, so a panic in `f` drops
            // exactly what was built.
            unsafe { v.buf.write(i, value) };
            v.len += 1;
        }
        v
    }

    /// Creates a `BidiVec` of `len` default values, with no slack.
    pub fn with_default(len: usize) -> BidiVec<T>
    where
        T: Default,
    {
        BidiVec::from_fn(len, |_| T::default())
    }

    /// Creates a `BidiVec` of `len` clones of `value`, with no slack.
    pub fn from_elem(value: T, len: usize) -> BidiVec<T>
    where
        T: Clone,
    {
        BidiVec::from_fn(len, |_| value.clone())
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the total number of slots in the allocation, live or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the number of free slots before the first element.
    #[inline]
    pub fn front_slack(&self) -> usize {
        self.head
    }

    /// Returns the number of free slots after the last element.
    #[inline]
    pub fn back_slack(&self) -> usize {
        self.buf.capacity() - self.head - self.len
    }

    /// Returns the largest number of elements any `BidiVec<T>` can hold.
    #[inline]
    pub fn max_size(&self) -> usize {
        growth::max_size::<T>()
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.buf.slot(self.head), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.buf.slot(self.head), self.len) }
    }

    /// Returns a raw pointer to the first live element.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        unsafe { self.buf.slot(self.head) }
    }

    /// Returns a mutable raw pointer to the first live element.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        unsafe { self.buf.slot(self.head) }
    }
}

/// Element access.
impl<T> BidiVec<T> {
    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T> {
        result::verify_index(index, self.len)?;
        Ok(unsafe { self.get_unchecked(index) })
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        result::verify_index(index, self.len)?;
        Ok(unsafe { self.get_unchecked_mut(index) })
    }

    /// Returns the element at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        (index < self.len).then(|| unsafe { self.get_unchecked(index) })
    }

    /// Returns the element at `index` mutably, or `None` if out of range.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            Some(unsafe { self.get_unchecked_mut(index) })
        } else {
            None
        }
    }

    /// Returns the element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index < len()`. Anything else is undefined behavior.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { &*self.buf.slot(self.head + index) }
    }

    /// Returns the element at `index` mutably without a bounds check.
    ///
    /// # Safety
    ///
    /// `index < len()`. Anything else is undefined behavior.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.buf.slot(self.head + index) }
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        let last = self.len.checked_sub(1)?;
        self.get(last)
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len.checked_sub(1)?;
        self.get_mut(last)
    }
}

/// Cursors and iterators.
impl<T> BidiVec<T> {
    /// Cursor at the first element.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the last element.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.len)
    }

    /// Cursor at logical position `position`. The position is not checked.
    pub fn cursor(&self, position: usize) -> Cursor<'_, T> {
        Cursor::new(self, position)
    }

    /// Mutable cursor at the first element.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, 0)
    }

    /// Mutable cursor one past the last element.
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len;
        CursorMut::new(self, len)
    }

    /// Mutable cursor at logical position `position`. The position is not
    /// checked.
    pub fn cursor_mut(&mut self, position: usize) -> CursorMut<'_, T> {
        CursorMut::new(self, position)
    }

    /// Iterates over the elements front to back. Use `.rev()` for reverse
    /// order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates mutably over the elements front to back.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

/// Capacity management.
impl<T> BidiVec<T> {
    /// Ensures at least `additional` free slots after the last element.
    ///
    /// # Panics
    ///
    /// Panics if the new length would exceed [`max_size`](Self::max_size).
    pub fn reserve(&mut self, additional: usize) {
        if let Err(e) = self.try_reserve(additional) {
            result::fail(e);
        }
    }

    /// Fallible version of [`reserve`](Self::reserve). On error the
    /// container is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        if self.back_slack() >= additional {
            return Ok(());
        }
        let placement = Placement::for_growth(self.len, additional, self.max_size())?;
        self.relocate(placement)
    }

    /// Ensures at least `additional` free slots before the first element.
    ///
    /// # Panics
    ///
    /// Panics if the new length would exceed [`max_size`](Self::max_size).
    pub fn reserve_front(&mut self, additional: usize) {
        if let Err(e) = self.try_reserve_front(additional) {
            result::fail(e);
        }
    }

    /// Fallible version of [`reserve_front`](Self::reserve_front). On error
    /// the container is unchanged.
    pub fn try_reserve_front(&mut self, additional: usize) -> Result<()> {
        if self.front_slack() >= additional {
            return Ok(());
        }
        let placement = Placement::for_front_growth(self.len, additional, self.max_size())?;
        self.relocate(placement)
    }

    /// Drops all slack, reallocating to exactly `len()` slots. An empty
    /// container releases its allocation.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() == self.len {
            return;
        }
        if self.len == 0 {
            self.buf = RawStorage::new();
            self.head = 0;
            return;
        }
        if let Err(e) = self.relocate(Placement::exact(self.len)) {
            result::fail(e);
        }
    }

    /// Moves the live range into a fresh allocation described by `placement`.
    fn relocate(&mut self, placement: Placement) -> Result<()> {
        debug_assert!(placement.head + self.len <= placement.capacity);
        let mut buf = RawStorage::allocate(placement.capacity)?;
        unsafe {
            self.buf
                .relocate_to(self.head, &mut buf, placement.head, self.len);
        }
        log::trace!(
            "bidivec relocate: len {}, capacity {} -> {}, head {} -> {}",
            self.len,
            self.buf.capacity(),
            placement.capacity,
            self.head,
            placement.head
        );
        // The old storage only frees its allocation; its slots were moved out.
        self.buf = buf;
        self.head = placement.head;
        Ok(())
    }
}

/// Insertion.
impl<T> BidiVec<T> {
    /// Appends `value` after the last element.
    ///
    /// Runs in O(1) while back slack remains; otherwise reallocates and
    /// re-centers the live range.
    ///
    /// # Panics
    ///
    /// Panics if the new length would exceed [`max_size`](Self::max_size).
    pub fn push_back(&mut self, value: T) {
        self.insert_or_fail(self.len, value)
    }

    /// Prepends `value` before the first element.
    ///
    /// Runs in O(1) while front slack remains; otherwise reallocates and
    /// re-centers the live range.
    ///
    /// # Panics
    ///
    /// Panics if the new length would exceed [`max_size`](Self::max_size).
    pub fn push_front(&mut self, value: T) {
        self.insert_or_fail(0, value)
    }

    /// Fallible version of [`push_back`](Self::push_back). On error the
    /// container is unchanged and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        self.emplace(self.len, || Ok(value))
    }

    /// Fallible version of [`push_front`](Self::push_front). On error the
    /// container is unchanged and `value` is dropped.
    pub fn try_push_front(&mut self, value: T) -> Result<()> {
        self.emplace(0, || Ok(value))
    }

    /// Appends the value produced by `f`, constructing it only once room for
    /// it exists.
    pub fn push_back_with<F>(&mut self, f: F)
    where
        F: FnOnce() -> T,
    {
        if let Err(e) = self.emplace::<Error, _>(self.len, || Ok(f())) {
            result::fail(e);
        }
    }

    /// Prepends the value produced by `f`, constructing it only once room for
    /// it exists.
    pub fn push_front_with<F>(&mut self, f: F)
    where
        F: FnOnce() -> T,
    {
        if let Err(e) = self.emplace::<Error, _>(0, || Ok(f())) {
            result::fail(e);
        }
    }

    /// Appends the value produced by a fallible constructor.
    ///
    /// If `f` fails, or the container cannot grow, the container is unchanged
    /// and the error is returned.
    pub fn try_push_back_with<E, F>(&mut self, f: F) -> std::result::Result<(), E>
    where
        E: From<Error>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        self.emplace(self.len, f)
    }

    /// Prepends the value produced by a fallible constructor.
    ///
    /// If `f` fails, or the container cannot grow, the container is unchanged
    /// and the error is returned.
    pub fn try_push_front_with<E, F>(&mut self, f: F) -> std::result::Result<(), E>
    where
        E: From<Error>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        self.emplace(0, f)
    }

    /// Inserts `value` so that it ends up at logical position `index`.
    ///
    /// With front slack and `index` in the first half, the elements before
    /// `index` shift one slot towards the front. Otherwise, with back slack,
    /// the elements from `index` on shift one slot towards the back. With no
    /// slack at all the buffer is reallocated.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()` or the new length would exceed
    /// [`max_size`](Self::max_size).
    pub fn insert(&mut self, index: usize, value: T) {
        let len = self.len;
        if index > len {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }
        self.insert_or_fail(index, value)
    }

    /// Fallible version of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index > len()`, `LengthExceeded` if the container
    /// cannot grow. The container is unchanged in both cases.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<()> {
        result::verify_position(index, self.len)?;
        self.emplace(index, || Ok(value))
    }

    /// Inserts the value produced by `f` at logical position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()` or the new length would exceed
    /// [`max_size`](Self::max_size).
    pub fn insert_with<F>(&mut self, index: usize, f: F)
    where
        F: FnOnce() -> T,
    {
        let len = self.len;
        if index > len {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }
        if let Err(e) = self.emplace::<Error, _>(index, || Ok(f())) {
            result::fail(e);
        }
    }

    /// Inserts the value produced by a fallible constructor at logical position
    /// `index`.
    ///
    /// `f` runs before any element is moved. When the buffer must be
    /// reallocated, `f` runs after the new allocation exists and its result is
    /// written straight to its final slot there; if `f` fails the new
    /// allocation is released and the container is unchanged.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns, or `OutOfRange`/`LengthExceeded` converted into
    /// `E`.
    pub fn try_insert_with<E, F>(&mut self, index: usize, f: F) -> std::result::Result<(), E>
    where
        E: From<Error>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        result::verify_position(index, self.len)?;
        self.emplace(index, f)
    }

    /// Appends clones of all elements of `other`.
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        self.reserve(other.len());
        for value in other {
            self.push_back(value.clone());
        }
    }

    /// Moves all elements of `other` to the back of `self`, leaving `other`
    /// empty. `other` keeps its allocation.
    pub fn append(&mut self, other: &mut BidiVec<T>) {
        self.reserve(other.len);
        let count = other.len;
        let tail = self.head + self.len;
        unsafe {
            other.buf.relocate_to(other.head, &mut self.buf, tail, count);
        }
        other.len = 0;
        self.len += count;
    }

    /// Resizes the container to `new_len`, appending clones of `value` or
    /// dropping elements from the back.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone())
    }

    /// Resizes the container to `new_len`, appending values produced by `f` or
    /// dropping elements from the back.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len - self.len);
        while self.len < new_len {
            self.push_back(f());
        }
    }

    fn insert_or_fail(&mut self, index: usize, value: T) {
        if let Err(e) = self.emplace(index, || Ok(value)) {
            result::fail(e);
        }
    }

    /// Inserts the result of `f` at `index <= len`.
    ///
    /// End insertions use their side's slack directly. Interior insertions use
    /// the three-way dispatch: shift the prefix into the front slack when the
    /// index is in the first half, else shift the suffix into the back slack,
    /// else reallocate. An end insertion whose side has no slack reallocates
    /// instead of shifting the whole live range, which keeps both ends
    /// amortized O(1).
    fn emplace<E, F>(&mut self, index: usize, f: F) -> std::result::Result<(), E>
    where
        E: From<Error>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        debug_assert!(index <= self.len);

        if index == 0 && self.head > 0 {
            let value = f()?;
            unsafe { self.buf.write(self.head - 1, value) };
            self.head -= 1;
            self.len += 1;
            return Ok(());
        }

        if index == self.len && self.back_slack() > 0 {
            let value = f()?;
            unsafe { self.buf.write(self.head + self.len, value) };
            self.len += 1;
            return Ok(());
        }

        if index == 0 || index == self.len {
            return self.grow_and_emplace(index, f);
        }

        if self.head > 0 && index < self.len / 2 {
            let value = f()?;
            unsafe {
                self.buf.shift(self.head, self.head - 1, index);
                self.buf.write(self.head - 1 + index, value);
            }
            self.head -= 1;
            self.len += 1;
        } else if self.back_slack() > 0 {
            let value = f()?;
            let at = self.head + index;
            unsafe {
                self.buf.shift(at, at + 1, self.len - index);
                self.buf.write(at, value);
            }
            self.len += 1;
        } else {
            return self.grow_and_emplace(index, f);
        }
        Ok(())
    }

    /// Reallocating insertion with the strong guarantee.
    ///
    /// The new allocation is owned by a local until every element has been
    /// moved into it, so an early return or a panic in `f` frees it and leaves
    /// `self` untouched.
    #[cold]
    fn grow_and_emplace<E, F>(&mut self, index: usize, f: F) -> std::result::Result<(), E>
    where
        E: From<Error>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let placement = Placement::for_growth(self.len, 1, self.max_size())?;
        let mut buf = RawStorage::allocate(placement.capacity)?;
        let at = placement.head + index;

        let value = f()?;
        unsafe {
            buf.write(at, value);
            self.buf.relocate_to(self.head, &mut buf, placement.head, index);
            self.buf
                .relocate_to(self.head + index, &mut buf, at + 1, self.len - index);
        }

        log::trace!(
            "bidivec grow: len {}, capacity {} -> {}, head {} -> {}",
            self.len,
            self.buf.capacity(),
            placement.capacity,
            self.head,
            placement.head
        );
        self.buf = buf;
        self.head = placement.head;
        self.len += 1;
        Ok(())
    }
}

/// Removal.
impl<T> BidiVec<T> {
    /// Removes and returns the first element in O(1).
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = unsafe { self.buf.read(self.head) };
        self.head += 1;
        self.len -= 1;
        Some(value)
    }

    /// Removes and returns the last element in O(1).
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(unsafe { self.buf.read(self.head + self.len) })
    }

    /// Removes and returns the element at `index`, shifting whichever side of
    /// it is shorter.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        match self.try_remove(index) {
            Ok(value) => value,
            Err(_) => {
                let len = self.len;
                panic!("removal index (is {index}) should be < len (is {len})");
            }
        }
    }

    /// Fallible version of [`remove`](Self::remove).
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index >= len()`; the container is unchanged.
    pub fn try_remove(&mut self, index: usize) -> Result<T> {
        result::verify_index(index, self.len)?;
        let at = self.head + index;
        let value = unsafe { self.buf.read(at) };
        if index < self.len / 2 {
            unsafe { self.buf.shift(self.head, self.head + 1, index) };
            self.head += 1;
        } else {
            unsafe { self.buf.shift(at + 1, at, self.len - index - 1) };
        }
        self.len -= 1;
        Ok(value)
    }

    /// Keeps the first `len` elements and drops the rest. The allocation and
    /// the front slack are retained.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let start = self.head + len;
        let count = self.len - len;
        // Shrink first: a panicking destructor leaks the rest instead of
        // dropping it twice.
        self.len = len;
        unsafe { self.buf.drop_range(start, count) };
    }

    /// Keeps the last `len` elements and drops the rest. The allocation and
    /// the back slack are retained.
    pub fn truncate_front(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let start = self.head;
        let count = self.len - len;
        self.head += count;
        self.len = len;
        unsafe { self.buf.drop_range(start, count) };
    }

    /// Drops all elements. The allocation and both slacks are retained: the
    /// live range collapses to an empty range at its current head.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Keeps only the elements for which `f` returns `true`, in order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.retain_mut(|value| f(value))
    }

    /// Keeps only the elements for which `f` returns `true`, in order, giving
    /// `f` mutable access.
    pub fn retain_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        // Closes the gap between `write` and `read` when the pass ends, whether
        // it finishes or unwinds out of `f` or a destructor.
        struct Compact<'a, T> {
            vec: &'a mut BidiVec<T>,
            read: usize,
            write: usize,
            original_len: usize,
        }

        impl<T> Drop for Compact<'_, T> {
            fn drop(&mut self) {
                let remaining = self.original_len - self.read;
                let head = self.vec.head;
                if remaining > 0 && self.read != self.write {
                    unsafe {
                        self.vec
                            .buf
                            .shift(head + self.read, head + self.write, remaining)
                    };
                }
                self.vec.len = self.write + remaining;
            }
        }

        let original_len = self.len;
        self.len = 0;
        let mut pass = Compact {
            vec: self,
            read: 0,
            write: 0,
            original_len,
        };

        while pass.read < pass.original_len {
            let head = pass.vec.head;
            let current = unsafe { &mut *pass.vec.buf.slot(head + pass.read) };
            if f(current) {
                if pass.read != pass.write {
                    unsafe { pass.vec.buf.shift(head + pass.read, head + pass.write, 1) };
                }
                pass.read += 1;
                pass.write += 1;
            } else {
                pass.read += 1;
                unsafe { pass.vec.buf.drop_range(head + pass.read - 1, 1) };
            }
        }
    }

    /// Converts into a `Vec<T>` holding the same elements.
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Splits the storage out of `self` for by-value iteration, leaving `self`
    /// empty and allocation-free.
    pub(crate) fn take_storage(&mut self) -> (RawStorage<T>, usize, usize) {
        let buf = std::mem::replace(&mut self.buf, RawStorage::new());
        let head = std::mem::take(&mut self.head);
        let len = std::mem::take(&mut self.len);
        (buf, head, len)
    }
}

impl<T> Drop for BidiVec<T> {
    fn drop(&mut self) {
        unsafe { self.buf.drop_range(self.head, self.len) };
    }
}

impl<T> Default for BidiVec<T> {
    fn default() -> Self {
        BidiVec::new()
    }
}

impl<T: Clone> Clone for BidiVec<T> {
    fn clone(&self) -> BidiVec<T> {
        let src = self.as_slice();
        BidiVec::from_fn(src.len(), |i| src[i].clone())
    }
}

impl<T> Deref for BidiVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for BidiVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for BidiVec<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for BidiVec<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> AsRef<[T]> for BidiVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for BidiVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> std::borrow::Borrow<[T]> for BidiVec<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> std::borrow::BorrowMut<[T]> for BidiVec<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for BidiVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq<BidiVec<U>> for BidiVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &BidiVec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for BidiVec<T> {}

impl<T, U> PartialEq<[U]> for BidiVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for BidiVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for BidiVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<Vec<U>> for BidiVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd> PartialOrd for BidiVec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for BidiVec<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for BidiVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T> Extend<T> for BidiVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for BidiVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        <Self as Extend<T>>::extend(self, iter.into_iter().copied())
    }
}

impl<T> FromIterator<T> for BidiVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = BidiVec::new();
        v.extend(iter);
        v
    }
}

impl<T> IntoIterator for BidiVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let (buf, head, len) = self.take_storage();
        IntoIter::new(buf, head, len)
    }
}

impl<'a, T> IntoIterator for &'a BidiVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut BidiVec<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> From<Vec<T>> for BidiVec<T> {
    fn from(vec: Vec<T>) -> Self {
        let len = vec.len();
        let mut v = BidiVec::with_capacity(len);
        let mut vec = std::mem::ManuallyDrop::new(vec);
        unsafe {
            std::ptr::copy_nonoverlapping(vec.as_ptr(), v.buf.slot(0), len);
            // The values now belong to `v`; free the source allocation only.
            vec.set_len(0);
            std::mem::ManuallyDrop::drop(&mut vec);
        }
        v.len = len;
        v
    }
}

impl<T: Clone> From<&[T]> for BidiVec<T> {
    fn from(slice: &[T]) -> Self {
        BidiVec::from_fn(slice.len(), |i| slice[i].clone())
    }
}

impl<T, const N: usize> From<[T; N]> for BidiVec<T> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T> From<BidiVec<T>> for Vec<T> {
    fn from(v: BidiVec<T>) -> Self {
        v.into_vec()
    }
}

#[cfg(test)]
impl<T> BidiVec<T> {
    /// Checks the four-position invariants.
    pub(crate) fn verify(&self) {
        assert!(self.head + self.len <= self.buf.capacity());
        if self.buf.capacity() == 0 {
            assert_eq!(self.head, 0);
            assert_eq!(self.len, 0);
        }
    }
}
