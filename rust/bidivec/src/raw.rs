//! Owned, uninitialized slot storage.
//!
//! `RawStorage<T>` owns one heap allocation of `capacity` slots and nothing
//! else: it never knows which slots hold live values and never runs element
//! destructors. Construction, destruction and relocation of individual slots
//! are explicit `unsafe` operations used by `BidiVec`, which tracks the live
//! range.
//!
//! # Safety
//!
//! Every slot operation takes raw slot indices. Callers must keep them within
//! `[0, capacity]` and must only read or drop slots they previously wrote.

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::{error::Error, growth, result::Result};

pub(crate) struct RawStorage<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawStorage<T> {}

unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    const IS_ZST: bool = std::mem::size_of::<T>() == 0;

    /// Storage with zero capacity and no allocation.
    pub const fn new() -> RawStorage<T> {
        RawStorage {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates room for `capacity` slots, all uninitialized.
    ///
    /// Zero capacity and zero-sized `T` do not allocate. Allocator failure is
    /// reported through [`alloc::handle_alloc_error`], like std collections do.
    pub fn allocate(capacity: usize) -> Result<RawStorage<T>> {
        if capacity == 0 {
            return Ok(RawStorage::new());
        }
        if capacity > growth::max_size::<T>() {
            return Err(Error::length_exceeded(capacity, growth::max_size::<T>()));
        }
        if Self::IS_ZST {
            return Ok(RawStorage {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        let layout = Self::layout(capacity)?;
        let ptr = unsafe { alloc::alloc(layout) } as *mut T;
        let Some(ptr) = NonNull::new(ptr) else {
            alloc::handle_alloc_error(layout);
        };
        Ok(RawStorage {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` when this storage owns a heap allocation.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.capacity != 0 && !Self::IS_ZST
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index <= capacity`.
    #[inline]
    pub unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity);
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Constructs `value` in slot `index`.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot is uninitialized (otherwise its previous
    /// value is leaked).
    #[inline]
    pub unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.capacity);
        unsafe { ptr::write(self.slot(index), value) }
    }

    /// Moves the value out of slot `index`, leaving the slot logically
    /// uninitialized.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot holds a value.
    #[inline]
    pub unsafe fn read(&self, index: usize) -> T {
        debug_assert!(index < self.capacity);
        unsafe { ptr::read(self.slot(index)) }
    }

    /// Drops the `count` values starting at slot `start`.
    ///
    /// # Safety
    ///
    /// All slots in `[start, start + count)` hold values; they are uninitialized
    /// afterwards.
    #[inline]
    pub unsafe fn drop_range(&mut self, start: usize, count: usize) {
        debug_assert!(start + count <= self.capacity);
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.slot(start), count)) }
    }

    /// Moves `count` values from slot `src` to slot `dst` within this storage.
    /// The ranges may overlap.
    ///
    /// # Safety
    ///
    /// Both ranges lie within the capacity and the source slots hold values.
    /// Source slots not covered by the destination become uninitialized.
    #[inline]
    pub unsafe fn shift(&mut self, src: usize, dst: usize, count: usize) {
        debug_assert!(src + count <= self.capacity);
        debug_assert!(dst + count <= self.capacity);
        unsafe { ptr::copy(self.slot(src), self.slot(dst), count) }
    }

    /// Moves `count` values from slot `src` of this storage into slot `dst` of
    /// `target`.
    ///
    /// # Safety
    ///
    /// The source slots hold values and the target slots are uninitialized.
    /// The source slots are uninitialized afterwards.
    #[inline]
    pub unsafe fn relocate_to(
        &self,
        src: usize,
        target: &mut RawStorage<T>,
        dst: usize,
        count: usize,
    ) {
        debug_assert!(src + count <= self.capacity);
        debug_assert!(dst + count <= target.capacity);
        unsafe { ptr::copy_nonoverlapping(self.slot(src), target.slot(dst), count) }
    }

    fn layout(capacity: usize) -> Result<Layout> {
        Layout::array::<T>(capacity)
            .map_err(|_| Error::length_exceeded(capacity, growth::max_size::<T>()))
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        if !self.is_allocated() {
            return;
        }
        if let Ok(layout) = Self::layout(self.capacity) {
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_storage_does_not_allocate() {
        let s = RawStorage::<u64>::new();
        assert_eq!(s.capacity(), 0);
        assert!(!s.is_allocated());

        let s = RawStorage::<u64>::allocate(0).unwrap();
        assert!(!s.is_allocated());
    }

    #[test]
    fn test_zst_storage_does_not_allocate() {
        let s = RawStorage::<()>::allocate(1000).unwrap();
        assert_eq!(s.capacity(), 1000);
        assert!(!s.is_allocated());
    }

    #[test]
    fn test_allocate_beyond_max_size() {
        let err = RawStorage::<u64>::allocate(usize::MAX / 2).err().unwrap();
        assert!(err.is_length_exceeded());
    }

    #[test]
    fn test_write_shift_read() {
        let mut s = RawStorage::<String>::allocate(8).unwrap();
        assert!(s.is_allocated());
        unsafe {
            s.write(2, "a".to_string());
            s.write(3, "b".to_string());
            s.write(4, "c".to_string());
            s.shift(2, 1, 3);
            assert_eq!(s.read(1), "a");
            s.drop_range(2, 2);
        }
    }

    #[test]
    fn test_relocate_between_storages() {
        let mut a = RawStorage::<Box<u32>>::allocate(4).unwrap();
        let mut b = RawStorage::<Box<u32>>::allocate(10).unwrap();
        unsafe {
            a.write(0, Box::new(7));
            a.write(1, Box::new(8));
            a.relocate_to(0, &mut b, 5, 2);
            assert_eq!(*b.read(5), 7);
            assert_eq!(*b.read(6), 8);
        }
    }
}
