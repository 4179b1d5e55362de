//! A binary max-heap adapter generic over its backing sequence.
//!
//! The heap only needs random access to its elements, `push_back`/`pop_back`
//! and construction from an iterator; the [`HeapStorage`] trait captures that
//! contract and is implemented for `Vec<T>` and `BidiVec<T>`.

mod storage;

use std::fmt;
use std::marker::PhantomData;

pub use storage::HeapStorage;

/// A max-heap stored as an implicit binary tree in `S`.
///
/// The greatest element (by `Ord`) is at index 0 of the storage; the children
/// of index `i` are at `2 * i + 1` and `2 * i + 2`.
///
/// # Examples
///
/// ```
/// use bidivec::BidiVec;
/// use bidivec_heap::BinaryHeap;
///
/// let mut heap: BinaryHeap<i32, BidiVec<i32>> = [3, 1, 4, 1, 5].into_iter().collect();
/// assert_eq!(heap.peek(), Some(&5));
/// heap.push(9);
/// assert_eq!(heap.pop(), Some(9));
/// assert_eq!(heap.pop(), Some(5));
/// assert_eq!(heap.len(), 4);
/// ```
pub struct BinaryHeap<T, S = Vec<T>> {
    data: S,
    _marker: PhantomData<T>,
}

impl<T, S> BinaryHeap<T, S>
where
    T: Ord,
    S: HeapStorage<T>,
{
    /// Creates an empty heap over empty storage.
    pub fn new() -> BinaryHeap<T, S> {
        BinaryHeap {
            data: S::default(),
            _marker: PhantomData,
        }
    }

    /// Builds a heap over the elements already in `data`, in O(n).
    pub fn from_storage(data: S) -> BinaryHeap<T, S> {
        let mut heap = BinaryHeap {
            data,
            _marker: PhantomData,
        };
        heap.rebuild();
        heap
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The greatest element, or `None` if the heap is empty.
    pub fn peek(&self) -> Option<&T> {
        self.data.as_slice().first()
    }

    /// Adds `value` to the heap in O(log n), plus the storage's amortized
    /// `push_back` cost.
    pub fn push(&mut self, value: T) {
        self.data.push_back(value);
        let last = self.data.len() - 1;
        self.sift_up(last);
    }

    /// Removes and returns the greatest element.
    pub fn pop(&mut self) -> Option<T> {
        let len = self.data.len();
        if len == 0 {
            return None;
        }
        self.data.as_mut_slice().swap(0, len - 1);
        let top = self.data.pop_back();
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        top
    }

    /// The elements in heap order (not sorted).
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Consumes the heap, returning its storage in heap order.
    pub fn into_storage(self) -> S {
        self.data
    }

    /// Consumes the heap, returning its elements in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(value) = self.pop() {
            sorted.push(value);
        }
        sorted.reverse();
        sorted
    }

    fn rebuild(&mut self) {
        let len = self.data.len();
        for i in (0..len / 2).rev() {
            self.sift_down(i);
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        let data = self.data.as_mut_slice();
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if data[pos] <= data[parent] {
                break;
            }
            data.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let data = self.data.as_mut_slice();
        let len = data.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && data[right] > data[left] {
                right
            } else {
                left
            };
            if data[child] <= data[pos] {
                break;
            }
            data.swap(pos, child);
            pos = child;
        }
    }
}

impl<T, S> Default for BinaryHeap<T, S>
where
    T: Ord,
    S: HeapStorage<T>,
{
    fn default() -> Self {
        BinaryHeap::new()
    }
}

impl<T, S> FromIterator<T> for BinaryHeap<T, S>
where
    T: Ord,
    S: HeapStorage<T>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        BinaryHeap::from_storage(iter.into_iter().collect())
    }
}

impl<T, S> Extend<T> for BinaryHeap<T, S>
where
    T: Ord,
    S: HeapStorage<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, S> Clone for BinaryHeap<T, S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        BinaryHeap {
            data: self.data.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug, S: HeapStorage<T>> fmt::Debug for BinaryHeap<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BinaryHeap")
            .field(&self.data.as_slice())
            .finish()
    }
}
