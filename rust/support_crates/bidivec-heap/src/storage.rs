use bidivec::BidiVec;

/// A random-access sequence that can back a [`BinaryHeap`](crate::BinaryHeap).
pub trait HeapStorage<T>: Default + FromIterator<T> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push_back(&mut self, value: T);

    fn pop_back(&mut self) -> Option<T>;

    fn as_slice(&self) -> &[T];

    fn as_mut_slice(&mut self) -> &mut [T];
}

impl<T> HeapStorage<T> for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn push_back(&mut self, value: T) {
        self.push(value);
    }

    #[inline]
    fn pop_back(&mut self) -> Option<T> {
        self.pop()
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T> HeapStorage<T> for BidiVec<T> {
    #[inline]
    fn len(&self) -> usize {
        BidiVec::len(self)
    }

    #[inline]
    fn push_back(&mut self, value: T) {
        BidiVec::push_back(self, value);
    }

    #[inline]
    fn pop_back(&mut self) -> Option<T> {
        BidiVec::pop_back(self)
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        BidiVec::as_slice(self)
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        BidiVec::as_mut_slice(self)
    }
}
