use std::fmt;
use std::iter::FusedIterator;

use crate::raw::RawStorage;

/// By-value iterator over the elements of a `BidiVec`, front to back.
///
/// Elements not yet yielded are dropped together with the iterator.
pub struct IntoIter<T> {
    buf: RawStorage<T>,
    /// Next slot to yield from the front.
    start: usize,
    /// One past the next slot to yield from the back.
    end: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(buf: RawStorage<T>, head: usize, len: usize) -> IntoIter<T> {
        IntoIter {
            buf,
            start: head,
            end: head + len,
        }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.buf.slot(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let value = unsafe { self.buf.read(self.start) };
        self.start += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        Some(unsafe { self.buf.read(self.end) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let (start, count) = (self.start, self.end - self.start);
        self.start = self.end;
        unsafe { self.buf.drop_range(start, count) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
