//! `BidiVec<T>`: a contiguous, growable, random-access sequence with amortized
//! O(1) insertion and removal at both ends.
//!
//! Unlike `Vec<T>`, which only has spare room at its back, a `BidiVec` keeps
//! uninitialized slack on both sides of its live elements. Unlike
//! `VecDeque<T>`, the elements never wrap around the allocation, so the whole
//! sequence is always one contiguous slice.
//!
//! The crate is the storage engine only. Ordering semantics, such as a binary
//! heap, belong to adapters layered on top (see the `bidivec-heap` crate).

pub mod bidi_vec;
pub mod cursor;
pub mod error;
pub mod growth;
pub mod iter;
pub mod result;

mod raw;

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(test)]
mod tests;

pub use bidi_vec::BidiVec;
pub use cursor::{Cursor, CursorMut};
pub use error::{Error, ErrorKind};
pub use iter::IntoIter;
pub use result::Result;

/// Creates a [`BidiVec`] containing the arguments, like `vec!`.
///
/// ```
/// use bidivec::bidivec;
///
/// let v = bidivec![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
/// let zeros = bidivec![0u8; 4];
/// assert_eq!(zeros.len(), 4);
/// assert_eq!(zeros.capacity(), 4);
/// ```
#[macro_export]
macro_rules! bidivec {
    () => {
        $crate::BidiVec::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::BidiVec::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::BidiVec::from([$($x),+])
    };
}
