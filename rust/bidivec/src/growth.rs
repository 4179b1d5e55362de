//! Capacity policy for the double-ended buffer.
//!
//! A reallocation sizes the new buffer at `max(len, requested) + len` slots and
//! places the live range a quarter of the way in, which leaves slack on both
//! sides:
//!
//! ```text
//! [ slack ~ cap/4 | live ~ cap/2 | slack ~ cap/4 ]
//! ```
//!
//! Both `push_front` and `push_back` can then run without reallocating until
//! their side's slack is used up, so both ends get amortized O(1) growth.

use crate::{error::Error, result::Result};

/// The largest number of `T` values a buffer can hold: the number of elements
/// whose total size in bytes fits the platform's signed difference range.
///
/// Zero-sized types are counted as if they occupied one byte.
#[inline]
pub const fn max_size<T>() -> usize {
    let elem_size = std::mem::size_of::<T>();
    let elem_size = if elem_size == 0 { 1 } else { elem_size };
    isize::MAX as usize / elem_size
}

/// The size of a new allocation and the offset at which the live range starts
/// inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub capacity: usize,
    pub head: usize,
}

impl Placement {
    /// Placement for a reallocation that must leave room for `requested` more
    /// elements behind (or around) the `len` live ones.
    ///
    /// The head sits at a quarter of the new capacity, pulled back when the
    /// capacity was clamped to `max_size` and a quarter would not leave room for
    /// the requested slots.
    pub fn for_growth(len: usize, requested: usize, max_size: usize) -> Result<Placement> {
        let capacity = grown_capacity(len, requested, max_size)?;
        let head = (capacity / 4).min(capacity - len - requested);
        Ok(Placement { capacity, head })
    }

    /// Placement for a reallocation that must leave at least `requested` free
    /// slots in front of the live range.
    pub fn for_front_growth(len: usize, requested: usize, max_size: usize) -> Result<Placement> {
        let capacity = grown_capacity(len, requested, max_size)?;
        let head = (capacity / 4).max(requested).min(capacity - len);
        Ok(Placement { capacity, head })
    }

    /// Placement holding exactly `len` elements with no slack.
    pub fn exact(len: usize) -> Placement {
        Placement {
            capacity: len,
            head: 0,
        }
    }

    /// Number of free slots behind a live range of `len` elements.
    #[inline]
    pub fn back_slack(&self, len: usize) -> usize {
        self.capacity - self.head - len
    }
}

/// Computes `max(len, requested) + len`, capped at `max_size`.
///
/// Fails with `LengthExceeded` when `len + requested` itself does not fit.
pub fn grown_capacity(len: usize, requested: usize, max_size: usize) -> Result<usize> {
    let needed = match len.checked_add(requested) {
        Some(needed) if needed <= max_size => needed,
        _ => {
            let requested_len = len.saturating_add(requested);
            log::debug!("growth to {requested_len} elements rejected, max_size is {max_size}");
            return Err(Error::length_exceeded(requested_len, max_size));
        }
    };
    let capacity = len.max(requested).saturating_add(len).min(max_size);
    debug_assert!(capacity >= needed);
    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_doubles_live_range() {
        assert_eq!(grown_capacity(0, 1, usize::MAX).unwrap(), 1);
        assert_eq!(grown_capacity(1, 1, usize::MAX).unwrap(), 2);
        assert_eq!(grown_capacity(10, 1, usize::MAX).unwrap(), 20);
        assert_eq!(grown_capacity(10, 25, usize::MAX).unwrap(), 35);
    }

    #[test]
    fn test_capacity_clamped_to_max_size() {
        assert_eq!(grown_capacity(60, 1, 100).unwrap(), 100);
        assert_eq!(grown_capacity(99, 1, 100).unwrap(), 100);
        let err = grown_capacity(100, 1, 100).unwrap_err();
        assert!(err.is_length_exceeded());
        let err = grown_capacity(usize::MAX, 1, usize::MAX).unwrap_err();
        assert!(err.is_length_exceeded());
    }

    #[test]
    fn test_quartered_placement() {
        let p = Placement::for_growth(8, 1, usize::MAX).unwrap();
        assert_eq!(p, Placement { capacity: 16, head: 4 });
        assert_eq!(p.back_slack(9), 3);

        let p = Placement::for_growth(1, 1, usize::MAX).unwrap();
        assert_eq!(p, Placement { capacity: 2, head: 0 });

        let p = Placement::for_growth(0, 1, usize::MAX).unwrap();
        assert_eq!(p, Placement { capacity: 1, head: 0 });
    }

    #[test]
    fn test_clamped_placement_keeps_requested_room() {
        let p = Placement::for_growth(98, 2, 100).unwrap();
        assert_eq!(p, Placement { capacity: 100, head: 0 });

        let p = Placement::for_growth(90, 1, 100).unwrap();
        assert_eq!(p.capacity, 100);
        assert_eq!(p.head, 9);
        assert!(p.back_slack(90) >= 1);
    }

    #[test]
    fn test_front_placement() {
        let p = Placement::for_front_growth(4, 10, usize::MAX).unwrap();
        assert_eq!(p.capacity, 14);
        assert_eq!(p.head, 10);

        let p = Placement::for_front_growth(16, 1, usize::MAX).unwrap();
        assert_eq!(p, Placement { capacity: 32, head: 8 });
    }

    #[test]
    fn test_max_size() {
        assert_eq!(max_size::<u8>(), isize::MAX as usize);
        assert_eq!(max_size::<u64>(), isize::MAX as usize / 8);
        assert_eq!(max_size::<()>(), isize::MAX as usize);
    }
}
