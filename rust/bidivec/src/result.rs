pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[inline]
pub fn verify_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        out_of_range(index, len)
    }
}

#[inline]
pub fn verify_position(position: usize, len: usize) -> Result<()> {
    if position <= len {
        Ok(())
    } else {
        out_of_range(position, len)
    }
}

#[cold]
pub fn out_of_range<T>(index: usize, len: usize) -> Result<T> {
    Err(crate::error::Error::out_of_range(index, len))
}

/// Panics with the error's message.
///
/// Used by the infallible front-ends (`push_back`, `insert`, ...), which treat
/// a failed growth request the same way `Vec` treats a capacity overflow.
#[cold]
#[track_caller]
pub fn fail(err: crate::error::Error) -> ! {
    panic!("{err}")
}
