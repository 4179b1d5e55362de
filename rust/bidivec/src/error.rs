use thiserror::Error;

/// Error returned by the fallible `BidiVec` operations.
///
/// The kind is boxed so that `Result<T, Error>` stays a single word wider
/// than `T` on the hot paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn length_exceeded(requested: usize, max_size: usize) -> Error {
        Error(
            ErrorKind::LengthExceeded {
                requested,
                max_size,
            }
            .into(),
        )
    }

    pub fn out_of_range(index: usize, len: usize) -> Error {
        Error(ErrorKind::OutOfRange { index, len }.into())
    }

    /// Returns `true` if this error was caused by a growth request beyond
    /// [`max_size`](crate::BidiVec::max_size).
    pub fn is_length_exceeded(&self) -> bool {
        matches!(self.kind(), ErrorKind::LengthExceeded { .. })
    }

    /// Returns `true` if this error was caused by an index outside the live range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested element count does not fit the addressable range.
    #[error("requested length {requested} exceeds max_size {max_size}")]
    LengthExceeded { requested: usize, max_size: usize },

    /// Checked access beyond `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
