use derive_more::From;

pub type TryPutResult<T> = core::result::Result<(), TryPutError<T>>;

/// Returned by [`BlockingQueue::try_put`](super::BlockingQueue::try_put)
/// when the element could not be queued without blocking.
///
/// The rejected element is handed back to the caller.
#[derive(From, Debug, Clone, PartialEq, Eq)]
pub enum TryPutError<T> {
    Full(T),
}

impl<T> TryPutError<T> {
    /// Recovers the element that could not be queued.
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(item) => item,
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }
}

impl<T: core::fmt::Debug> core::error::Error for TryPutError<T> {}

impl<T> core::fmt::Display for TryPutError<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full(_) => write!(f, "TryPutError::Full(queue is at capacity)"),
        }
    }
}
