use std::collections::TryReserveError;
use std::fmt;

/// Errors reported by the fallible operations of a [`List`](crate::List).
///
/// None of them leave the list in a modified state: the operation that
/// returned the error had no effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A new node was needed but the allocation failed.
    Alloc(TryReserveError),
    /// The position does not refer to a node of the list.
    DetachedPosition,
    /// The position refers to a sentinel where an element was expected.
    SentinelPosition,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Alloc(_) => f.write_str("memory allocation failure"),
            Error::DetachedPosition => f.write_str("position is detached from the list"),
            Error::SentinelPosition => f.write_str("position refers to a sentinel"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Alloc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::Alloc(err)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::error::Error as _;

    #[test]
    fn error_display() {
        assert_eq!(
            Error::DetachedPosition.to_string(),
            "position is detached from the list"
        );
        assert_eq!(
            Error::SentinelPosition.to_string(),
            "position refers to a sentinel"
        );
        assert!(Error::SentinelPosition.source().is_none());
    }

    #[test]
    fn error_alloc_source() {
        let err = Vec::<u64>::new().try_reserve(usize::MAX).unwrap_err();
        let err = Error::from(err);
        assert_eq!(err.to_string(), "memory allocation failure");
        assert!(err.source().is_some());
    }
}
