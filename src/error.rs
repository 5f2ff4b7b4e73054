use core::fmt;

/// Which argument of a map operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentRole {
    /// The key passed to the operation.
    Key,
    /// The value passed to the operation.
    Value,
}

impl fmt::Display for ArgumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("key"),
            Self::Value => f.write_str("value"),
        }
    }
}

/// Errors returned by [`AdaptiveMap`] and the snapshot types it hands out.
///
/// Neither variant is a recoverable runtime condition: both describe a caller mistake. Lookups that
/// simply find nothing are reported through `Option`/`bool` return values instead.
///
/// [`AdaptiveMap`]: crate::AdaptiveMap
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A key or value for which [`AbsenceMarker::is_absent`] returned `true` was passed in.
    ///
    /// [`AbsenceMarker::is_absent`]: crate::AbsenceMarker::is_absent
    #[error("this map does not accept absent {role}s")]
    InvalidArgument {
        /// The rejected argument.
        role: ArgumentRole,
    },

    /// A mutation was attempted on a read-only snapshot.
    #[error("`{operation}` is not supported on an immutable entry")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

impl Error {
    #[inline]
    pub(crate) fn absent_key() -> Self {
        Self::InvalidArgument {
            role: ArgumentRole::Key,
        }
    }

    #[inline]
    pub(crate) fn absent_value() -> Self {
        Self::InvalidArgument {
            role: ArgumentRole::Value,
        }
    }
}
