use thiserror::Error;

/// Error raised on misuse of the range and zip APIs.
///
/// The documented range/zip contract never fails: exhausted sources and
/// out-of-range lookups resolve to `None`. This type only covers invalid
/// arguments and the guard rails of the checked (`try_*`) paths.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn limit_exceeded(what: impl Into<String>, limit: u64, actual: u64) -> Error {
        Error(
            ErrorKind::LimitExceeded {
                what: what.into(),
                limit,
                actual,
            }
            .into(),
        )
    }

    /// Returns `true` if this error was produced by a derivation limit check.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self.kind(), ErrorKind::LimitExceeded { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    /// `actual` is a lower bound when the check stopped early (e.g. an iterator
    /// source is cut off at `limit + 1` items).
    #[error("{what} exceeds the configured limit: {actual} > {limit}")]
    LimitExceeded {
        what: String,
        limit: u64,
        actual: u64,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
