mod adhoc;
mod invalid_arguments;
mod invalid_schema;
mod metadata_unavailable;
mod record_not_found;
mod unknown_scope;

use adhoc::AdhocError;
use invalid_arguments::InvalidArgumentsError;
use invalid_schema::InvalidSchemaError;
use metadata_unavailable::MetadataUnavailableError;
use record_not_found::RecordNotFoundError;
use std::sync::Arc;
use unknown_scope::UnknownScopeError;

/// Returns early with an ad-hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while compiling or invoking a scope.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// Returns `true` if any error in the context chain matches `f`.
    fn any_kind(&self, f: impl Fn(&ErrorKind) -> bool) -> bool {
        self.chain().any(|err| f(err.kind()))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    InvalidArguments(InvalidArgumentsError),
    InvalidSchema(InvalidSchemaError),
    MetadataUnavailable(MetadataUnavailableError),
    RecordNotFound(RecordNotFoundError),
    UnknownScope(UnknownScopeError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            InvalidArguments(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            MetadataUnavailable(err) => core::fmt::Display::fmt(err, f),
            RecordNotFound(err) => core::fmt::Display::fmt(err, f),
            UnknownScope(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown autoscope error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // One pointer wide
        assert_eq!(core::mem::size_of::<usize>(), core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("bad scope: {}", "name_is"));
        assert_eq!(err.to_string(), "bad scope: name_is");
    }

    #[test]
    fn context_chain_display() {
        let err = Error::record_not_found("Player named \"zed\"")
            .context(err!("resolving argument 1"))
            .context(err!("Team.with_players"));

        assert_eq!(
            err.to_string(),
            "Team.with_players: resolving argument 1: record not found: Player named \"zed\""
        );
    }

    #[test]
    fn kind_predicates_see_through_context() {
        let err = Error::metadata_unavailable("connection refused").context(err!("Team"));
        assert!(err.is_metadata_unavailable());
        assert!(!err.is_invalid_arguments());
    }

    #[test]
    fn anyhow_bridge() {
        let err: Error = anyhow::anyhow!("driver exploded").into();
        assert_eq!(err.to_string(), "driver exploded");
    }

    #[test]
    fn invalid_arguments_display() {
        let err = Error::invalid_arguments("wrong number of arguments for `limit` (given 0, expected 1)");
        assert_eq!(
            err.to_string(),
            "invalid arguments: wrong number of arguments for `limit` (given 0, expected 1)"
        );
    }

    #[test]
    fn unknown_scope_display() {
        let err = Error::unknown_scope("Team", "colour_is");
        assert!(err.is_unknown_scope());
        assert_eq!(err.to_string(), "unknown scope `colour_is` for model `Team`");
    }
}
