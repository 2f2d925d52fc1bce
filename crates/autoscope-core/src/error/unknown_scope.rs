use super::Error;

/// Error when a scope name matches no automatic scope pattern.
#[derive(Debug)]
pub(super) struct UnknownScopeError {
    model: Box<str>,
    scope: Box<str>,
}

impl std::error::Error for UnknownScopeError {}

impl core::fmt::Display for UnknownScopeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown scope `{}` for model `{}`", self.scope, self.model)
    }
}

impl Error {
    /// Creates an unknown scope error.
    pub fn unknown_scope(model: impl Into<String>, scope: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownScope(UnknownScopeError {
            model: model.into().into(),
            scope: scope.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown scope error.
    pub fn is_unknown_scope(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownScope(_)))
    }
}
