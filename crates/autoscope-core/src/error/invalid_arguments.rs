use super::Error;

/// Error when a compiled scope is invoked with arguments it cannot use.
///
/// This occurs when:
/// - The argument count does not match the scope's arity
/// - An argument has the wrong type (e.g. a list where a string is expected)
/// - A dynamically referenced association, field or direction does not exist
#[derive(Debug)]
pub(super) struct InvalidArgumentsError {
    message: Box<str>,
}

impl std::error::Error for InvalidArgumentsError {}

impl core::fmt::Display for InvalidArgumentsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid arguments: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidArguments(InvalidArgumentsError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid arguments error.
    pub fn is_invalid_arguments(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidArguments(_)))
    }
}
