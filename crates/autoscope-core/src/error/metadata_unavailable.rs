use super::Error;

/// Error when the metadata provider cannot describe a model.
///
/// Typically the storage connection used for schema introspection is
/// unreachable. Scope compilation treats this as "no automatic scope" rather
/// than a hard failure.
#[derive(Debug)]
pub(super) struct MetadataUnavailableError {
    message: Box<str>,
}

impl std::error::Error for MetadataUnavailableError {}

impl core::fmt::Display for MetadataUnavailableError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "metadata unavailable: {}", self.message)
    }
}

impl Error {
    /// Creates a metadata unavailable error.
    pub fn metadata_unavailable(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MetadataUnavailable(
            MetadataUnavailableError {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a metadata unavailable error.
    pub fn is_metadata_unavailable(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MetadataUnavailable(_)))
    }
}
