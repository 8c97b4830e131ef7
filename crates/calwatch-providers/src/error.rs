//! Error types for event sources.

use std::fmt;
use thiserror::Error;

/// The category of a source error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// The calendar store exists but reading it was refused.
    PermissionDenied,
    /// The calendar store is missing or not reachable right now.
    Unavailable,
    /// Reading from the store failed part-way.
    Io,
    /// The store returned data that could not be decoded.
    InvalidResponse,
    /// The source was configured with unusable settings.
    ConfigurationError,
    /// Unexpected state inside the source.
    InternalError,
}

impl ProviderErrorCode {
    /// Returns true if a later query may succeed without any change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable | Self::Io)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::Unavailable => "unavailable",
            Self::Io => "io_error",
            Self::InvalidResponse => "invalid_response",
            Self::ConfigurationError => "configuration_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error raised by an [`EventSource`](crate::EventSource).
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// Name of the source that failed, e.g. `"json-file"`.
    provider: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            source: None,
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::PermissionDenied, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Unavailable, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Io, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    /// Maps an I/O failure onto the matching code.
    pub fn from_io(err: std::io::Error, message: impl Into<String>) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ProviderErrorCode::Unavailable,
            std::io::ErrorKind::PermissionDenied => ProviderErrorCode::PermissionDenied,
            _ => ProviderErrorCode::Io,
        };
        Self::new(code, message).with_source(err)
    }

    /// Sets the source name for this error.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref provider) = self.provider {
            write!(f, "[{provider}] ")?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_codes() {
        assert!(ProviderErrorCode::Unavailable.is_retryable());
        assert!(ProviderErrorCode::Io.is_retryable());
        assert!(!ProviderErrorCode::PermissionDenied.is_retryable());
        assert!(!ProviderErrorCode::InvalidResponse.is_retryable());
    }

    #[test]
    fn io_kind_maps_to_code() {
        let missing = std::io::Error::from(std::io::ErrorKind::NotFound);
        assert_eq!(
            ProviderError::from_io(missing, "no events file").code(),
            ProviderErrorCode::Unavailable
        );

        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert_eq!(
            ProviderError::from_io(denied, "no access").code(),
            ProviderErrorCode::PermissionDenied
        );

        let other = std::io::Error::other("disk gone");
        assert_eq!(ProviderError::from_io(other, "read failed").code(), ProviderErrorCode::Io);
    }

    #[test]
    fn keeps_source() {
        use std::error::Error;
        let err = ProviderError::from_io(std::io::Error::other("boom"), "read failed");
        assert!(err.source().is_some());
    }

    #[test]
    fn display_names_provider() {
        let err = ProviderError::invalid_response("expected an array").with_provider("json-file");
        insta::assert_snapshot!(err.to_string(), @"[json-file] invalid_response: expected an array");
    }
}
