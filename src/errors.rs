use std::fmt;

/// Errors surfaced by the client.
///
/// Nothing in this crate recovers from an error; every variant propagates to
/// the caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Missing or invalid client configuration (API key, base URL).
    Configuration(String),
    /// A required request field was read before being set.
    MissingArgument(String),
    /// The API answered with a non-success status.
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The request could not be sent or its body could not be read.
    Transport(String),
    /// A JSON value could not be decoded into the expected type.
    Deserialization(String),
    /// The response carried no value where one was expected.
    NullResult(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<ApiError>,
        /// Additional context message.
        context: String,
    },
}

impl ApiError {
    /// HTTP status of the innermost error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::WithContext { source, .. } => source.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Strips any context layers and returns the originating error.
    pub fn root(&self) -> &ApiError {
        match self {
            ApiError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::MissingArgument(field) => {
                write!(f, "Missing required argument: {}", field)
            }
            ApiError::Http { status, body } => write!(f, "HTTP error {}: {}", status, body),
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Deserialization(msg) => write!(f, "Deserialization error: {}", msg),
            ApiError::NullResult(msg) => write!(f, "Null result: {}", msg),
            ApiError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::WithContext { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Deserialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `ApiError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, ApiError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, ApiError> {
    fn context(self, context: impl Into<String>) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ApiError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_carries_status_and_body() {
        let err = ApiError::Http {
            status: 404,
            body: "{\"message\":\"not found\"}".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404: {\"message\":\"not found\"}");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_context_preserves_status() {
        let result: Result<(), ApiError> = Err(ApiError::Http {
            status: 500,
            body: String::new(),
        });
        let err = result.context("retrieving company").unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().starts_with("retrieving company: "));
        assert!(matches!(err.root(), ApiError::Http { status: 500, .. }));
    }

    #[test]
    fn test_with_context_is_lazy() {
        let ok: Result<u8, ApiError> = Ok(1);
        let value = ok
            .with_context(|| panic!("context must not be built on success"))
            .unwrap();
        assert_eq!(value, 1);
    }

    #[test]
    fn test_missing_argument_names_field() {
        let err = ApiError::MissingArgument("workspace_id".to_string());
        assert_eq!(err.to_string(), "Missing required argument: workspace_id");
        assert_eq!(err.status(), None);
    }
}
