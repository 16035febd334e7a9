use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// The claims backend answered with a non-2xx status.
    ///
    /// Fatal for the whole batch: no claims are produced.
    Transport {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Canonical reason phrase for the status (may be empty).
        status_text: String,
    },
    /// Error interacting with an external API (connection failure, unreadable body).
    ExternalApiError(String),
    /// Resource not found error.
    NotFound(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    /// Builds a transport error from a response status.
    pub fn transport(status: reqwest::StatusCode) -> Self {
        AppError::Transport {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// Status code of the underlying transport failure, if this error is one.
    ///
    /// Looks through any context wrappers.
    pub fn transport_status(&self) -> Option<u16> {
        match self {
            AppError::Transport { status, .. } => Some(*status),
            AppError::WithContext { source, .. } => source.transport_status(),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Transport {
                status,
                status_text,
            } if status_text.is_empty() => write!(f, "Failed to fetch claims: {}", status),
            AppError::Transport {
                status,
                status_text,
            } => write!(f, "Failed to fetch claims: {} {}", status, status_text),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    /// Upstream failures are logged; client errors are not.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Transport { .. } => {
                tracing::error!("{}", self);
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::ExternalApiError(msg) => {
                tracing::error!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "External service error".to_string(),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::WithContext { source, context } => {
                tracing::error!("Error with context: {} -> {}", context, source);
                // Delegate to underlying error's response
                return (**source).clone().into_response();
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApiError(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Arguments
    ///
    /// * `context` - The context message to add.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    ///
    /// # Arguments
    ///
    /// * `f` - A closure that produces the context message.
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}
