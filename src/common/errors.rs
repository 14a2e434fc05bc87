//! Error types for the application

use thiserror::Error;

use super::i18n::{Label, Locale};

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for planner and comparison operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport errors (connect, TLS, reset)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Non-2xx response without a structured error field
    #[error("HTTP {status} {body}")]
    HttpStatus { status: u16, body: String },

    /// Structured `error` field returned by the planning service
    #[error("{0}")]
    Planner(String),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// User input rejected before any request was issued
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout errors
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Text shown to the user in the error panel.
    ///
    /// Structured planner errors and HTTP failures are surfaced verbatim,
    /// malformed bodies collapse to a generic parse-failure message and
    /// validation errors are localized.
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            ClientError::Planner(msg) => msg.clone(),
            ClientError::HttpStatus { status, body } => {
                format!("HTTP {} {}", status, body).trim_end().to_string()
            }
            ClientError::HttpRequest(e) => e.to_string(),
            ClientError::JsonParse(_) => locale.label(Label::ErrParse).to_string(),
            ClientError::Validation(v) => v.localized(locale).to_string(),
            other => other.to_string(),
        }
    }
}

/// Input rejected by client-side validation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be a positive number")]
    BadAmount,
    #[error("base and quote must be different")]
    SameAssets,
    #[error("asset code is required")]
    MissingAsset,
}

impl ValidationError {
    /// Localized message for the presentation layer
    pub fn localized(&self, locale: Locale) -> &'static str {
        match self {
            ValidationError::BadAmount => locale.label(Label::ErrBadAmount),
            ValidationError::SameAssets => locale.label(Label::ErrSameAssets),
            ValidationError::MissingAsset => locale.label(Label::ErrMissingAsset),
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planner_error_is_verbatim() {
        let err = ClientError::Planner("no order books".to_string());
        assert_eq!(err.user_message(Locale::En), "no order books");
        assert_eq!(err.user_message(Locale::Ru), "no order books");
    }

    #[test]
    fn test_status_error_without_body() {
        let err = ClientError::HttpStatus {
            status: 502,
            body: String::new(),
        };
        assert_eq!(err.user_message(Locale::En), "HTTP 502");
    }

    #[test]
    fn test_parse_error_is_generic() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = ClientError::from(json_err);
        assert_eq!(
            err.user_message(Locale::En),
            Locale::En.label(Label::ErrParse)
        );
    }

    #[test]
    fn test_validation_is_localized() {
        let err = ClientError::from(ValidationError::SameAssets);
        assert_ne!(err.user_message(Locale::En), err.user_message(Locale::Ru));
    }
}
