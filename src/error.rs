//! Unified error hierarchy for racepace
//!
//! Every core operation fails synchronously with a typed error. Nothing here is
//! transient, so nothing is retried: malformed text and out-of-domain numbers are
//! reported straight back to the caller.

use thiserror::Error;

/// Top-level error type for all racepace operations
#[derive(Debug, Error)]
pub enum RacePaceError {
    /// Malformed duration text
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Non-positive distance, time, vdot, percentage or run length
    #[error("Invalid input for {calculation}: {parameter}={value}")]
    InvalidInput {
        calculation: String,
        parameter: String,
        value: String,
    },

    /// Record lookup failed at the workout store boundary
    #[error("Record not found: {resource}.{id}")]
    NotFound { resource: String, id: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Duration text parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Neither `H:MM:SS` nor `M:SS`
    #[error("expected H:MM:SS or M:SS, got {input:?}")]
    FieldCount { input: String },

    /// A field contains something other than one or two ASCII digits
    #[error("non-numeric {field} field in {input:?}")]
    NonNumeric { input: String, field: &'static str },

    /// A field is outside its range for the matched format
    #[error("{field} value {value} out of range 0-{max} in {input:?}")]
    OutOfRange {
        input: String,
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// The value does not fit in a second count
    #[error("{input:?} is too long to represent")]
    Overflow { input: String },

    /// Rejected by the request-layer shape check before parsing
    #[error("{input:?} does not look like a time value")]
    Shape { input: String },
}

/// Result type alias for racepace operations
pub type Result<T> = std::result::Result<T, RacePaceError>;

impl RacePaceError {
    /// Shorthand for building an [`RacePaceError::InvalidInput`]
    pub fn invalid_input(
        calculation: impl Into<String>,
        parameter: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        RacePaceError::InvalidInput {
            calculation: calculation.into(),
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RacePaceError::Parse(_) => ErrorSeverity::Warning,
            RacePaceError::InvalidInput { .. } => ErrorSeverity::Warning,
            RacePaceError::NotFound { .. } => ErrorSeverity::Warning,
            RacePaceError::Configuration(_) => ErrorSeverity::Error,
            RacePaceError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RacePaceError::Parse(ParseError::OutOfRange { input, .. }) => {
                format!(
                    "Could not read {:?} as a time. Use M:SS below one hour and H:MM:SS above it.",
                    input
                )
            }
            RacePaceError::Parse(err) => format!("Could not read time value: {}", err),
            RacePaceError::InvalidInput {
                calculation,
                parameter,
                value,
            } => {
                format!(
                    "Cannot calculate {} with {} = {}. Please provide a positive value.",
                    calculation, parameter, value
                )
            }
            RacePaceError::NotFound { resource, id } => {
                format!("No {} with id {} exists.", resource, id)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation but system can continue
    Error,
    /// Bad user input; the request can be corrected and resubmitted
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
