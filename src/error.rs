//! Error types for the Sage Pay client
//!
//! A decoded response with a failed status is not an error; errors cover
//! bad configuration, invalid registrations, gated attribute reads and
//! transport failures.

use thiserror::Error;

/// The main error type for the Sage Pay client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Gateway configuration error: {message}")]
    Config { message: String },

    #[error("Invalid gateway setting '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Malformed YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Malformed JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Registration Errors
    // ============================================================================
    #[error("Registration is missing '{field}'")]
    MissingRegistrationField { field: String },

    #[error("Registration field '{field}' is invalid: {message}")]
    InvalidRegistrationValue { field: String, message: String },

    // ============================================================================
    // Response Access Errors
    // ============================================================================
    #[error("Unable to retrieve {attribute} as the status was {status} (not OK)")]
    AccessDenied { attribute: String, status: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway replied HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Gateway did not reply within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Gateway unreachable after {max_retries} retries")]
    MaxRetriesExceeded { max_retries: u32 },

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Unreadable response body: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_registration_field(field: impl Into<String>) -> Self {
        Self::MissingRegistrationField {
            field: field.into(),
        }
    }

    pub fn invalid_registration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRegistrationValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Denied read of a gated response attribute
    pub fn access_denied(attribute: impl Into<String>, status: impl Into<String>) -> Self {
        Self::AccessDenied {
            attribute: attribute.into(),
            status: status.into(),
        }
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether a gated attribute was read on a response that is not OK
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Error::AccessDenied { .. })
    }

    /// Whether the failure happened between client and gateway
    ///
    /// The gateway may have registered the transaction already when this is
    /// true for anything but [`Error::MaxRetriesExceeded`], so resubmitting
    /// needs a fresh vendor tx code.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::Timeout { .. }
                | Error::MaxRetriesExceeded { .. }
        )
    }
}

/// Result type alias for the Sage Pay client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context built lazily
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.with_context(|| message.into())
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", f(), e.into())))
    }
}
