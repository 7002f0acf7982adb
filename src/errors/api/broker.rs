use crate::errors::internal::{InternalError, LabelError, ProvisionError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Error body in the broker API format
#[derive(Object, Debug, Clone)]
pub struct BrokerErrorResponse {
    /// Machine-readable error code
    pub error: String,

    /// Human-readable error description
    pub description: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Broker operation error types
#[derive(ApiResponse, Debug)]
pub enum BrokerError {
    /// Malformed request, unknown template or unreadable identity
    #[oai(status = 400)]
    BadRequest(Json<BrokerErrorResponse>),

    /// Caller may not provision in the target namespace
    #[oai(status = 403)]
    Forbidden(Json<BrokerErrorResponse>),

    /// Service instance exists with different parameters
    #[oai(status = 409)]
    Conflict(Json<BrokerErrorResponse>),

    /// Tracking record could not be updated under contention
    #[oai(status = 422)]
    ConcurrencyError(Json<BrokerErrorResponse>),

    /// Custom label parameter failed validation
    #[oai(status = 422)]
    InvalidCustomLabelParameter(Json<BrokerErrorResponse>),

    /// Client did not accept asynchronous provisioning
    #[oai(status = 422)]
    AsyncRequired(Json<BrokerErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<BrokerErrorResponse>),
}

impl BrokerError {
    fn body(error: &str, description: impl Into<String>, status_code: u16) -> Json<BrokerErrorResponse> {
        Json(BrokerErrorResponse {
            error: error.to_string(),
            description: description.into(),
            status_code,
        })
    }

    /// Create a BadRequest error
    pub fn bad_request(description: impl Into<String>) -> Self {
        BrokerError::BadRequest(Self::body("BadRequest", description, 400))
    }

    /// Create a Forbidden error
    pub fn forbidden(description: impl Into<String>) -> Self {
        BrokerError::Forbidden(Self::body("Forbidden", description, 403))
    }

    /// Create a Conflict error
    pub fn conflict(description: impl Into<String>) -> Self {
        BrokerError::Conflict(Self::body("Conflict", description, 409))
    }

    /// Create the ConcurrencyError returned after exhausting provision retries
    pub fn concurrency_error() -> Self {
        BrokerError::ConcurrencyError(Self::body(
            "ConcurrencyError",
            "Another operation for this service instance is in progress",
            422,
        ))
    }

    /// Create an InvalidCustomLabelParameter error carrying the parser message
    pub fn invalid_custom_label_parameter(err: &LabelError) -> Self {
        BrokerError::InvalidCustomLabelParameter(Self::body(
            "InvalidCustomLabelParameter",
            err.message(),
            422,
        ))
    }

    /// Create an AsyncRequired error
    pub fn async_required() -> Self {
        BrokerError::AsyncRequired(Self::body(
            "AsyncRequired",
            "This service plan requires client support for asynchronous service operations",
            422,
        ))
    }

    /// Convert InternalError to BrokerError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Infrastructure error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Label(label_err) => Self::invalid_custom_label_parameter(label_err),

            InternalError::Provision(ProvisionError::ConcurrencyExhausted { .. }) => {
                Self::concurrency_error()
            }
            InternalError::Provision(ProvisionError::AccessDenied { .. }) => {
                Self::forbidden(err.to_string())
            }
            InternalError::Provision(ProvisionError::InstanceConflict { .. }) => {
                Self::conflict(err.to_string())
            }
            InternalError::Provision(ProvisionError::TemplateNotFound { .. })
            | InternalError::Provision(ProvisionError::InvalidRequest { .. }) => {
                Self::bad_request(err.to_string())
            }

            InternalError::Database(_) => {
                tracing::error!("Store error in broker operation: {}", err);
                Self::internal_server_error()
            }
            InternalError::Authorization(_) => {
                tracing::error!("Authorization oracle error: {}", err);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
        }
    }

    /// Generic internal server error that never exposes internal details
    fn internal_server_error() -> Self {
        BrokerError::InternalError(Self::body(
            "InternalError",
            "An internal error occurred",
            500,
        ))
    }

    fn response(&self) -> &BrokerErrorResponse {
        match self {
            BrokerError::BadRequest(json)
            | BrokerError::Forbidden(json)
            | BrokerError::Conflict(json)
            | BrokerError::ConcurrencyError(json)
            | BrokerError::InvalidCustomLabelParameter(json)
            | BrokerError::AsyncRequired(json)
            | BrokerError::InternalError(json) => &json.0,
        }
    }

    /// Get the error code from the error variant
    pub fn error_code(&self) -> &str {
        &self.response().error
    }

    /// Get the error description from the error variant
    pub fn message(&self) -> &str {
        &self.response().description
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }
}

impl From<InternalError> for BrokerError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for BrokerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
