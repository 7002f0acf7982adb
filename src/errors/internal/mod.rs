use thiserror::Error;

pub mod authorization;
pub mod database;
pub mod label;
pub mod provision;

pub use authorization::AuthorizationError;
pub use database::DatabaseError;
pub use label::LabelError;
pub use provision::ProvisionError;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors (database, parse) are shared; domain errors are
/// grouped per concern. Not exposed via API - endpoints must convert to
/// BrokerError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn parse(value_type: &str, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.to_string(),
            message: message.into(),
        }
    }
}
