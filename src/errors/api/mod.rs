// API-facing error types
pub mod broker;

// Re-exports for convenience
pub use broker::{BrokerError, BrokerErrorResponse};
