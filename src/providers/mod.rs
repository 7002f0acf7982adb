// Providers layer - Work performers
//
// Providers perform the actual checks and computations that coordinators
// orchestrate. They hold no workflow knowledge of their own.

pub mod authorization_provider;
pub mod label_parser;

// Re-export providers for clean imports
pub use authorization_provider::{AccessReview, AccessReviewer, AuthorizationProvider};
pub use label_parser::{ensure_custom_label, parse_labels};
