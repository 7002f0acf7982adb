// Coordinators layer - Workflow orchestration
//
// Coordinators handle pure workflow orchestration by composing provider and
// store operations for specific API endpoints. They determine the sequence of
// operations without containing business logic themselves.

pub mod provision_coordinator;

// Re-export coordinators for clean imports
pub use provision_coordinator::{CUSTOM_LABELS_PARAMETER, MAX_PROVISION_ATTEMPTS, ProvisionCoordinator};
