// Stores layer - Data access and repository pattern
pub mod broker_template_instance_store;
pub mod grant_store;
pub mod template_store;

pub use broker_template_instance_store::{BrokerTemplateInstanceStore, TrackingRecordStore};
pub use grant_store::GrantStore;
pub use template_store::TemplateStore;

use std::collections::BTreeMap;

use crate::errors::InternalError;

/// Serialize a label map for a JSON text column
pub(crate) fn encode_labels(labels: &BTreeMap<String, String>) -> Result<String, InternalError> {
    serde_json::to_string(labels).map_err(|e| InternalError::parse("labels", e.to_string()))
}

/// Deserialize a label map from a JSON text column
pub(crate) fn decode_labels(raw: &str) -> Result<BTreeMap<String, String>, InternalError> {
    serde_json::from_str(raw).map_err(|e| InternalError::parse("labels", e.to_string()))
}
