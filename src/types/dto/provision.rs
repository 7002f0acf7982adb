use std::collections::HashMap;

use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::{Deserialize, Serialize};

/// Operation token returned while provisioning runs asynchronously
pub const OPERATION_PROVISIONING: &str = "provisioning";

/// Platform context of a provision request
#[derive(Object, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisionContext {
    /// Platform the request originates from (e.g. "kubernetes")
    #[oai(default)]
    #[serde(default)]
    pub platform: String,

    /// Namespace the service instance is provisioned into
    pub namespace: String,
}

/// Request model for service instance provisioning
#[derive(Object, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisionRequest {
    /// Catalog service id; the uid of the template to instantiate
    pub service_id: String,

    /// Catalog plan id
    pub plan_id: String,

    /// Platform context, carrying the target namespace
    pub context: ProvisionContext,

    /// Free-form template parameters
    #[serde(default)]
    pub parameters: Option<HashMap<String, String>>,
}

impl ProvisionRequest {
    pub fn namespace(&self) -> &str {
        &self.context.namespace
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }
}

/// Response model for accepted asynchronous provisioning
#[derive(Object, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionResponse {
    /// Operation token to poll with
    pub operation: String,
}

impl ProvisionResponse {
    pub fn provisioning() -> Self {
        Self {
            operation: OPERATION_PROVISIONING.to_string(),
        }
    }
}

/// API response for provision endpoint
#[derive(ApiResponse)]
pub enum ProvisionApiResponse {
    /// Provisioning accepted and in progress
    #[oai(status = 202)]
    Accepted(Json<ProvisionResponse>),
}
