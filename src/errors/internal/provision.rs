use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Invalid provision request: {field} {reason}")]
    InvalidRequest { field: String, reason: String },

    #[error("Template not found: {service_id}")]
    TemplateNotFound { service_id: String },

    #[error("Access denied: {principal} may not {verb} in namespace {namespace}")]
    AccessDenied {
        principal: String,
        namespace: String,
        verb: String,
    },

    #[error("Service instance {instance_id} already exists with different parameters")]
    InstanceConflict { instance_id: String },

    #[error("Gave up provisioning {instance_id} after {attempts} conflicting writes")]
    ConcurrencyExhausted { instance_id: String, attempts: usize },
}

impl ProvisionError {
    pub fn invalid_request(field: &str, reason: &str) -> Self {
        ProvisionError::InvalidRequest {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
