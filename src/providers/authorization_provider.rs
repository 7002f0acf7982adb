use std::sync::Arc;

use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::types::internal::Principal;

/// Verb checked before provisioning
pub const VERB_CREATE: &str = "create";

/// Resource kind provisioning creates in the target namespace
pub const RESOURCE_TEMPLATE_INSTANCES: &str = "templateinstances";

/// A single capability question put to the authorization oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessReview {
    pub principal: Principal,
    pub namespace: String,
    pub verb: String,
    pub resource: String,
}

/// Authorization oracle
///
/// `Ok(false)` is an authoritative denial. `Err` means the oracle could not
/// answer and must never be read as a denial.
#[async_trait::async_trait]
pub trait AccessReviewer: Send + Sync {
    async fn review(&self, review: &AccessReview) -> Result<bool, InternalError>;
}

/// Gate in front of every provision: one uncached oracle call per check
pub struct AuthorizationProvider {
    reviewer: Arc<dyn AccessReviewer>,
}

impl AuthorizationProvider {
    pub fn new(reviewer: Arc<dyn AccessReviewer>) -> Self {
        Self { reviewer }
    }

    /// Ask the oracle whether `principal` may `verb` template instances in `namespace`
    ///
    /// # Returns
    /// * `Ok(true)` / `Ok(false)` - The oracle's answer
    /// * `Err(InternalError::Authorization)` - The oracle itself failed
    pub async fn check_access(
        &self,
        principal: &Principal,
        namespace: &str,
        verb: &str,
    ) -> Result<bool, InternalError> {
        let review = AccessReview {
            principal: principal.clone(),
            namespace: namespace.to_string(),
            verb: verb.to_string(),
            resource: RESOURCE_TEMPLATE_INSTANCES.to_string(),
        };

        match self.reviewer.review(&review).await {
            Ok(allowed) => {
                tracing::debug!(
                    principal = %principal,
                    namespace,
                    verb,
                    allowed,
                    "Access review completed"
                );
                Ok(allowed)
            }
            Err(source) => Err(AuthorizationError::ReviewFailed {
                namespace: namespace.to_string(),
                verb: verb.to_string(),
                source: Box::new(source),
            }
            .into()),
        }
    }
}
