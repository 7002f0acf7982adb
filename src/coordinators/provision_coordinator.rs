use std::sync::Arc;

use crate::app_data::AppData;
use crate::config::BrokerSettings;
use crate::errors::InternalError;
use crate::errors::internal::ProvisionError;
use crate::providers::authorization_provider::VERB_CREATE;
use crate::providers::{AuthorizationProvider, ensure_custom_label};
use crate::stores::{TemplateStore, TrackingRecordStore};
use crate::types::dto::provision::{ProvisionRequest, ProvisionResponse};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{
    BrokerTemplateInstance, InstancePhase, LabelSet, Labeled, Principal, ResourceVersion, Template,
    Versioned, WriteOutcome,
};

/// Number of read-modify-write attempts before giving up on a contended record
pub const MAX_PROVISION_ATTEMPTS: usize = 5;

/// Request parameter carrying the raw custom-label string
pub const CUSTOM_LABELS_PARAMETER: &str = "custom-labels";

/// Provision coordinator that orchestrates the service instance provisioning workflow
///
/// Composes the authorization gate, the label parser, the template catalog and
/// the versioned tracking record store. Holds no state between calls, so one
/// instance serves concurrent requests.
pub struct ProvisionCoordinator {
    settings: Arc<BrokerSettings>,
    template_store: Arc<TemplateStore>,
    instance_store: Arc<dyn TrackingRecordStore>,
    authorization_provider: Arc<AuthorizationProvider>,
}

impl ProvisionCoordinator {
    /// Create ProvisionCoordinator from AppData
    ///
    /// Extracts stores from AppData and creates the authorization provider
    /// over the configured access reviewer.
    pub fn new(app_data: Arc<AppData>) -> Self {
        let authorization_provider = Arc::new(AuthorizationProvider::new(
            app_data.access_reviewer.clone(),
        ));

        Self {
            settings: app_data.settings.clone(),
            template_store: app_data.template_store.clone(),
            instance_store: app_data.instance_store.clone(),
            authorization_provider,
        }
    }

    /// Orchestrate the provisioning workflow
    ///
    /// Coordinates the sequence of operations:
    /// 1. Validate the request shape
    /// 2. Look up the template named by `service_id`
    /// 3. Check the principal may create template instances in the namespace
    /// 4. Parse custom labels and apply them to the template
    /// 5. Record the instance as provisioning (bounded compare-and-swap)
    ///
    /// Steps 1-4 never touch the tracking record.
    ///
    /// # Arguments
    /// * `ctx` - Request context for log correlation
    /// * `principal` - Originating identity of the caller
    /// * `instance_id` - Service instance id from the path
    /// * `request` - Provision request body
    ///
    /// # Returns
    /// * `Ok(ProvisionResponse)` - Accepted; operation token is "provisioning"
    /// * `Err(InternalError)` - Validation, authorization, label, conflict or store failure
    pub async fn provision(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        instance_id: &str,
        request: &ProvisionRequest,
    ) -> Result<ProvisionResponse, InternalError> {
        tracing::debug!(
            request_id = %ctx.request_id,
            source = ?ctx.source,
            client_ip = ?ctx.ip_address,
            instance_id,
            namespace = request.namespace(),
            principal = %principal,
            "Provision requested"
        );

        // Step 1: Reject malformed requests
        Self::validate_request(instance_id, request)?;

        // Step 2: Resolve the template from the catalog
        let mut template = self.find_template(&request.service_id).await?;

        // Step 3: One authoritative access check; a denial is never retried
        let allowed = self
            .authorization_provider
            .check_access(principal, request.namespace(), VERB_CREATE)
            .await?;
        if !allowed {
            tracing::warn!(
                request_id = %ctx.request_id,
                principal = %principal,
                namespace = request.namespace(),
                "Provision denied by access review"
            );
            return Err(ProvisionError::AccessDenied {
                principal: principal.username.clone(),
                namespace: request.namespace().to_string(),
                verb: VERB_CREATE.to_string(),
            }
            .into());
        }

        // Step 4: Validate custom labels before any store access
        let labels = match request.parameter(CUSTOM_LABELS_PARAMETER) {
            Some(raw) => ensure_custom_label(&mut template, raw).inspect_err(|err| {
                tracing::info!(
                    request_id = %ctx.request_id,
                    instance_id,
                    "Rejected custom labels: {}",
                    err
                );
            })?,
            None => LabelSet::new(),
        };

        // Step 5: Mark the instance as provisioning
        let version = self
            .record_provisioning(ctx, principal, instance_id, request, &labels)
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            instance_id,
            template = %template.name,
            namespace = request.namespace(),
            labels = labels.len(),
            version = %version,
            "Provisioning accepted"
        );

        Ok(ProvisionResponse::provisioning())
    }

    fn validate_request(instance_id: &str, request: &ProvisionRequest) -> Result<(), InternalError> {
        if instance_id.trim().is_empty() {
            return Err(ProvisionError::invalid_request("instance_id", "must not be empty").into());
        }
        if request.service_id.trim().is_empty() {
            return Err(ProvisionError::invalid_request("service_id", "must not be empty").into());
        }
        if request.plan_id.trim().is_empty() {
            return Err(ProvisionError::invalid_request("plan_id", "must not be empty").into());
        }
        if request.namespace().trim().is_empty() {
            return Err(
                ProvisionError::invalid_request("context.namespace", "must not be empty").into(),
            );
        }
        Ok(())
    }

    async fn find_template(&self, service_id: &str) -> Result<Template, InternalError> {
        let not_found = || ProvisionError::TemplateNotFound {
            service_id: service_id.to_string(),
        };

        let template = self
            .template_store
            .get_by_uid(service_id)
            .await?
            .ok_or_else(not_found)?;

        // Only templates published in a broker namespace are provisionable
        if !self.settings.is_template_namespace(&template.namespace) {
            return Err(not_found().into());
        }

        Ok(template)
    }

    /// Bounded read-modify-write of the tracking record
    ///
    /// Each attempt re-reads the record, so a conflicting writer's changes are
    /// never overwritten. Only `WriteOutcome::Conflict` is retried.
    async fn record_provisioning(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        instance_id: &str,
        request: &ProvisionRequest,
        labels: &LabelSet,
    ) -> Result<ResourceVersion, InternalError> {
        for attempt in 1..=MAX_PROVISION_ATTEMPTS {
            let (mut record, expected) = match self.instance_store.read(instance_id).await? {
                Some(Versioned { value, version }) => {
                    if !value.matches(request.namespace(), &request.service_id, &request.plan_id) {
                        return Err(ProvisionError::InstanceConflict {
                            instance_id: instance_id.to_string(),
                        }
                        .into());
                    }
                    (value, Some(version))
                }
                None => (
                    BrokerTemplateInstance::initial(
                        instance_id,
                        request.namespace(),
                        &request.service_id,
                        &request.plan_id,
                    ),
                    None,
                ),
            };

            record.phase = InstancePhase::Provisioning;
            record.requester = principal.username.clone();
            labels.merge_into(record.labels_mut());

            match self.instance_store.write(&record, expected).await? {
                WriteOutcome::Written(version) => return Ok(version),
                WriteOutcome::Conflict => {
                    tracing::debug!(
                        request_id = %ctx.request_id,
                        instance_id,
                        attempt,
                        "Tracking record changed concurrently, retrying"
                    );
                }
            }
        }

        tracing::warn!(
            request_id = %ctx.request_id,
            instance_id,
            attempts = MAX_PROVISION_ATTEMPTS,
            "Gave up provisioning after repeated conflicts"
        );

        Err(ProvisionError::ConcurrencyExhausted {
            instance_id: instance_id.to_string(),
            attempts: MAX_PROVISION_ATTEMPTS,
        }
        .into())
    }
}
