use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Header, Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::helpers::parse_originating_identity;
use crate::coordinators::ProvisionCoordinator;
use crate::errors::BrokerError;
use crate::types::dto::provision::{ProvisionApiResponse, ProvisionRequest};
use crate::types::internal::context::RequestContext;

/// Open Service Broker API endpoints
pub struct BrokerApi {
    provision_coordinator: Arc<ProvisionCoordinator>,
}

impl BrokerApi {
    /// Create a new BrokerApi with the given ProvisionCoordinator
    pub fn new(provision_coordinator: Arc<ProvisionCoordinator>) -> Self {
        Self {
            provision_coordinator,
        }
    }
}

/// API tags for broker endpoints
#[derive(Tags)]
enum BrokerTags {
    /// Service instance lifecycle
    ServiceInstances,
}

#[OpenApi(prefix_path = "/v2")]
impl BrokerApi {
    /// Provision a service instance from a template
    ///
    /// Provisioning is always asynchronous; callers must send
    /// `accepts_incomplete=true` and poll with the returned operation.
    #[oai(
        path = "/service_instances/:instance_id",
        method = "put",
        tag = "BrokerTags::ServiceInstances"
    )]
    async fn provision(
        &self,
        req: &Request,
        instance_id: Path<String>,
        accepts_incomplete: Query<Option<bool>>,
        #[oai(name = "X-Broker-API-Originating-Identity")] originating_identity: Header<String>,
        body: Json<ProvisionRequest>,
    ) -> Result<ProvisionApiResponse, BrokerError> {
        if accepts_incomplete.0 != Some(true) {
            return Err(BrokerError::async_required());
        }

        let principal = parse_originating_identity(&originating_identity.0)?;
        let ctx = RequestContext::for_api(req, &principal.username);

        let response = self
            .provision_coordinator
            .provision(&ctx, &principal, &instance_id.0, &body.0)
            .await
            .map_err(BrokerError::from_internal_error)?;

        Ok(ProvisionApiResponse::Accepted(Json(response)))
    }
}
