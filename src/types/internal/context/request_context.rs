use std::net::IpAddr;

use poem::Request;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Contains contextual information about the current request that is needed
/// for logging and tracing across API, coordinator and store layers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create a bare system context, mostly useful in tests
    pub fn new() -> Self {
        Self::for_system("unspecified")
    }

    /// Create a RequestContext for CLI operations
    ///
    /// # Arguments
    /// * `command_name` - Name of the CLI command being executed
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create a RequestContext for system operations
    ///
    /// # Arguments
    /// * `operation_name` - Name of the system operation being executed
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            source: RequestSource::System,
            actor_id: format!("system:{}", operation_name),
        }
    }

    /// Create a RequestContext for an API request made on behalf of `actor`
    pub fn for_api(req: &Request, actor: &str) -> Self {
        Self {
            ip_address: Self::extract_ip_address(req),
            request_id: RequestId::new(),
            source: RequestSource::API,
            actor_id: format!("user:{}", actor),
        }
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        // Fall back to remote address
        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
