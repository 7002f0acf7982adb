use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::label_set::Labeled;

/// Opaque version token handed out by the tracking record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceVersion(pub i64);

impl ResourceVersion {
    pub fn initial() -> Self {
        Self(1)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ResourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value together with the version it was read at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: ResourceVersion,
}

/// Result of a version-checked write that did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Stored; carries the new version
    Written(ResourceVersion),
    /// The presented version is stale, or a create raced another create
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstancePhase {
    Provisioning,
    Ready,
    Failed,
}

impl InstancePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstancePhase::Provisioning => "provisioning",
            InstancePhase::Ready => "ready",
            InstancePhase::Failed => "failed",
        }
    }
}

impl FromStr for InstancePhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "provisioning" => Ok(InstancePhase::Provisioning),
            "ready" => Ok(InstancePhase::Ready),
            "failed" => Ok(InstancePhase::Failed),
            other => Err(format!("unknown instance phase '{}'", other)),
        }
    }
}

/// Tracking record binding a service instance id to a namespace and template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerTemplateInstance {
    pub instance_id: String,
    pub namespace: String,
    pub service_id: String,
    pub plan_id: String,
    pub labels: BTreeMap<String, String>,
    pub phase: InstancePhase,
    /// Username of the principal that last provisioned the instance
    pub requester: String,
}

impl BrokerTemplateInstance {
    /// Unset state for an instance id that has no record yet
    pub fn initial(instance_id: &str, namespace: &str, service_id: &str, plan_id: &str) -> Self {
        Self {
            instance_id: instance_id.to_string(),
            namespace: namespace.to_string(),
            service_id: service_id.to_string(),
            plan_id: plan_id.to_string(),
            labels: BTreeMap::new(),
            phase: InstancePhase::Provisioning,
            requester: String::new(),
        }
    }

    /// Whether this record was provisioned with the same target
    pub fn matches(&self, namespace: &str, service_id: &str, plan_id: &str) -> bool {
        self.namespace == namespace && self.service_id == service_id && self.plan_id == plan_id
    }
}

impl Labeled for BrokerTemplateInstance {
    fn labels_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_round_trips_through_str() {
        for phase in [InstancePhase::Provisioning, InstancePhase::Ready, InstancePhase::Failed] {
            assert_eq!(phase.as_str().parse::<InstancePhase>(), Ok(phase));
        }
        assert!("gone".parse::<InstancePhase>().is_err());
    }

    #[test]
    fn test_matches_compares_target() {
        let record = BrokerTemplateInstance::initial("i", "ns", "svc", "plan");
        assert!(record.matches("ns", "svc", "plan"));
        assert!(!record.matches("other", "svc", "plan"));
        assert!(!record.matches("ns", "svc", "other-plan"));
    }

    #[test]
    fn test_versions_increase() {
        assert_eq!(ResourceVersion::initial().next(), ResourceVersion(2));
    }
}
