// Internal domain types shared across coordinators, providers and stores
pub mod context;
pub mod label_set;
pub mod principal;
pub mod template;
pub mod tracking_record;

pub use context::{RequestContext, RequestId, RequestSource};
pub use label_set::{LabelSet, Labeled};
pub use principal::Principal;
pub use template::Template;
pub use tracking_record::{BrokerTemplateInstance, InstancePhase, ResourceVersion, Versioned, WriteOutcome};
