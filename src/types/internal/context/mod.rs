mod request_context;
mod request_id;
mod request_source;

pub use request_context::RequestContext;
pub use request_id::RequestId;
pub use request_source::RequestSource;
