// API layer - HTTP endpoints
pub mod broker;
pub mod health;
pub mod helpers;

pub use broker::BrokerApi;
pub use health::HealthApi;
