// Database entities - SeaORM models
pub mod broker_template_instance;
pub mod namespace_grant;
pub mod template;
