pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_templates;
mod m20250301_000002_create_broker_template_instances;
mod m20250301_000003_create_namespace_grants;

pub struct BrokerMigrator;

#[async_trait::async_trait]
impl MigratorTrait for BrokerMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_templates::Migration),
            Box::new(m20250301_000002_create_broker_template_instances::Migration),
            Box::new(m20250301_000003_create_namespace_grants::Migration),
        ]
    }
}
