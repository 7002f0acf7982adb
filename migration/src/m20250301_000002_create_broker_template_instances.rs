use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BrokerTemplateInstances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BrokerTemplateInstances::InstanceId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BrokerTemplateInstances::Namespace)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BrokerTemplateInstances::ServiceId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BrokerTemplateInstances::PlanId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BrokerTemplateInstances::Labels)
                            .text()
                            .not_null()
                            .default("{}"),
                    )
                    .col(
                        ColumnDef::new(BrokerTemplateInstances::Phase)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BrokerTemplateInstances::Requester)
                            .string()
                            .not_null(),
                    )
                    // Optimistic concurrency token, bumped on every write
                    .col(
                        ColumnDef::new(BrokerTemplateInstances::ResourceVersion)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BrokerTemplateInstances::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BrokerTemplateInstances::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_broker_template_instances_namespace")
                    .table(BrokerTemplateInstances::Table)
                    .col(BrokerTemplateInstances::Namespace)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(BrokerTemplateInstances::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum BrokerTemplateInstances {
    Table,
    InstanceId,
    Namespace,
    ServiceId,
    PlanId,
    Labels,
    Phase,
    Requester,
    ResourceVersion,
    CreatedAt,
    UpdatedAt,
}
