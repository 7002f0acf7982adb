use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NamespaceGrants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NamespaceGrants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NamespaceGrants::Subject).string().not_null())
                    .col(ColumnDef::new(NamespaceGrants::Namespace).string().not_null())
                    .col(ColumnDef::new(NamespaceGrants::Verb).string().not_null())
                    .col(
                        ColumnDef::new(NamespaceGrants::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups always filter by subject and namespace
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_namespace_grants_subject_namespace")
                    .table(NamespaceGrants::Table)
                    .col(NamespaceGrants::Subject)
                    .col(NamespaceGrants::Namespace)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NamespaceGrants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NamespaceGrants {
    Table,
    Id,
    Subject,
    Namespace,
    Verb,
    CreatedAt,
}
