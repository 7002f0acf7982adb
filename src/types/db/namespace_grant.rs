use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "namespace_grants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `user:<name>` or `group:<name>`
    pub subject: String,
    /// Target namespace, or `*` for all namespaces
    pub namespace: String,
    /// Permitted verb, or `*` for all verbs
    pub verb: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
