use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::providers::{AccessReview, AccessReviewer};
use crate::types::db::namespace_grant::{ActiveModel, Column, Entity as NamespaceGrants};

/// Matches any namespace or verb in a grant
pub const WILDCARD: &str = "*";

/// Namespace grants backing the default access reviewer
///
/// Every review queries the table; nothing is cached, so a revoked grant
/// takes effect on the next request.
pub struct GrantStore {
    db: DatabaseConnection,
}

impl GrantStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Grant `subject` the `verb` in `namespace`
    ///
    /// # Arguments
    /// * `subject` - `user:<name>` or `group:<name>`
    /// * `namespace` - Namespace name or `*`
    /// * `verb` - Verb or `*`
    ///
    /// # Returns
    /// * `Ok(i32)` - Id of the new grant
    /// * `Err(InternalError)` - Malformed subject or database error
    pub async fn add_grant(
        &self,
        subject: &str,
        namespace: &str,
        verb: &str,
    ) -> Result<i32, InternalError> {
        let has_name = |prefix: &str| {
            subject
                .strip_prefix(prefix)
                .is_some_and(|name| !name.is_empty())
        };
        if !has_name("user:") && !has_name("group:") {
            return Err(InternalError::parse(
                "grant subject",
                format!("'{}' must look like user:<name> or group:<name>", subject),
            ));
        }

        let model = ActiveModel {
            subject: Set(subject.to_string()),
            namespace: Set(namespace.to_string()),
            verb: Set(verb.to_string()),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("add_namespace_grant", e))?;

        tracing::info!("Granted {} '{}' in namespace {}", subject, verb, namespace);

        Ok(inserted.id)
    }
}

#[async_trait::async_trait]
impl AccessReviewer for GrantStore {
    async fn review(&self, review: &AccessReview) -> Result<bool, InternalError> {
        let grant = NamespaceGrants::find()
            .filter(Column::Subject.is_in(review.principal.subjects()))
            .filter(Column::Namespace.is_in([review.namespace.as_str(), WILDCARD]))
            .filter(Column::Verb.is_in([review.verb.as_str(), WILDCARD]))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("review_namespace_access", e))?;

        Ok(grant.is_some())
    }
}
