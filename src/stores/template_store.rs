use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::errors::InternalError;
use crate::stores::{decode_labels, encode_labels};
use crate::types::db::template::{self, ActiveModel, Entity as Templates};
use crate::types::internal::Template;

/// Catalog of templates the broker can instantiate
pub struct TemplateStore {
    db: DatabaseConnection,
}

impl TemplateStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn into_template(model: template::Model) -> Result<Template, InternalError> {
        Ok(Template {
            object_labels: decode_labels(&model.object_labels)?,
            uid: model.uid,
            namespace: model.namespace,
            name: model.name,
        })
    }

    /// Look up a template by the uid clients send as `service_id`
    ///
    /// # Returns
    /// * `Ok(Some(Template))` - Template found
    /// * `Ok(None)` - No template with that uid
    /// * `Err(InternalError)` - Database error
    pub async fn get_by_uid(&self, uid: &str) -> Result<Option<Template>, InternalError> {
        Templates::find_by_id(uid.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_template_by_uid", e))?
            .map(Self::into_template)
            .transpose()
    }

    /// Add a template to the catalog
    ///
    /// # Returns
    /// * `Ok(Template)` - The registered template, with no object labels
    /// * `Err(InternalError)` - Database error, including a duplicate uid
    pub async fn register(
        &self,
        uid: &str,
        namespace: &str,
        name: &str,
    ) -> Result<Template, InternalError> {
        let object_labels = BTreeMap::new();

        let model = ActiveModel {
            uid: Set(uid.to_string()),
            namespace: Set(namespace.to_string()),
            name: Set(name.to_string()),
            object_labels: Set(encode_labels(&object_labels)?),
            created_at: Set(Utc::now().timestamp()),
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("register_template", e))?;

        tracing::info!("Registered template {}/{} with uid {}", namespace, name, uid);

        Self::into_template(inserted)
    }
}
