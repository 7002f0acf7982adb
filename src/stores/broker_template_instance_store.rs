use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::errors::InternalError;
use crate::stores::{decode_labels, encode_labels};
use crate::types::db::broker_template_instance::{self, ActiveModel, Column, Entity as BrokerTemplateInstances};
use crate::types::internal::{
    BrokerTemplateInstance, InstancePhase, ResourceVersion, Versioned, WriteOutcome,
};

/// Versioned store for tracking records
///
/// Every read hands out the record's current version. A write must present
/// the version it read (or `None` to create) and is rejected with
/// `WriteOutcome::Conflict` when another writer got there first. Any other
/// failure is an `Err`.
#[async_trait::async_trait]
pub trait TrackingRecordStore: Send + Sync {
    async fn read(
        &self,
        instance_id: &str,
    ) -> Result<Option<Versioned<BrokerTemplateInstance>>, InternalError>;

    async fn write(
        &self,
        record: &BrokerTemplateInstance,
        expected: Option<ResourceVersion>,
    ) -> Result<WriteOutcome, InternalError>;
}

/// SQL implementation using a `resource_version` column as the CAS token
pub struct BrokerTemplateInstanceStore {
    db: DatabaseConnection,
}

impl BrokerTemplateInstanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn into_versioned(
        model: broker_template_instance::Model,
    ) -> Result<Versioned<BrokerTemplateInstance>, InternalError> {
        let phase = model
            .phase
            .parse::<InstancePhase>()
            .map_err(|e| InternalError::parse("instance phase", e))?;

        Ok(Versioned {
            version: ResourceVersion(model.resource_version),
            value: BrokerTemplateInstance {
                labels: decode_labels(&model.labels)?,
                instance_id: model.instance_id,
                namespace: model.namespace,
                service_id: model.service_id,
                plan_id: model.plan_id,
                phase,
                requester: model.requester,
            },
        })
    }

    async fn create(&self, record: &BrokerTemplateInstance) -> Result<WriteOutcome, InternalError> {
        let now = Utc::now().timestamp();
        let version = ResourceVersion::initial();

        let model = ActiveModel {
            instance_id: Set(record.instance_id.clone()),
            namespace: Set(record.namespace.clone()),
            service_id: Set(record.service_id.clone()),
            plan_id: Set(record.plan_id.clone()),
            labels: Set(encode_labels(&record.labels)?),
            phase: Set(record.phase.as_str().to_string()),
            requester: Set(record.requester.clone()),
            resource_version: Set(version.0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // A concurrent create of the same id inserts nothing
        let inserted = BrokerTemplateInstances::insert(model)
            .on_conflict(
                OnConflict::column(Column::InstanceId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| InternalError::database("create_broker_template_instance", e))?;

        if inserted == 0 {
            return Ok(WriteOutcome::Conflict);
        }
        Ok(WriteOutcome::Written(version))
    }

    async fn update(
        &self,
        record: &BrokerTemplateInstance,
        expected: ResourceVersion,
    ) -> Result<WriteOutcome, InternalError> {
        let next = expected.next();

        let result = BrokerTemplateInstances::update_many()
            .col_expr(Column::Namespace, Expr::value(record.namespace.clone()))
            .col_expr(Column::ServiceId, Expr::value(record.service_id.clone()))
            .col_expr(Column::PlanId, Expr::value(record.plan_id.clone()))
            .col_expr(Column::Labels, Expr::value(encode_labels(&record.labels)?))
            .col_expr(Column::Phase, Expr::value(record.phase.as_str()))
            .col_expr(Column::Requester, Expr::value(record.requester.clone()))
            .col_expr(Column::ResourceVersion, Expr::value(next.0))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .filter(Column::InstanceId.eq(record.instance_id.as_str()))
            .filter(Column::ResourceVersion.eq(expected.0))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_broker_template_instance", e))?;

        if result.rows_affected == 0 {
            return Ok(WriteOutcome::Conflict);
        }
        Ok(WriteOutcome::Written(next))
    }
}

#[async_trait::async_trait]
impl TrackingRecordStore for BrokerTemplateInstanceStore {
    async fn read(
        &self,
        instance_id: &str,
    ) -> Result<Option<Versioned<BrokerTemplateInstance>>, InternalError> {
        BrokerTemplateInstances::find_by_id(instance_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("read_broker_template_instance", e))?
            .map(Self::into_versioned)
            .transpose()
    }

    async fn write(
        &self,
        record: &BrokerTemplateInstance,
        expected: Option<ResourceVersion>,
    ) -> Result<WriteOutcome, InternalError> {
        match expected {
            None => self.create(record).await,
            Some(version) => self.update(record, version).await,
        }
    }
}

impl std::fmt::Debug for BrokerTemplateInstanceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerTemplateInstanceStore")
            .field("db", &"<connection>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    fn record(instance_id: &str) -> BrokerTemplateInstance {
        let mut record = BrokerTemplateInstance::initial(instance_id, "team-a", "svc-1", "default");
        record.requester = "alice".to_string();
        record
    }

    #[tokio::test]
    async fn test_read_missing_record_returns_none() {
        let store = BrokerTemplateInstanceStore::new(setup_test_db().await);
        assert!(store.read("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let store = BrokerTemplateInstanceStore::new(setup_test_db().await);
        let mut record = record("inst-1");
        record.labels.insert("team".to_string(), "web".to_string());

        let outcome = store.write(&record, None).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Written(ResourceVersion::initial()));

        let stored = store.read("inst-1").await.unwrap().unwrap();
        assert_eq!(stored.version, ResourceVersion::initial());
        assert_eq!(stored.value, record);
    }

    #[tokio::test]
    async fn test_second_create_conflicts() {
        let store = BrokerTemplateInstanceStore::new(setup_test_db().await);

        store.write(&record("inst-1"), None).await.unwrap();
        let outcome = store.write(&record("inst-1"), None).await.unwrap();

        assert_eq!(outcome, WriteOutcome::Conflict);
    }

    #[tokio::test]
    async fn test_update_with_current_version_bumps_version() {
        let store = BrokerTemplateInstanceStore::new(setup_test_db().await);
        store.write(&record("inst-1"), None).await.unwrap();

        let mut current = store.read("inst-1").await.unwrap().unwrap();
        current.value.phase = InstancePhase::Ready;
        let outcome = store.write(&current.value, Some(current.version)).await.unwrap();

        assert_eq!(outcome, WriteOutcome::Written(ResourceVersion(2)));
        let stored = store.read("inst-1").await.unwrap().unwrap();
        assert_eq!(stored.version, ResourceVersion(2));
        assert_eq!(stored.value.phase, InstancePhase::Ready);
    }

    #[tokio::test]
    async fn test_update_with_stale_version_conflicts() {
        let store = BrokerTemplateInstanceStore::new(setup_test_db().await);
        store.write(&record("inst-1"), None).await.unwrap();

        let first = store.read("inst-1").await.unwrap().unwrap();
        let second = store.read("inst-1").await.unwrap().unwrap();

        // Both writers saw version 1; only one may win
        let winner = store.write(&first.value, Some(first.version)).await.unwrap();
        let loser = store.write(&second.value, Some(second.version)).await.unwrap();

        assert_eq!(winner, WriteOutcome::Written(ResourceVersion(2)));
        assert_eq!(loser, WriteOutcome::Conflict);
    }

    #[tokio::test]
    async fn test_update_of_missing_record_conflicts() {
        let store = BrokerTemplateInstanceStore::new(setup_test_db().await);

        let outcome = store
            .write(&record("ghost"), Some(ResourceVersion::initial()))
            .await
            .unwrap();

        assert_eq!(outcome, WriteOutcome::Conflict);
    }
}
