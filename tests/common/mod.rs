// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use migration::{BrokerMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use template_service_broker::app_data::AppData;
use template_service_broker::config::{BrokerSettings, EnvironmentProvider};
use template_service_broker::errors::InternalError;
use template_service_broker::stores::{BrokerTemplateInstanceStore, TrackingRecordStore};
use template_service_broker::types::internal::{BrokerTemplateInstance, ResourceVersion, Versioned, WriteOutcome};

pub const TEMPLATE_UID: &str = "b3d1f5a2-cakephp";
pub const TEMPLATE_NAMESPACE: &str = "openshift";

/// Creates a broker database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    BrokerMigrator::up(&db, None)
        .await
        .expect("Failed to run broker migrations");

    db
}

/// Fixed set of environment variables
#[derive(Default)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvironmentProvider for StaticEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// AppData over a fresh database with one registered template
pub async fn setup_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    let settings = BrokerSettings::from_env_provider(Arc::new(StaticEnvironment::default()))
        .expect("Failed to load default settings");

    let app_data = AppData::init(db, settings);
    app_data
        .template_store
        .register(TEMPLATE_UID, TEMPLATE_NAMESPACE, "cakephp-mysql-example")
        .await
        .expect("Failed to register template");

    Arc::new(app_data)
}

/// Same stores as `base`, with a different tracking record store
pub fn with_instance_store(
    base: &AppData,
    instance_store: Arc<dyn TrackingRecordStore>,
) -> Arc<AppData> {
    Arc::new(AppData {
        db: base.db.clone(),
        settings: base.settings.clone(),
        template_store: base.template_store.clone(),
        grant_store: base.grant_store.clone(),
        access_reviewer: base.access_reviewer.clone(),
        instance_store,
    })
}

/// SQL store where another writer gets in first on the next N writes
///
/// Before forwarding a write, the competing writer rewrites the current
/// record (or creates it), so the forwarded write really conflicts in the
/// database.
pub struct ContendedStore {
    inner: BrokerTemplateInstanceStore,
    contended_writes: AtomicUsize,
    writes: AtomicUsize,
}

impl ContendedStore {
    pub fn new(db: DatabaseConnection, contended_writes: usize) -> Self {
        Self {
            inner: BrokerTemplateInstanceStore::new(db),
            contended_writes: AtomicUsize::new(contended_writes),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn competing_write(&self, record: &BrokerTemplateInstance) -> Result<(), InternalError> {
        match self.inner.read(&record.instance_id).await? {
            Some(current) => {
                self.inner.write(&current.value, Some(current.version)).await?;
            }
            None => {
                self.inner.write(record, None).await?;
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TrackingRecordStore for ContendedStore {
    async fn read(
        &self,
        instance_id: &str,
    ) -> Result<Option<Versioned<BrokerTemplateInstance>>, InternalError> {
        self.inner.read(instance_id).await
    }

    async fn write(
        &self,
        record: &BrokerTemplateInstance,
        expected: Option<ResourceVersion>,
    ) -> Result<WriteOutcome, InternalError> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        let contended = self
            .contended_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if contended {
            self.competing_write(record).await?;
        }

        self.inner.write(record, expected).await
    }
}
