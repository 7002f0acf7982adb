use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::BrokerSettings;
use crate::providers::AccessReviewer;
use crate::stores::{BrokerTemplateInstanceStore, GrantStore, TemplateStore, TrackingRecordStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across
/// coordinators and the API layer.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db, settings)
///   ├─ template_store    (Arc<TemplateStore>)
///   ├─ grant_store       (Arc<GrantStore>)
///   ├─ access_reviewer   (Arc<dyn AccessReviewer>)      → grant_store
///   └─ instance_store    (Arc<dyn TrackingRecordStore>) → BrokerTemplateInstanceStore
///   ↓ wrapped in Arc<AppData>
///   └─ ProvisionCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Arc<BrokerSettings>,
    pub template_store: Arc<TemplateStore>,
    pub grant_store: Arc<GrantStore>,
    pub access_reviewer: Arc<dyn AccessReviewer>,
    pub instance_store: Arc<dyn TrackingRecordStore>,
}

impl AppData {
    /// Build all stores over an already migrated connection
    pub fn init(db: DatabaseConnection, settings: BrokerSettings) -> Self {
        tracing::debug!("Creating stores...");

        let template_store = Arc::new(TemplateStore::new(db.clone()));
        let grant_store = Arc::new(GrantStore::new(db.clone()));
        let instance_store = Arc::new(BrokerTemplateInstanceStore::new(db.clone()));

        tracing::info!("AppData initialization complete");

        Self {
            db,
            settings: Arc::new(settings),
            template_store,
            access_reviewer: grant_store.clone(),
            grant_store,
            instance_store,
        }
    }
}
