// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use migration::{BrokerMigrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

use crate::app_data::AppData;
use crate::config::{BrokerSettings, MockEnvironment};
use crate::errors::InternalError;
use crate::providers::{AccessReview, AccessReviewer};
use crate::stores::{GrantStore, TemplateStore, TrackingRecordStore};
use crate::types::internal::{BrokerTemplateInstance, ResourceVersion, Versioned, WriteOutcome};

/// Template uid seeded by `build_test_app_data`
pub const TEST_TEMPLATE_UID: &str = "tmpl-uid-1";

/// Namespace the seeded template lives in
pub const TEST_TEMPLATE_NAMESPACE: &str = "openshift";

/// Creates an in-memory broker database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    BrokerMigrator::up(&db, None)
        .await
        .expect("Failed to run broker migrations");

    db
}

/// Builds AppData over a fresh database with the given collaborators
///
/// One template (`TEST_TEMPLATE_UID` in `TEST_TEMPLATE_NAMESPACE`) is
/// registered in the catalog.
pub async fn build_test_app_data(
    access_reviewer: Arc<dyn AccessReviewer>,
    instance_store: Arc<dyn TrackingRecordStore>,
) -> Arc<AppData> {
    let db = setup_test_db().await;
    let settings = BrokerSettings::from_env_provider(Arc::new(MockEnvironment::empty()))
        .expect("Failed to load default settings");

    let template_store = Arc::new(TemplateStore::new(db.clone()));
    template_store
        .register(TEST_TEMPLATE_UID, TEST_TEMPLATE_NAMESPACE, "cakephp-mysql")
        .await
        .expect("Failed to register test template");

    Arc::new(AppData {
        grant_store: Arc::new(GrantStore::new(db.clone())),
        db,
        settings: Arc::new(settings),
        template_store,
        access_reviewer,
        instance_store,
    })
}

enum ReviewAnswer {
    Allow,
    Deny,
    Fail,
}

/// Access reviewer with a fixed answer that records every review
pub struct ScriptedReviewer {
    answer: ReviewAnswer,
    calls: AtomicUsize,
    last_review: Mutex<Option<AccessReview>>,
}

impl ScriptedReviewer {
    fn with_answer(answer: ReviewAnswer) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            last_review: Mutex::new(None),
        }
    }

    pub fn allow() -> Self {
        Self::with_answer(ReviewAnswer::Allow)
    }

    pub fn deny() -> Self {
        Self::with_answer(ReviewAnswer::Deny)
    }

    /// Oracle that is unreachable
    pub fn failing() -> Self {
        Self::with_answer(ReviewAnswer::Fail)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_review(&self) -> Option<AccessReview> {
        self.last_review.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AccessReviewer for ScriptedReviewer {
    async fn review(&self, review: &AccessReview) -> Result<bool, InternalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_review.lock().unwrap() = Some(review.clone());

        match self.answer {
            ReviewAnswer::Allow => Ok(true),
            ReviewAnswer::Deny => Ok(false),
            ReviewAnswer::Fail => Err(InternalError::database(
                "review_namespace_access",
                DbErr::Conn(sea_orm::RuntimeErr::Internal("connection refused".to_string())),
            )),
        }
    }
}

/// In-memory tracking record store that answers the next N writes with a
/// conflict, counting every read and write
pub struct ConflictingStore {
    record: Mutex<Option<Versioned<BrokerTemplateInstance>>>,
    conflicts_remaining: AtomicUsize,
    fail_writes: bool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl ConflictingStore {
    pub fn new() -> Self {
        Self {
            record: Mutex::new(None),
            conflicts_remaining: AtomicUsize::new(0),
            fail_writes: false,
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Store whose writes fail with a non-conflict error
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// Store that already holds `record` at version 1
    pub fn with_record(record: BrokerTemplateInstance) -> Self {
        let store = Self::new();
        *store.record.lock().unwrap() = Some(Versioned {
            value: record,
            version: ResourceVersion::initial(),
        });
        store
    }

    pub fn set_conflicts(&self, conflicts: usize) {
        self.conflicts_remaining.store(conflicts, Ordering::SeqCst);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reset_counts(&self) {
        self.reads.store(0, Ordering::SeqCst);
        self.writes.store(0, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Option<Versioned<BrokerTemplateInstance>> {
        self.record.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TrackingRecordStore for ConflictingStore {
    async fn read(
        &self,
        _instance_id: &str,
    ) -> Result<Option<Versioned<BrokerTemplateInstance>>, InternalError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored())
    }

    async fn write(
        &self,
        record: &BrokerTemplateInstance,
        expected: Option<ResourceVersion>,
    ) -> Result<WriteOutcome, InternalError> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        if self.fail_writes {
            return Err(InternalError::database(
                "update_broker_template_instance",
                DbErr::Custom("disk I/O error".to_string()),
            ));
        }

        let injected = self
            .conflicts_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Ok(WriteOutcome::Conflict);
        }

        let mut current = self.record.lock().unwrap();
        let current_version = current.as_ref().map(|stored| stored.version);
        if current_version != expected {
            return Ok(WriteOutcome::Conflict);
        }

        let version = expected.map_or(ResourceVersion::initial(), ResourceVersion::next);
        *current = Some(Versioned {
            value: record.clone(),
            version,
        });
        Ok(WriteOutcome::Written(version))
    }
}
