//! Persistence port for two-factor records.
//!
//! The engine never talks to a database directly; callers inject a
//! [`TwoFactorStore`]. [`MemoryStore`] is the in-process reference
//! implementation and the substrate for the test suite.

use crate::{error::Error, models::TwoFactorRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Durable storage for per-account two-factor records.
///
/// Implement this for your database layer. Implementations map their own
/// failures into [`Error::Persistence`]; `anyhow::Error` converts with `?`.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use konfirmo::{Error, TwoFactorRecord, TwoFactorStore};
/// use uuid::Uuid;
///
/// struct PgStore {
///     pool: sqlx::PgPool,
/// }
///
/// #[async_trait]
/// impl TwoFactorStore for PgStore {
///     async fn load(&self, account_id: Uuid) -> Result<Option<TwoFactorRecord>, Error> {
///         // SELECT the record row
///     }
///
///     // ... implement the other methods
/// }
/// ```
#[async_trait]
pub trait TwoFactorStore: Send + Sync {
    /// Fetch the record for an account; `None` if two-factor was never set up.
    async fn load(&self, account_id: Uuid) -> Result<Option<TwoFactorRecord>, Error>;

    /// Overwrite the record for an account.
    async fn save(&self, account_id: Uuid, record: &TwoFactorRecord) -> Result<(), Error>;

    /// Remove `hash` from the account's backup-code hashes if present, and
    /// report whether it was removed.
    ///
    /// Must be atomic: two racing calls with the same hash must not both
    /// observe a removal (`UPDATE ... RETURNING` or equivalent).
    async fn consume_backup_code_hash(&self, account_id: Uuid, hash: &str) -> Result<bool, Error>;
}

#[async_trait]
impl<T: TwoFactorStore + ?Sized> TwoFactorStore for Arc<T> {
    async fn load(&self, account_id: Uuid) -> Result<Option<TwoFactorRecord>, Error> {
        (**self).load(account_id).await
    }

    async fn save(&self, account_id: Uuid, record: &TwoFactorRecord) -> Result<(), Error> {
        (**self).save(account_id, record).await
    }

    async fn consume_backup_code_hash(&self, account_id: Uuid, hash: &str) -> Result<bool, Error> {
        (**self).consume_backup_code_hash(account_id, hash).await
    }
}

/// In-memory store keyed by account id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<Uuid, TwoFactorRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TwoFactorStore for MemoryStore {
    async fn load(&self, account_id: Uuid) -> Result<Option<TwoFactorRecord>, Error> {
        Ok(self.records.lock().await.get(&account_id).cloned())
    }

    async fn save(&self, account_id: Uuid, record: &TwoFactorRecord) -> Result<(), Error> {
        self.records.lock().await.insert(account_id, record.clone());
        Ok(())
    }

    async fn consume_backup_code_hash(&self, account_id: Uuid, hash: &str) -> Result<bool, Error> {
        // one lock acquisition keeps check-and-remove atomic
        let mut records = self.records.lock().await;
        match records.get_mut(&account_id) {
            Some(record) => Ok(record.backup_code_hashes.remove(hash)),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::{MemoryStore, TwoFactorStore};
    use crate::models::TwoFactorRecord;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    #[tokio::test]
    async fn load_missing_account_is_none() {
        let store = MemoryStore::new();
        assert!(store.load(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let account_id = Uuid::new_v4();
        let record = TwoFactorRecord {
            enabled: true,
            secret: None,
            backup_code_hashes: BTreeSet::from(["h1".to_string()]),
        };
        store.save(account_id, &record).await.unwrap();
        let loaded = store.load(account_id).await.unwrap().unwrap();
        assert!(loaded.enabled);
        assert_eq!(loaded.backup_code_hashes, record.backup_code_hashes);
    }

    #[tokio::test]
    async fn consume_backup_code_hash_is_single_shot() {
        let store = MemoryStore::new();
        let account_id = Uuid::new_v4();
        let record = TwoFactorRecord {
            enabled: true,
            secret: None,
            backup_code_hashes: BTreeSet::from(["h1".to_string(), "h2".to_string()]),
        };
        store.save(account_id, &record).await.unwrap();

        assert!(store.consume_backup_code_hash(account_id, "h1").await.unwrap());
        assert!(!store.consume_backup_code_hash(account_id, "h1").await.unwrap());
        assert!(!store.consume_backup_code_hash(account_id, "nope").await.unwrap());

        let left = store.load(account_id).await.unwrap().unwrap();
        assert_eq!(left.backup_code_hashes, BTreeSet::from(["h2".to_string()]));
    }

    #[tokio::test]
    async fn consume_backup_code_hash_for_missing_account_is_false() {
        let store = MemoryStore::new();
        assert!(!store
            .consume_backup_code_hash(Uuid::new_v4(), "h1")
            .await
            .unwrap());
    }
}
