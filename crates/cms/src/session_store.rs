//! In-process session records with expiry cleanup.
//!
//! Every cookieless request that flashes a message creates a record, so the
//! map is swept on a timer by [`reap_expired`] and expired records are
//! dropped on load.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::{watch, Mutex};
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion, SessionStore};

/// How often the background sweep runs.
pub const REAP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Default)]
pub struct SessionRecords {
    records: Arc<Mutex<HashMap<Id, Record>>>,
}

impl SessionRecords {
    /// Number of stored records, expired or not.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn is_live(record: &Record) -> bool {
    record.expiry_date > OffsetDateTime::now_utc()
}

#[async_trait]
impl SessionStore for SessionRecords {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.records.lock().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let mut records = self.records.lock().await;
        match records.get(session_id) {
            Some(record) if is_live(record) => Ok(Some(record.clone())),
            Some(_) => {
                records.remove(session_id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SessionRecords {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| is_live(record));

        let removed = before - records.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = records.len(), "expired sessions removed");
        }
        Ok(())
    }
}

/// Sweep expired records every `period` until shutdown is signalled.
pub async fn reap_expired(
    store: SessionRecords,
    period: Duration,
    mut shutdown_rx: watch::Receiver<()>,
) {
    let mut interval = tokio::time::interval(period);
    // the first tick completes immediately
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = store.delete_expired().await {
                    tracing::warn!(error = %e, "failed to remove expired sessions");
                }
            }
            _ = shutdown_rx.changed() => {
                tracing::debug!("session reaper stopping");
                return;
            }
        }
    }
}
