//! Uniquely-keyed subscriber store over the append-only log.

use super::log::{LogRead, SubscriberLog};
use crate::config::ServiceConfig;
use crate::error::{Result, StoreError};
use crate::store::{RecordStore, UniqueKeyStore};
use crate::types::{NewSubscriber, RecordId, Subscriber, Timestamp};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::path::Path;
use tracing::{error, info, warn};

/// Read health of the backing log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHealth {
    pub healthy: bool,
    pub last_read_error: Option<String>,
}

/// Durable subscriber store.
///
/// Reads never fail: an unreadable log lists as empty and is reported
/// through [`SubscriberStore::health`]. Writes fail loudly.
pub struct SubscriberStore {
    log: SubscriberLog,

    /// Held for the whole check-then-append in `create`.
    write_lock: Mutex<()>,

    /// Message of the most recent failed read, cleared by the next success.
    last_read_error: RwLock<Option<String>>,
}

impl SubscriberStore {
    /// Store backed by the log at `path`. Nothing is touched on disk yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            log: SubscriberLog::new(path),
            write_lock: Mutex::new(()),
            last_read_error: RwLock::new(None),
        }
    }

    /// Open the store at the configured location, creating it if missing.
    pub fn open(config: &ServiceConfig) -> Result<Self> {
        let store = Self::new(config.subscribers_path());
        store.ensure_initialized()?;
        info!(path = ?store.path(), "subscriber store ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        self.log.path()
    }

    /// Make sure the data directory and log file exist.
    pub fn ensure_initialized(&self) -> Result<()> {
        self.log.ensure_initialized()
    }

    /// Read the log, recording the outcome in the health signal.
    pub fn read(&self) -> LogRead {
        let outcome = self.log.read();
        match &outcome {
            LogRead::Failed(e) => {
                warn!(path = ?self.path(), error = %e, "error reading subscribers");
                self.note_read(Some(e));
            }
            LogRead::Empty | LogRead::Records(_) => self.note_read(None),
        }
        outcome
    }

    fn note_read(&self, failure: Option<&StoreError>) {
        *self.last_read_error.write() = failure.map(|e| e.to_string());
    }

    pub fn health(&self) -> StoreHealth {
        let last_read_error = self.last_read_error.read().clone();
        StoreHealth {
            healthy: last_read_error.is_none(),
            last_read_error,
        }
    }

    /// Number of decodable records currently in the log.
    pub fn count(&self) -> usize {
        self.list_all().len()
    }

    pub fn get_by_email(&self, email: &str) -> Option<Subscriber> {
        self.list_all().into_iter().find(|s| s.email == email)
    }
}

impl RecordStore for SubscriberStore {
    type Record = Subscriber;
    type Candidate = NewSubscriber;

    /// Add a subscriber, or return the existing one with the same email.
    ///
    /// Unlike the read path, a failure to read the log here is an error: a
    /// create that cannot see existing records cannot enforce uniqueness.
    fn create(&self, candidate: NewSubscriber) -> Result<Subscriber> {
        let _lock = self.write_lock.lock();

        let existing = match self.log.load() {
            Ok(existing) => {
                self.note_read(None);
                existing
            }
            Err(e) => {
                error!(path = ?self.path(), error = %e, "error saving subscriber");
                self.note_read(Some(&e));
                return Err(e);
            }
        };

        if let Some(found) = existing.iter().find(|s| s.email == candidate.email) {
            return Ok(found.clone());
        }

        let subscriber = Subscriber {
            id: RecordId(existing.len() as u64 + 1),
            email: candidate.email,
            created_at: Timestamp::now(),
        };

        self.log
            .append(&subscriber.email, &subscriber.created_at)
            .map_err(|e| {
                error!(path = ?self.path(), error = %e, "error saving subscriber");
                e
            })?;

        Ok(subscriber)
    }

    fn get_by_id(&self, id: RecordId) -> Option<Subscriber> {
        self.list_all().into_iter().find(|s| s.id == id)
    }

    fn list_all(&self) -> Vec<Subscriber> {
        self.read().into_records()
    }
}

impl UniqueKeyStore for SubscriberStore {
    fn get_by_unique_key(&self, key: &str) -> Option<Subscriber> {
        self.get_by_email(key)
    }
}
