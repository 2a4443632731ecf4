//! The contract shared by both record stores.
//!
//! A store assigns identity on create, never updates a record afterwards,
//! and serves point and bulk reads. Callers validate candidates before
//! handing them over; a store never rejects a candidate on shape.

use crate::error::Result;
use crate::types::RecordId;

/// Create, get-by-id and list-all over one kind of record.
pub trait RecordStore {
    /// The stored record, including its assigned identity and timestamp.
    type Record;

    /// What a caller submits to `create`.
    type Candidate;

    /// Store a candidate and return the resulting record.
    fn create(&self, candidate: Self::Candidate) -> Result<Self::Record>;

    /// Point lookup by identity.
    fn get_by_id(&self, id: RecordId) -> Option<Self::Record>;

    /// Every record currently held, in ascending id order.
    fn list_all(&self) -> Vec<Self::Record>;
}

/// A store whose records are unique on one key field.
pub trait UniqueKeyStore: RecordStore {
    /// First record whose unique key equals `key` exactly.
    fn get_by_unique_key(&self, key: &str) -> Option<Self::Record>;
}
