//! # Roster
//!
//! Two small record stores behind an HTTP API.
//!
//! ## Core Concepts
//!
//! - **Subscribers**: uniquely keyed by email, persisted to an append-only
//!   text log, deduplicated on create
//! - **Feedback**: held in memory, keyed by a counter that is never reused,
//!   filterable by category and clearable
//! - **Reads degrade, writes fail**: an unreadable log lists as empty and is
//!   reported through a health signal, while a failed append is an error
//!
//! ## Example
//!
//! ```ignore
//! use roster::{FeedbackStore, NewFeedback, NewSubscriber, RecordStore, SubscriberStore};
//!
//! let subscribers = SubscriberStore::new("./data/subscribers.txt");
//! let first = subscribers.create(NewSubscriber::new("a@x.com"))?;
//! let again = subscribers.create(NewSubscriber::new("a@x.com"))?;
//! assert_eq!(first.id, again.id);
//!
//! let feedback = FeedbackStore::new();
//! feedback.create(NewFeedback::new("A", "a@x.com", "bug", "it broke"))?;
//! assert_eq!(feedback.list_by_category("bug").len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod feedback;
pub mod http;
pub mod store;
pub mod subscribers;
pub mod types;

// Re-exports
pub use config::ServiceConfig;
pub use error::{Result, StoreError};
pub use feedback::FeedbackStore;
pub use http::{create_router, serve, ApiError, AppState};
pub use store::{RecordStore, UniqueKeyStore};
pub use subscribers::{LogRead, StoreHealth, SubscriberLog, SubscriberStore};
pub use types::*;
