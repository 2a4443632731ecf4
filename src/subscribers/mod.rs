//! Durable subscriber store.
//!
//! Subscribers live in a plain-text, append-only log with one
//! `email,timestamp` line per record. Ids are positional and recomputed on
//! every read.

mod log;
mod store;

pub use log::{decode_line, encode_line, LogEntry, LogRead, SubscriberLog};
pub use store::{StoreHealth, SubscriberStore};
