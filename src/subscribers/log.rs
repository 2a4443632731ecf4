//! Append-only subscriber log.

use crate::error::{Result, StoreError};
use crate::types::{RecordId, Subscriber, Timestamp};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Field separator within a log line. Values are not escaped.
const FIELD_SEPARATOR: char = ',';

/// One decoded log line, before positional identity is assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub email: String,
    pub created_at: Timestamp,
}

/// Outcome of reading the whole log.
///
/// Keeps "nothing stored yet" apart from "could not read", even though the
/// public listing collapses both to an empty sequence.
#[derive(Debug)]
pub enum LogRead {
    /// The log exists and holds no decodable record.
    Empty,
    /// Records in read order, ids already assigned.
    Records(Vec<Subscriber>),
    /// The log could not be read.
    Failed(StoreError),
}

impl LogRead {
    /// Collapse to a listing, dropping any failure.
    pub fn into_records(self) -> Vec<Subscriber> {
        match self {
            LogRead::Records(records) => records,
            LogRead::Empty | LogRead::Failed(_) => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LogRead::Failed(_))
    }
}

/// Encode one record as a log line, terminator included.
pub fn encode_line(email: &str, created_at: &Timestamp) -> String {
    format!("{}{}{}\n", email, FIELD_SEPARATOR, created_at.to_rfc3339())
}

/// Decode one physical line of the log.
///
/// Returns `Ok(None)` for blank lines. A line without a timestamp field is
/// accepted and stamped with the read time; anything after the second field
/// is ignored.
pub fn decode_line(line_no: usize, line: &str) -> Result<Option<LogEntry>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.split(FIELD_SEPARATOR);
    let email = fields.next().unwrap_or_default();
    if email.is_empty() {
        return Err(StoreError::InvalidLine {
            line: line_no,
            reason: "missing email".into(),
        });
    }

    let created_at = match fields.next().map(str::trim) {
        None | Some("") => Timestamp::now(),
        Some(raw) => Timestamp::parse(raw).map_err(|e| StoreError::InvalidLine {
            line: line_no,
            reason: format!("bad timestamp {:?}: {}", raw, e),
        })?,
    };

    Ok(Some(LogEntry {
        email: email.to_string(),
        created_at,
    }))
}

/// The backing file of the subscriber store.
pub struct SubscriberLog {
    /// Path to the log file.
    path: PathBuf,
}

impl SubscriberLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty log if either is missing.
    ///
    /// Safe to call before every access. Never truncates an existing log.
    pub fn ensure_initialized(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                debug!(dir = ?parent, "created data directory");
            }
        }

        if !self.path.exists() {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            debug!(path = ?self.path, "created empty subscriber log");
        }

        Ok(())
    }

    /// Read and decode every record, assigning positional ids.
    ///
    /// Malformed lines are skipped and do not consume an id.
    pub fn load(&self) -> Result<Vec<Subscriber>> {
        self.ensure_initialized()?;

        let content = fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let mut records = Vec::new();
        let mut next_id = RecordId::FIRST;

        // Lines are decoded one by one so a bad byte costs only its own line.
        for (index, raw) in content.split(|b| *b == b'\n').enumerate() {
            let decoded = std::str::from_utf8(raw)
                .map_err(|e| StoreError::InvalidLine {
                    line: index + 1,
                    reason: format!("not valid UTF-8: {}", e),
                })
                .and_then(|line| decode_line(index + 1, line));

            match decoded {
                Ok(Some(entry)) => {
                    records.push(Subscriber {
                        id: next_id,
                        email: entry.email,
                        created_at: entry.created_at,
                    });
                    next_id = next_id.next();
                }
                Ok(None) => {}
                Err(e) => warn!(path = ?self.path, error = %e, "skipping malformed subscriber line"),
            }
        }

        Ok(records)
    }

    /// Read the log, reporting failure as a value instead of an error.
    pub fn read(&self) -> LogRead {
        match self.load() {
            Ok(records) if records.is_empty() => LogRead::Empty,
            Ok(records) => LogRead::Records(records),
            Err(e) => LogRead::Failed(e),
        }
    }

    /// Append one record in a single write through an append-mode handle.
    pub fn append(&self, email: &str, created_at: &Timestamp) -> Result<()> {
        self.ensure_initialized().map_err(|e| match e {
            StoreError::Io(source) => StoreError::Write {
                path: self.path.clone(),
                source,
            },
            other => other,
        })?;

        let line = encode_line(email, created_at);
        let write = || -> std::io::Result<()> {
            let mut file = OpenOptions::new().append(true).open(&self.path)?;
            file.write_all(line.as_bytes())?;
            file.sync_data()
        };

        write().map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
