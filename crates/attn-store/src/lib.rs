//! Storage layer for the attendance tracker.
//!
//! Events live in a JSON Lines journal, one `AttendanceEvent` per line:
//!
//! ```text
//! {"employee":"ahmed","action":"enter_office","date":"2025-03-02","time":"09:00:00"}
//! ```
//!
//! # Locking
//!
//! Writers take an exclusive advisory lock on a sibling file named after the
//! journal with `.lock` appended (`events.jsonl.lock`), and readers take a
//! shared one, so a reader never sees a half-written line when two employees
//! clock in at once. The lock is released when the guard file is dropped.
//!
//! The lock covers a single `load` or a single batch append, not a
//! load-then-append sequence. Two overlapping `sweep` runs can therefore both
//! append a `leave_home` for the same employee. The second one is an orphan
//! leave, which the hours engine ignores.
//!
//! # Corruption
//!
//! A line that is not a JSON object with the four event fields is a hard
//! error: the journal no longer has the shape the engine expects. Bad
//! *values* (an impossible date, an unknown action label) load normally and
//! are left for the hours engine to skip.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use attn_core::{AttendanceEvent, EventStore};
use fs2::FileExt;
use thiserror::Error;

/// Journal errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the journal failed.
    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Acquiring the journal lock failed.
    #[error("failed to lock {}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A journal line could not be parsed as an event.
    #[error("corrupt journal line {line} in {}", path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    /// An event could not be serialized.
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A JSON Lines event journal on local disk.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
    lock_path: PathBuf,
}

impl Journal {
    /// Opens the journal at `path`, creating its parent directory if needed.
    ///
    /// The journal file itself is created on first append.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let mut lock_path = path.clone().into_os_string();
        lock_path.push(".lock");
        Ok(Self {
            path,
            lock_path: lock_path.into(),
        })
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_lock(&self) -> Result<File, StoreError> {
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|source| StoreError::Lock {
                path: self.lock_path.clone(),
                source,
            })
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl EventStore for Journal {
    type Error = StoreError;

    fn load(&self) -> Result<Vec<AttendanceEvent>, StoreError> {
        let lock = self.open_lock()?;
        lock.lock_shared().map_err(|source| StoreError::Lock {
            path: self.lock_path.clone(),
            source,
        })?;

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut events = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| self.io_error(source))?;
            if line.trim().is_empty() {
                continue;
            }
            let event =
                serde_json::from_str(&line).map_err(|source| StoreError::Corrupt {
                    path: self.path.clone(),
                    line: index + 1,
                    source,
                })?;
            events.push(event);
        }

        tracing::debug!(count = events.len(), path = %self.path.display(), "loaded journal");
        Ok(events)
    }

    fn append(&mut self, event: &AttendanceEvent) -> Result<(), StoreError> {
        self.append_all(std::slice::from_ref(event)).map(|_| ())
    }

    /// Appends a batch of events under a single lock.
    ///
    /// Returns the number of events written.
    fn append_all(&mut self, events: &[AttendanceEvent]) -> Result<usize, StoreError> {
        if events.is_empty() {
            return Ok(0);
        }

        let mut buffer = String::new();
        for event in events {
            buffer.push_str(&serde_json::to_string(event)?);
            buffer.push('\n');
        }

        let lock = self.open_lock()?;
        lock.lock_exclusive().map_err(|source| StoreError::Lock {
            path: self.lock_path.clone(),
            source,
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        file.write_all(buffer.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| self.io_error(source))?;

        tracing::debug!(count = events.len(), path = %self.path.display(), "appended events");
        Ok(events.len())
    }
}
