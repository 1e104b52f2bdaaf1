//! Durable state backend
//!
//! State lives in `<data_dir>/state/state.log`, an append-only sequence of
//! checksummed entries. Every `put` is fsynced before it is acknowledged. The
//! key → value map is rebuilt by replaying the log on open; if a key occurs more
//! than once, the latest entry wins.
//!
//! A failed append (short write or failed fsync) is truncated back to the previous
//! log length, so a rejected write leaves no trace. If that rollback fails too, the
//! store refuses all further writes with `INFO_STATE_UNRECOVERABLE`.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use super::errors::{StateError, StateResult};
use super::iterator::SnapshotIterator;
use super::log::{LogEntry, LogReader};
use super::{SelectorQuery, StateQueryIterator, StateStore};
use crate::observability::{log_event_with_fields, Event, Logger};

/// Append target of the state log
trait AppendLog: Write {
    fn committed_len(&mut self) -> io::Result<u64>;

    fn truncate_to(&mut self, len: u64) -> io::Result<()>;

    fn sync(&mut self) -> io::Result<()>;
}

impl AppendLog for File {
    fn committed_len(&mut self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// Appends one serialized entry and fsyncs it; on failure restores the old length.
///
/// Returns `INFO_STATE_WRITE_FAILED` when the log was restored and
/// `INFO_STATE_UNRECOVERABLE` when it was not.
fn append_entry<L: AppendLog>(log: &mut L, key: &str, entry: &[u8]) -> StateResult<()> {
    let committed = log.committed_len().map_err(|e| {
        StateError::write_failed_io(format!("Failed to stat state log before key: {}", key), e)
    })?;

    let appended = log.write_all(entry).and_then(|()| log.sync());
    let cause = match appended {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    match log.truncate_to(committed).and_then(|()| log.sync()) {
        Ok(()) => Err(StateError::write_failed_io(
            format!("Failed to append key: {}", key),
            cause,
        )),
        Err(rollback) => {
            Logger::fatal(
                "STATE_ROLLBACK_FAILED",
                &[
                    ("cause", &cause.to_string()),
                    ("error", &rollback.to_string()),
                    ("key", key),
                    ("offset", &committed.to_string()),
                ],
            );
            Err(StateError::unrecoverable_io(
                format!(
                    "Failed to roll back partial append of key {} to offset {}",
                    key, committed
                ),
                rollback,
            ))
        }
    }
}

/// Append-only, fsync-per-write state store
pub struct FileStateStore {
    log_path: PathBuf,
    file: Mutex<File>,
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    /// Set once a failed append could not be rolled back
    unrecoverable: AtomicBool,
}

impl FileStateStore {
    /// Subdirectory of the data directory holding the log
    pub const STATE_DIR: &'static str = "state";
    /// Log file name
    pub const LOG_FILE: &'static str = "state.log";

    /// Returns the log path for a data directory
    pub fn log_path(data_dir: &Path) -> PathBuf {
        data_dir.join(Self::STATE_DIR).join(Self::LOG_FILE)
    }

    /// Opens or creates the state log under `data_dir` and replays it.
    ///
    /// # Errors
    ///
    /// - `INFO_STATE_WRITE_FAILED` if the directory or file cannot be created
    /// - `INFO_DATA_CORRUPTION` if any entry fails validation
    pub fn open(data_dir: &Path) -> StateResult<Self> {
        let state_dir = data_dir.join(Self::STATE_DIR);
        let log_path = Self::log_path(data_dir);

        if !state_dir.exists() {
            fs::create_dir_all(&state_dir).map_err(|e| {
                StateError::write_failed_io(
                    format!("Failed to create state directory: {}", state_dir.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| {
                StateError::write_failed_io(
                    format!("Failed to open state log: {}", log_path.display()),
                    e,
                )
            })?;

        let entries = Self::replay(&log_path)?;

        log_event_with_fields(
            Event::StateOpened,
            &[
                ("backend", "file"),
                ("keys", &entries.len().to_string()),
                ("path", &log_path.display().to_string()),
            ],
        );

        Ok(Self {
            log_path,
            file: Mutex::new(file),
            entries: RwLock::new(entries),
            unrecoverable: AtomicBool::new(false),
        })
    }

    fn replay(log_path: &Path) -> StateResult<BTreeMap<String, Vec<u8>>> {
        log_event_with_fields(
            Event::StateReplayBegin,
            &[("path", &log_path.display().to_string())],
        );

        let mut entries = BTreeMap::new();
        let mut reader = LogReader::open(log_path)?;
        let mut replayed = 0usize;

        loop {
            match reader.read_next() {
                Ok(Some(entry)) => {
                    entries.insert(entry.key, entry.value);
                    replayed += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    log_event_with_fields(
                        Event::StateCorruption,
                        &[("error", &e.to_string())],
                    );
                    return Err(e);
                }
            }
        }

        log_event_with_fields(
            Event::StateReplayComplete,
            &[("entries", &replayed.to_string())],
        );

        Ok(entries)
    }

    /// Returns the path to the state log
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StateError::read_failed("State lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StateResult<()> {
        if self.unrecoverable.load(Ordering::SeqCst) {
            return Err(StateError::unrecoverable(format!(
                "State log {} is in an unknown state; refusing key: {}",
                self.log_path.display(),
                key
            )));
        }

        let serialized = LogEntry::new(key, value).serialize();

        let mut file = self
            .file
            .lock()
            .map_err(|_| StateError::write_failed("State log lock poisoned"))?;

        if let Err(e) = append_entry(&mut *file, key, &serialized) {
            if e.is_fatal() {
                self.unrecoverable.store(true, Ordering::SeqCst);
            }
            return Err(e);
        }

        self.entries
            .write()
            .map_err(|_| StateError::write_failed("State lock poisoned"))?
            .insert(key.to_string(), value.to_vec());

        Ok(())
    }
}

impl SelectorQuery for FileStateStore {
    fn query_by_selector(&self, query: &str) -> StateResult<Box<dyn StateQueryIterator + '_>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StateError::query_failed("State lock poisoned"))?;
        Ok(Box::new(SnapshotIterator::scan(&entries, query)?))
    }
}
