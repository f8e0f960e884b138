//! Append-only file implementation of link repository.
//!
//! # File Format
//!
//! One JSON object per line, appended in insertion order:
//!
//! ```text
//! {"uuid":1,"short_url":"100680ad","original_url":"https://example.com"}
//! {"uuid":2,"short_url":"8b1a9953","original_url":"https://rust-lang.org"}
//! ```
//!
//! # Recovery
//!
//! On open the whole log is decoded once and the sequence counter resumes from
//! the `uuid` of the last record read (not the largest one). A record that
//! fails to decode ends the scan. With [`RecoveryMode::Truncate`] the log is
//! cut just before that record, which discards a half-written append left by a
//! crash; with [`RecoveryMode::Fail`] opening the log returns an error instead.
//!
//! Truncation drops everything from the bad record on, including valid
//! records that follow a corrupt line in the middle of the log. Those bytes
//! are appended to a `<log>.corrupt` file next to the log before the cut, so
//! they can be inspected and replayed by hand.
//!
//! # Performance
//!
//! Lookups and snapshots rewind the file and decode every record, so reads are
//! linear in the number of stored links. File access runs on the blocking
//! thread pool, one operation at a time.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::StorageError;

/// What startup recovery does with a record that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    /// Keep the records before the bad one and cut the log there.
    #[default]
    Truncate,
    /// Refuse to open the log.
    Fail,
}

impl FromStr for RecoveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "fail" => Ok(Self::Fail),
            other => Err(format!(
                "unknown recovery mode '{}', expected 'truncate' or 'fail'",
                other
            )),
        }
    }
}

impl fmt::Display for RecoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncate => write!(f, "truncate"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// On-disk shape of a [`Link`].
#[derive(Debug, Serialize, Deserialize)]
struct LogRow {
    uuid: i64,
    short_url: String,
    original_url: String,
}

impl From<Link> for LogRow {
    fn from(link: Link) -> Self {
        Self {
            uuid: link.sequence,
            short_url: link.short_key,
            original_url: link.original_url,
        }
    }
}

impl From<LogRow> for Link {
    fn from(row: LogRow) -> Self {
        Link::new(row.uuid, row.short_url, row.original_url)
    }
}

/// Open log handle plus the last assigned sequence number.
///
/// Reads move the shared file cursor, so every operation needs exclusive access.
struct LinkLog {
    file: File,
    sequence: i64,
}

impl LinkLog {
    /// Decodes records from the start of the file until `visit` breaks.
    fn scan(&mut self, mut visit: impl FnMut(Link) -> ControlFlow<()>) -> Result<(), StorageError> {
        self.file.seek(SeekFrom::Start(0))?;

        for line in BufReader::new(&mut self.file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let row: LogRow = serde_json::from_str(&line)?;
            if visit(row.into()).is_break() {
                break;
            }
        }

        Ok(())
    }

    /// Returns the first URL recorded for `key`.
    fn find(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        let mut found = None;
        self.scan(|link| {
            if link.short_key == key {
                found = Some(link.original_url);
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        Ok(found)
    }

    fn append(&mut self, key: &str, url: &str) -> Result<Link, StorageError> {
        let link = Link::new(self.sequence + 1, key.to_string(), url.to_string());

        let mut line = serde_json::to_vec(&LogRow::from(link.clone()))?;
        line.push(b'\n');
        self.file.write_all(&line)?;

        self.sequence = link.sequence;
        Ok(link)
    }
}

/// Outcome of the startup scan.
#[derive(Debug, Default, PartialEq, Eq)]
struct Recovered {
    records: usize,
    last_sequence: i64,
}

/// Scans the log once and leaves it ready for appends.
fn recover(file: &mut File, path: &Path, mode: RecoveryMode) -> Result<Recovered, StorageError> {
    file.seek(SeekFrom::Start(0))?;

    let mut recovered = Recovered::default();
    let mut valid_len = 0u64;
    let mut ends_with_newline = true;
    let mut corrupt = None;

    let mut reader = BufReader::new(&mut *file);
    let mut buf = Vec::new();
    let mut line = 0usize;

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        line += 1;

        match decode_line(&buf) {
            Ok(Some(row)) => {
                recovered.records += 1;
                recovered.last_sequence = row.uuid;
            }
            Ok(None) => {}
            Err(reason) => {
                corrupt = Some((line, reason));
                break;
            }
        }

        valid_len += read as u64;
        ends_with_newline = buf.ends_with(b"\n");
    }
    drop(reader);

    if let Some((line, reason)) = corrupt {
        match mode {
            RecoveryMode::Fail => return Err(StorageError::CorruptLog { line, reason }),
            RecoveryMode::Truncate => {
                let sidecar = corrupt_sidecar(path);
                preserve_tail(file, valid_len, &sidecar)?;
                warn!(
                    "Corrupt record at line {} ({}); moved it and everything after it to {}",
                    line,
                    reason,
                    sidecar.display()
                );
                file.set_len(valid_len)?;
            }
        }
    }

    // A crash between the record and its newline would glue the next append onto it.
    if !ends_with_newline {
        file.write_all(b"\n")?;
    }

    Ok(recovered)
}

/// `links.json` -> `links.json.corrupt`
fn corrupt_sidecar(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".corrupt");
    PathBuf::from(name)
}

/// Appends the bytes from `offset` to the end of `file` onto `sidecar`.
fn preserve_tail(file: &mut File, offset: u64, sidecar: &Path) -> Result<(), StorageError> {
    let mut tail = Vec::new();
    file.seek(SeekFrom::Start(offset))?;
    file.read_to_end(&mut tail)?;

    let mut out = OpenOptions::new().append(true).create(true).open(sidecar)?;
    out.write_all(&tail)?;
    out.sync_all()?;
    Ok(())
}

fn decode_line(line: &[u8]) -> Result<Option<LogRow>, String> {
    let text = std::str::from_utf8(line).map_err(|e| e.to_string())?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text).map(Some).map_err(|e| e.to_string())
}

/// Link storage backed by an append-only JSON lines file.
///
/// A single lock serializes every operation against the file, reads included.
pub struct FileLinkRepository {
    path: PathBuf,
    log: Arc<Mutex<LinkLog>>,
}

impl FileLinkRepository {
    /// Opens (creating if needed) the log at `path` and recovers the sequence counter.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file cannot be opened or repaired.
    /// Returns [`StorageError::CorruptLog`] if a record fails to decode and
    /// `recovery` is [`RecoveryMode::Fail`].
    pub fn open(path: impl AsRef<Path>, recovery: RecoveryMode) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        info!("Opening file storage: {}", path.display());

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;

        let recovered = recover(&mut file, &path, recovery)?;
        info!(
            "Recovered {} records from {}",
            recovered.records,
            path.display()
        );

        Ok(Self {
            path,
            log: Arc::new(Mutex::new(LinkLog {
                file,
                sequence: recovered.last_sequence,
            })),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sequence number of the most recent record; the next insert gets this plus one.
    pub fn last_sequence(&self) -> Result<i64, StorageError> {
        Ok(self.lock()?.sequence)
    }

    fn lock(&self) -> Result<MutexGuard<'_, LinkLog>, StorageError> {
        lock_log(&self.log)
    }

    /// Runs `op` against the locked log on the blocking thread pool.
    async fn with_log<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut LinkLog) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let log = Arc::clone(&self.log);
        tokio::task::spawn_blocking(move || {
            let mut log = lock_log(&log)?;
            op(&mut log)
        })
        .await?
    }
}

fn lock_log(log: &Mutex<LinkLog>) -> Result<MutexGuard<'_, LinkLog>, StorageError> {
    log.lock().map_err(|_| StorageError::LockPoisoned)
}

#[async_trait]
impl LinkRepository for FileLinkRepository {
    async fn add_url(&self, key: &str, url: &str) -> Result<bool, StorageError> {
        let (key, url) = (key.to_string(), url.to_string());

        self.with_log(move |log| {
            if log.find(&key)?.is_some() {
                return Ok(false);
            }

            let link = log.append(&key, &url)?;
            debug!("Appended {} as record {}", link.short_key, link.sequence);
            Ok(true)
        })
        .await
    }

    async fn get_url(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key = key.to_string();
        self.with_log(move |log| log.find(&key)).await
    }

    async fn get_all(&self) -> Result<HashMap<String, String>, StorageError> {
        self.with_log(|log| {
            let mut links = HashMap::new();
            log.scan(|link| {
                links.entry(link.short_key).or_insert(link.original_url);
                ControlFlow::Continue(())
            })?;
            Ok(links)
        })
        .await
    }
}
