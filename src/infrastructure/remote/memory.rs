//! In-Memory Remote Directory
//!
//! Implements `SessionProvider` over a shared in-memory tree of files,
//! symlinks and directories. Supports failure injection per remote step and
//! records every operation, so tests can assert exactly what was issued.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entities::RemoteFile;
use crate::domain::ports::{
    ConnectionError, EntryKind, RemoteSession, SessionProvider, TransportError, TransportResult,
    TransportStep,
};

/// First mtime handed out by the internal clock
const CLOCK_START: u64 = 1_700_000_000;

#[derive(Debug, Clone)]
enum MemoryEntry {
    File { bytes: Vec<u8>, mtime: u64 },
    Symlink { target: String, mtime: u64 },
}

impl MemoryEntry {
    fn mtime(&self) -> u64 {
        match self {
            Self::File { mtime, .. } | Self::Symlink { mtime, .. } => *mtime,
        }
    }
}

#[derive(Debug)]
struct Failure {
    /// Calls of the step that still succeed before the failure kicks in
    remaining_ok: usize,
    message: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    dirs: BTreeSet<String>,
    entries: BTreeMap<String, MemoryEntry>,
    clock: u64,
    failures: HashMap<TransportStep, Failure>,
    connect_failure: Option<String>,
    operations: Vec<(TransportStep, String)>,
    opened: usize,
    closed: usize,
    released: usize,
}

impl MemoryState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        CLOCK_START + self.clock
    }

    /// Record an operation and return the injected failure for its step, if any
    fn record(&mut self, step: TransportStep, path: &str) -> TransportResult<()> {
        self.operations.push((step, path.to_string()));
        match self.failures.get_mut(&step) {
            Some(failure) if failure.remaining_ok > 0 => {
                failure.remaining_ok -= 1;
                Ok(())
            }
            Some(failure) => Err(TransportError::new(step, path, failure.message.clone())),
            None => Ok(()),
        }
    }

    fn parent_exists(&self, path: &str) -> bool {
        match path.rsplit_once('/') {
            Some(("", _)) => self.dirs.contains("/"),
            Some((parent, _)) => self.dirs.contains(&normalize_dir(parent)),
            None => self.dirs.contains("."),
        }
    }
}

fn normalize_dir(dir: &str) -> String {
    let trimmed = dir.trim_end_matches('/');
    if trimmed.is_empty() {
        if dir.starts_with('/') {
            "/".to_string()
        } else {
            ".".to_string()
        }
    } else if let Some(rest) = trimmed.strip_prefix("./") {
        rest.to_string()
    } else {
        trimmed.to_string()
    }
}

fn normalize_file(path: &str) -> String {
    path.strip_prefix("./").unwrap_or(path).to_string()
}

/// Shared in-memory remote directory tree
///
/// Cloning yields another handle to the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a remote with one existing directory
    pub fn with_dir(dir: &str) -> Self {
        let remote = Self::new();
        remote.mkdir(dir);
        remote
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panicking test thread must not hide the state from the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn mkdir(&self, dir: &str) {
        self.lock().dirs.insert(normalize_dir(dir));
    }

    /// Place a file with an explicit mtime (seconds since the epoch)
    pub fn put_file(&self, path: &str, bytes: &[u8], mtime: u64) {
        self.lock().entries.insert(
            normalize_file(path),
            MemoryEntry::File {
                bytes: bytes.to_vec(),
                mtime,
            },
        );
    }

    /// Place a symbolic link at `link` pointing to `target`
    pub fn put_symlink(&self, link: &str, target: &str) {
        let mut state = self.lock();
        let mtime = state.tick();
        state.entries.insert(
            normalize_file(link),
            MemoryEntry::Symlink {
                target: target.to_string(),
                mtime,
            },
        );
    }

    pub fn remove(&self, path: &str) {
        self.lock().entries.remove(&normalize_file(path));
    }

    /// Contents of a regular file
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        match self.lock().entries.get(&normalize_file(path)) {
            Some(MemoryEntry::File { bytes, .. }) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// Target of a symbolic link
    pub fn link_target(&self, path: &str) -> Option<String> {
        match self.lock().entries.get(&normalize_file(path)) {
            Some(MemoryEntry::Symlink { target, .. }) => Some(target.clone()),
            _ => None,
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.lock().entries.contains_key(&normalize_file(path))
    }

    /// Make every subsequent operation of `step` fail with `message`
    pub fn fail_on(&self, step: TransportStep, message: &str) {
        self.fail_after(step, 0, message);
    }

    /// Let `skip` calls of `step` succeed, then fail every later one
    pub fn fail_after(&self, step: TransportStep, skip: usize, message: &str) {
        self.lock().failures.insert(
            step,
            Failure {
                remaining_ok: skip,
                message: message.to_string(),
            },
        );
    }

    pub fn clear_failure(&self, step: TransportStep) {
        self.lock().failures.remove(&step);
    }

    /// Make every subsequent `connect` fail
    pub fn fail_connect(&self, reason: &str) {
        self.lock().connect_failure = Some(reason.to_string());
    }

    /// Steps issued so far, in order
    pub fn operations(&self) -> Vec<TransportStep> {
        self.lock().operations.iter().map(|(step, _)| *step).collect()
    }

    /// Steps issued so far, with the path each one targeted
    pub fn operation_log(&self) -> Vec<(TransportStep, String)> {
        self.lock().operations.clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.lock().opened
    }

    /// Sessions ended through an explicit `close`
    pub fn sessions_closed(&self) -> usize {
        self.lock().closed
    }

    /// Sessions that were dropped without `close` (error paths)
    pub fn sessions_released(&self) -> usize {
        self.lock().released
    }

    /// Sessions neither closed nor dropped
    pub fn sessions_open(&self) -> usize {
        let state = self.lock();
        state.opened - state.closed - state.released
    }
}

/// `SessionProvider` backed by a `MemoryRemote`
#[derive(Debug, Clone)]
pub struct MemorySessionProvider {
    remote: MemoryRemote,
}

impl MemorySessionProvider {
    pub fn new(remote: MemoryRemote) -> Self {
        Self { remote }
    }
}

impl SessionProvider for MemorySessionProvider {
    fn destination(&self) -> String {
        "memory".to_string()
    }

    fn connect(&self) -> Result<Box<dyn RemoteSession>, ConnectionError> {
        let mut state = self.remote.lock();
        if let Some(reason) = &state.connect_failure {
            return Err(ConnectionError {
                host: "memory".to_string(),
                port: 0,
                reason: reason.clone(),
            });
        }
        state.opened += 1;
        Ok(Box::new(MemorySession {
            remote: self.remote.clone(),
            finished: false,
        }))
    }
}

struct MemorySession {
    remote: MemoryRemote,
    finished: bool,
}

impl RemoteSession for MemorySession {
    fn read_dir(&mut self, dir: &str) -> TransportResult<Vec<RemoteFile>> {
        let mut state = self.remote.lock();
        state.record(TransportStep::List, dir)?;

        let dir = normalize_dir(dir);
        if !state.dirs.contains(&dir) {
            return Err(TransportError::new(TransportStep::List, dir, "no such file"));
        }
        let prefix = match dir.as_str() {
            "." => String::new(),
            "/" => "/".to_string(),
            other => format!("{}/", other),
        };

        let files = state
            .entries
            .iter()
            .filter_map(|(path, entry)| {
                let name = path.strip_prefix(prefix.as_str())?;
                if name.is_empty() || name.contains('/') {
                    return None;
                }
                Some(RemoteFile::from_unix_mtime(name, Some(entry.mtime())))
            })
            .collect();
        Ok(files)
    }

    fn entry_kind(&mut self, path: &str) -> TransportResult<Option<EntryKind>> {
        let mut state = self.remote.lock();
        state.record(TransportStep::Stat, path)?;

        let path = normalize_file(path);
        if state.dirs.contains(&normalize_dir(&path)) {
            return Ok(Some(EntryKind::Directory));
        }
        Ok(state.entries.get(&path).map(|entry| match entry {
            MemoryEntry::File { .. } => EntryKind::File,
            MemoryEntry::Symlink { .. } => EntryKind::Symlink,
        }))
    }

    fn read_link(&mut self, path: &str) -> TransportResult<String> {
        let mut state = self.remote.lock();
        state.record(TransportStep::ReadLink, path)?;

        match state.entries.get(&normalize_file(path)) {
            Some(MemoryEntry::Symlink { target, .. }) => Ok(target.clone()),
            Some(MemoryEntry::File { .. }) => Err(TransportError::new(
                TransportStep::ReadLink,
                path,
                "not a symbolic link",
            )),
            None => Err(TransportError::new(TransportStep::ReadLink, path, "no such file")),
        }
    }

    fn unlink(&mut self, path: &str) -> TransportResult<()> {
        let mut state = self.remote.lock();
        state.record(TransportStep::Unlink, path)?;

        match state.entries.remove(&normalize_file(path)) {
            Some(_) => Ok(()),
            None => Err(TransportError::new(TransportStep::Unlink, path, "no such file")),
        }
    }

    fn symlink(&mut self, target: &str, link: &str) -> TransportResult<()> {
        let mut state = self.remote.lock();
        state.record(TransportStep::Symlink, link)?;

        let link_path = normalize_file(link);
        if state.entries.contains_key(&link_path) {
            return Err(TransportError::new(TransportStep::Symlink, link, "file exists"));
        }
        if !state.parent_exists(&link_path) {
            return Err(TransportError::new(TransportStep::Symlink, link, "no such file"));
        }
        let mtime = state.tick();
        state.entries.insert(
            link_path,
            MemoryEntry::Symlink {
                target: target.to_string(),
                mtime,
            },
        );
        Ok(())
    }

    fn write_file(&mut self, path: &str, bytes: &[u8]) -> TransportResult<()> {
        let mut state = self.remote.lock();
        state.record(TransportStep::Write, path)?;

        let file_path = normalize_file(path);
        if !state.parent_exists(&file_path) {
            return Err(TransportError::new(TransportStep::Write, path, "no such file"));
        }
        let mtime = state.tick();
        state.entries.insert(
            file_path,
            MemoryEntry::File {
                bytes: bytes.to_vec(),
                mtime,
            },
        );
        Ok(())
    }

    fn close(mut self: Box<Self>) -> TransportResult<()> {
        self.finished = true;
        let mut state = self.remote.lock();
        state.closed += 1;
        state.record(TransportStep::Close, "")
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        if !self.finished {
            self.remote.lock().released += 1;
        }
    }
}
