//! Key/value persistence for small pieces of session state.
//!
//! Completion sets and favorites are stored as JSON arrays of strings under
//! string keys. [`StateStorage`] is the seam: [`FileStorage`] keeps one file
//! per key in a state directory, [`MemoryStorage`] keeps everything in
//! memory for tests and embedders that persist elsewhere.

use crate::core::GuideError;
use crate::utils::fs::safe_write;
use anyhow::{Context, Result, anyhow};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Backend for persisted state payloads.
pub trait StateStorage: Send + Sync {
    /// Read the payload stored under `key`, `None` if nothing was stored.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the payload stored under `key`.
    fn save(&self, key: &str, payload: &str) -> Result<()>;
}

/// One JSON file per key inside a state directory.
///
/// Keys are mapped to file names by percent-escaping every byte outside
/// `[A-Za-z0-9_-]` as `%XX`, so `progress:42` lives in `progress%3A42.json`.
/// `%` itself is escaped too, which keeps distinct keys in distinct files.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
        }
    }

    /// The state directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the payload for `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut file_name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                file_name.push(char::from(byte));
            } else {
                file_name.push_str(&format!("%{byte:02X}"));
            }
        }
        self.dir.join(format!("{file_name}.json"))
    }
}

impl StateStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GuideError::from(e))
                .with_context(|| format!("Failed to read state file: {}", path.display())),
        }
    }

    fn save(&self, key: &str, payload: &str) -> Result<()> {
        safe_write(&self.path_for(key), payload)
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty storage behind an `Arc`, ready to hand to a store.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Raw payload under `key`, for inspection.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok().and_then(|entries| entries.get(key).cloned())
    }

    /// Put a raw payload, bypassing any encoding.
    pub fn insert(&self, key: impl Into<String>, payload: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.into(), payload.into());
        }
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| anyhow!("memory storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> Result<()> {
        let mut entries =
            self.entries.lock().map_err(|_| anyhow!("memory storage lock poisoned"))?;
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

/// Decode a payload into a set of member ids.
pub(crate) fn decode_members(key: &str, payload: &str) -> Result<BTreeSet<String>, GuideError> {
    serde_json::from_str::<Vec<String>>(payload).map(|ids| ids.into_iter().collect()).map_err(|e| {
        GuideError::PersistenceCorrupt {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Encode a member set as a sorted JSON array.
pub(crate) fn encode_members(members: &BTreeSet<String>) -> Result<String, GuideError> {
    Ok(serde_json::to_string(members)?)
}

/// A string set mirrored to one storage key.
///
/// Loading never fails: absent, unreadable or corrupt payloads produce an
/// empty set with a warning. Every mutation is flushed immediately; flush
/// failures are logged and the in-memory state stays authoritative.
pub(crate) struct PersistedSet {
    key: String,
    storage: Arc<dyn StateStorage>,
    members: BTreeSet<String>,
}

impl PersistedSet {
    pub(crate) fn load(storage: Arc<dyn StateStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let members = match storage.load(&key) {
            Ok(Some(payload)) => match decode_members(&key, &payload) {
                Ok(members) => members,
                Err(e) => {
                    tracing::warn!("{e}; starting from an empty set");
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                tracing::warn!("Failed to load state '{key}': {e:#}; starting from an empty set");
                BTreeSet::new()
            }
        };

        Self {
            key,
            storage,
            members,
        }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn contains(&self, member: &str) -> bool {
        self.members.contains(member)
    }

    pub(crate) fn members(&self) -> &BTreeSet<String> {
        &self.members
    }

    /// Flip membership and flush. Returns whether `member` is now present.
    pub(crate) fn toggle(&mut self, member: &str) -> bool {
        let present = if self.members.remove(member) {
            false
        } else {
            self.members.insert(member.to_string());
            true
        };
        self.flush();
        present
    }

    pub(crate) fn clear(&mut self) {
        self.members.clear();
        self.flush();
    }

    fn flush(&self) {
        let result = encode_members(&self.members)
            .map_err(anyhow::Error::from)
            .and_then(|payload| self.storage.save(&self.key, &payload));
        if let Err(e) = result {
            tracing::warn!("Failed to save state '{}': {e:#}", self.key);
        }
    }
}
