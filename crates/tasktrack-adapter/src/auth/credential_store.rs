/*
[INPUT]:  Credential key/value pairs and a storage path
[OUTPUT]: Durable (file) or process-local (memory) credential storage
[POS]:    Auth layer - persistence for the session token
[UPDATE]: When storage format or file location conventions change
*/

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::http::{Result, TasktrackError};

/// Key under which the bearer token is persisted
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Durable key-value store for credentials
pub trait CredentialStore: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Credentials kept as a JSON object in a single file
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at the platform data directory.
    ///
    /// Default: `<data_dir>/tasktrack/credentials.json`, or
    /// `./.tasktrack/credentials.json` when no data directory is known.
    pub fn at_default_location() -> Self {
        Self::new(default_credentials_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_error(&self.path, err)),
        }
    }

    fn parse(&self, content: &str) -> Result<BTreeMap<String, String>> {
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(content).map_err(|e| {
            TasktrackError::Storage(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match self.read()? {
            Some(content) => self.parse(&content),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Entries to rewrite on the next save, and whether an unparseable file
    /// was discarded to get them. A corrupt file never blocks a write.
    fn load_for_write(&self) -> Result<(BTreeMap<String, String>, bool)> {
        let Some(content) = self.read()? else {
            return Ok((BTreeMap::new(), false));
        };
        match self.parse(&content) {
            Ok(entries) => Ok((entries, false)),
            Err(err) => {
                warn!(error = %err, "discarding unreadable credentials file");
                Ok((BTreeMap::new(), true))
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
            }
        }

        let encoded = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, encoded).map_err(|e| storage_error(&self.path, e))?;
        restrict_permissions(&self.path)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let (mut entries, _) = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let (mut entries, discarded) = self.load_for_write()?;
        if entries.remove(key).is_some() || discarded {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// Credentials that live only as long as the process
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        guard.remove(key);
        Ok(())
    }
}

pub fn default_credentials_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("tasktrack").join("credentials.json"),
        None => PathBuf::from(".tasktrack").join("credentials.json"),
    }
}

fn storage_error(path: &Path, err: io::Error) -> TasktrackError {
    TasktrackError::Storage(format!("{}: {err}", path.display()))
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .map_err(|e| storage_error(path, e))?
        .permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms).map_err(|e| storage_error(path, e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
