use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// What: Error raised by a [`BlobStore`] backend.
///
/// Inputs: Generated by blob store implementations.
///
/// Output: Implements `Display`/`Error`; callers treat it as non-fatal.
#[derive(Debug)]
pub enum BlobError {
    /// Filesystem failure on the given path.
    Io {
        /// File backing the key.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The backend refused the write (e.g. quota exhausted).
    Rejected(String),
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Rejected(reason) => write!(f, "storage rejected write: {reason}"),
        }
    }
}

impl std::error::Error for BlobError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Rejected(_) => None,
        }
    }
}

/// Key-value blob storage used to persist small serialized values.
pub trait BlobStore {
    /// Read the blob stored under `key`; `Ok(None)` when absent.
    ///
    /// # Errors
    /// Returns [`BlobError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, BlobError>;

    /// Store `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    /// Returns [`BlobError`] when the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), BlobError>;

    /// Remove the blob under `key`; removing a missing key succeeds.
    ///
    /// # Errors
    /// Returns [`BlobError`] when the removal fails.
    fn clear(&mut self, key: &str) -> Result<(), BlobError>;
}

/// Blob store keeping one `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileBlobStore {
    /// Directory holding the blob files.
    dir: PathBuf,
}

impl FileBlobStore {
    /// Create a store rooted at `dir`. The directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(BlobError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BlobError> {
        let path = self.path_for(key);
        if let Err(source) = fs::create_dir_all(&self.dir) {
            return Err(BlobError::Io {
                path: self.dir.clone(),
                source,
            });
        }
        tracing::debug!(
            path = %path.display(),
            bytes = value.len(),
            "[Persist] Writing blob to disk"
        );
        fs::write(&path, value).map_err(|source| BlobError::Io { path, source })
    }

    fn clear(&mut self, key: &str) -> Result<(), BlobError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(BlobError::Io { path, source }),
        }
    }
}

/// In-memory blob store, with an optional write refusal switch for failure paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    /// Stored blobs.
    entries: HashMap<String, String>,
    /// When set, `set` fails with [`BlobError::Rejected`].
    pub reject_writes: bool,
}

impl MemoryBlobStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one blob.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self {
            entries,
            reject_writes: false,
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BlobError> {
        if self.reject_writes {
            return Err(BlobError::Rejected("quota exceeded".into()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), BlobError> {
        self.entries.remove(key);
        Ok(())
    }
}
