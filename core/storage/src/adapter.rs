//! Storage adapter contract and the engine-delegating base adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use strata_common::Result;

/// Descriptor for one entry produced by a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Path of the entry, relative to the backend root, `/`-separated.
    pub path: String,
    /// Size in bytes (None for directories).
    pub size: Option<u64>,
    /// Whether this is a directory.
    pub is_directory: bool,
    /// Last modification time, when the backend tracks one.
    pub modified: Option<DateTime<Utc>>,
}

/// Uniform contract every storage backend must satisfy.
///
/// Adapters are connected at construction time; a value of an
/// implementing type is always ready for use, so there is no separate
/// connect step on the trait. All operations are synchronous and run to
/// completion; concurrent use of one adapter is delegated to the
/// underlying engine handle.
pub trait StorageAdapter: Send + Sync {
    /// Driver alias this adapter was built for (e.g. "local", "memory").
    fn name(&self) -> &str;

    /// Enumerate content under `path`.
    ///
    /// When `recursive` is false, entries are restricted to the
    /// immediate level. Each call produces a fresh, finite listing.
    ///
    /// # Errors
    /// - `Error::Backend` if the engine cannot enumerate, including a
    ///   missing path
    fn list(&self, path: &str, recursive: bool) -> Result<Vec<Entry>>;

    /// Whether content exists at `path`.
    ///
    /// A missing path is a valid `false` result, never an error; only
    /// infrastructure failures (permission, connectivity) surface.
    fn exists(&self, path: &str) -> Result<bool>;

    /// Read the full content addressed by `path`.
    ///
    /// # Errors
    /// - `Error::NotFound` if nothing exists at `path`
    /// - backend-class errors for other I/O failures
    fn get(&self, path: &str) -> Result<Vec<u8>>;

    /// Write `content` at `path`, creating or overwriting
    /// unconditionally. No partial-write guarantee beyond what the
    /// backend itself provides.
    fn put(&self, path: &str, content: &[u8]) -> Result<()>;

    /// Remove the content at `path`.
    ///
    /// The built-in backends treat a missing path as a benign no-op;
    /// third-party engines may differ.
    fn delete(&self, path: &str) -> Result<()>;
}

/// Contract for the engine handle a backend connects to.
///
/// This is the seam to the layer that actually performs I/O. The core
/// never reaches past it: byte persistence, teardown and concurrent
/// access all belong to the engine.
pub trait StorageEngine: Send + Sync {
    /// Enumerate content under `path`.
    fn list(&self, path: &str, recursive: bool) -> Result<Vec<Entry>>;
    /// Whether content exists at `path`.
    fn exists(&self, path: &str) -> Result<bool>;
    /// Read the content at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>>;
    /// Create or overwrite the content at `path`.
    fn write(&self, path: &str, content: &[u8]) -> Result<()>;
    /// Remove the content at `path`.
    fn remove(&self, path: &str) -> Result<()>;
}

/// Base adapter delegating every data operation to an engine handle.
///
/// Concrete backends supply only the connect step: a closure that turns
/// configuration into an engine handle. Construction is two-phase and
/// atomic — if the closure fails, no adapter is produced, so a value of
/// this type is always connected. The handle is established exactly
/// once and never swapped for the adapter's lifetime.
pub struct EngineAdapter {
    name: String,
    config: Value,
    engine: Box<dyn StorageEngine>,
}

impl EngineAdapter {
    /// Build an adapter by connecting an engine from configuration.
    ///
    /// # Errors
    /// Whatever `connect` raises propagates unchanged; the caller never
    /// observes a partially-initialized adapter.
    pub fn connect<F>(name: impl Into<String>, config: Value, connect: F) -> Result<Self>
    where
        F: FnOnce(&Value) -> Result<Box<dyn StorageEngine>>,
    {
        let name = name.into();
        let engine = connect(&config)?;
        debug!(driver = %name, "Storage adapter connected");
        Ok(Self {
            name,
            config,
            engine,
        })
    }

    /// Configuration this adapter was constructed with.
    pub fn config(&self) -> &Value {
        &self.config
    }
}

impl StorageAdapter for EngineAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn list(&self, path: &str, recursive: bool) -> Result<Vec<Entry>> {
        debug!(driver = %self.name, path, recursive, "Listing content");
        self.engine.list(path, recursive)
    }

    fn exists(&self, path: &str) -> Result<bool> {
        self.engine.exists(path)
    }

    fn get(&self, path: &str) -> Result<Vec<u8>> {
        debug!(driver = %self.name, path, "Reading content");
        self.engine.read(path)
    }

    fn put(&self, path: &str, content: &[u8]) -> Result<()> {
        debug!(driver = %self.name, path, size = content.len(), "Writing content");
        self.engine.write(path, content)
    }

    fn delete(&self, path: &str) -> Result<()> {
        debug!(driver = %self.name, path, "Deleting content");
        self.engine.remove(path)
    }
}
