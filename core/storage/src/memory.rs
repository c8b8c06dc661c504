//! In-memory storage backend for testing and development.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::adapter::{EngineAdapter, Entry, StorageEngine};
use strata_common::{path, Error, Result};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Vec<u8>,
    modified: DateTime<Utc>,
}

/// Engine handle keeping all content in memory.
///
/// Content is keyed by canonical path in a flat map; directories exist
/// implicitly as key prefixes. Everything is lost on drop.
pub struct MemoryEngine {
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryEngine {
    /// Create a new empty engine.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Canonical key for a caller path: normalized, prefix stripped.
    fn key(raw: &str) -> String {
        let normalized = path::normalize(raw);
        normalized[path::absolute_prefix(&normalized).len()..].to_string()
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine for MemoryEngine {
    fn list(&self, raw: &str, recursive: bool) -> Result<Vec<Entry>> {
        let key = Self::key(raw);
        let objects = self.objects.read().unwrap();

        let prefix = if key.is_empty() {
            String::new()
        } else {
            let prefix = format!("{}/", key);
            let is_dir = !objects.contains_key(&key)
                && objects.keys().any(|k| k.starts_with(prefix.as_str()));
            if !is_dir {
                return Err(Error::Backend(format!(
                    "cannot list '{}': not a directory",
                    raw
                )));
            }
            prefix
        };

        let mut entries = Vec::new();
        let mut dirs = BTreeSet::new();
        for (k, object) in objects.iter() {
            let Some(relative) = k.strip_prefix(prefix.as_str()) else {
                continue;
            };

            if relative.contains('/') {
                if recursive {
                    for (pos, _) in relative.match_indices('/') {
                        dirs.insert(format!("{}{}", prefix, &relative[..pos]));
                    }
                } else {
                    let first = &relative[..relative.find('/').unwrap_or(relative.len())];
                    dirs.insert(format!("{}{}", prefix, first));
                    continue;
                }
            }

            if recursive || !relative.contains('/') {
                entries.push(Entry {
                    path: k.clone(),
                    size: Some(object.data.len() as u64),
                    is_directory: false,
                    modified: Some(object.modified),
                });
            }
        }

        for dir in dirs {
            entries.push(Entry {
                path: dir,
                size: None,
                is_directory: true,
                modified: None,
            });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn exists(&self, raw: &str) -> Result<bool> {
        Ok(self.objects.read().unwrap().contains_key(&Self::key(raw)))
    }

    fn read(&self, raw: &str) -> Result<Vec<u8>> {
        self.objects
            .read()
            .unwrap()
            .get(&Self::key(raw))
            .map(|object| object.data.clone())
            .ok_or_else(|| Error::NotFound(format!("File not found: {}", raw)))
    }

    fn write(&self, raw: &str, content: &[u8]) -> Result<()> {
        self.objects.write().unwrap().insert(
            Self::key(raw),
            StoredObject {
                data: content.to_vec(),
                modified: Utc::now(),
            },
        );
        Ok(())
    }

    fn remove(&self, raw: &str) -> Result<()> {
        // Deleting a missing path is a benign no-op.
        self.objects.write().unwrap().remove(&Self::key(raw));
        Ok(())
    }
}

/// Connect an in-memory adapter from configuration.
///
/// No options are recognized; backend-specific keys are stored on the
/// adapter but otherwise ignored.
pub fn connect(config: &Value) -> Result<EngineAdapter> {
    EngineAdapter::connect("memory", config.clone(), |_| {
        Ok(Box::new(MemoryEngine::new()) as Box<dyn StorageEngine>)
    })
}
