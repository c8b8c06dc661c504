//! Local-disk storage backend.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::adapter::{EngineAdapter, Entry, StorageEngine};
use strata_common::{path, Error, Result};

/// Engine handle storing content in a local directory tree.
///
/// Every incoming path is canonicalized and resolved under the root;
/// absolute prefixes are stripped so callers cannot address content
/// outside the backend.
pub struct LocalEngine {
    root: PathBuf,
}

impl LocalEngine {
    /// Create an engine rooted at `root`, creating the directory if it
    /// does not exist.
    ///
    /// # Errors
    /// - Root cannot be created (invalid path, permission denied)
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.exists() {
            fs::create_dir_all(&root)?;
        }

        Ok(Self { root })
    }

    /// Canonical root-relative form of a caller path.
    fn relative(path: &str) -> Result<String> {
        let normalized = path::normalize(path);
        let rest = &normalized[path::absolute_prefix(&normalized).len()..];
        if rest == ".." || rest.starts_with("../") {
            return Err(Error::Backend(format!(
                "path '{}' escapes the backend root",
                path
            )));
        }
        Ok(rest.to_string())
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut fs_path = self.root.clone();
        for segment in Self::relative(path)?.split('/').filter(|s| !s.is_empty()) {
            fs_path.push(segment);
        }
        Ok(fs_path)
    }

    fn collect(&self, dir: &Path, rel: &str, recursive: bool, out: &mut Vec<Entry>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let rel_path = if rel.is_empty() {
                name
            } else {
                format!("{}/{}", rel, name)
            };

            let meta = entry.metadata()?;
            let modified = meta.modified().ok().map(DateTime::<Utc>::from);
            out.push(Entry {
                path: rel_path.clone(),
                size: meta.is_file().then(|| meta.len()),
                is_directory: meta.is_dir(),
                modified,
            });

            if recursive && meta.is_dir() {
                self.collect(&entry.path(), &rel_path, recursive, out)?;
            }
        }
        Ok(())
    }
}

impl StorageEngine for LocalEngine {
    fn list(&self, path: &str, recursive: bool) -> Result<Vec<Entry>> {
        let dir = self.resolve(path)?;
        if !dir.is_dir() {
            return Err(Error::Backend(format!(
                "cannot list '{}': not a directory",
                path
            )));
        }

        let mut entries = Vec::new();
        self.collect(&dir, &Self::relative(path)?, recursive, &mut entries)?;
        Ok(entries)
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path)?.exists())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let fs_path = self.resolve(path)?;

        if !fs_path.exists() {
            return Err(Error::NotFound(format!("File not found: {}", path)));
        }
        if fs_path.is_dir() {
            return Err(Error::Backend(format!(
                "cannot read '{}': is a directory",
                path
            )));
        }

        Ok(fs::read(&fs_path)?)
    }

    fn write(&self, path: &str, content: &[u8]) -> Result<()> {
        let fs_path = self.resolve(path)?;

        if let Some(parent) = fs_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&fs_path, content)?;
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<()> {
        let fs_path = self.resolve(path)?;

        // Deleting a missing path is a benign no-op.
        if !fs_path.exists() {
            return Ok(());
        }

        if fs_path.is_dir() {
            fs::remove_dir_all(&fs_path)?;
        } else {
            fs::remove_file(&fs_path)?;
        }
        Ok(())
    }
}

/// Connect a local-disk adapter from configuration.
///
/// Recognized options:
///
/// | key | effect |
/// |---|---|
/// | `path` | required; root directory, created if missing |
pub fn connect(config: &Value) -> Result<EngineAdapter> {
    EngineAdapter::connect("local", config.clone(), |config| {
        let root = config.get("path").and_then(Value::as_str).ok_or_else(|| {
            Error::Configuration("local driver requires a 'path' option".to_string())
        })?;
        Ok(Box::new(LocalEngine::new(root)?) as Box<dyn StorageEngine>)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StorageAdapter;
    use serde_json::json;
    use tempfile::TempDir;

    fn local_adapter(temp: &TempDir) -> EngineAdapter {
        connect(&json!({
            "type": "local",
            "path": temp.path().to_str().unwrap(),
        }))
        .unwrap()
    }

    #[test]
    fn test_put_get_round_trip() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);
        let data = b"Hello, Local!".to_vec();

        adapter.put("test.txt", &data).unwrap();
        assert_eq!(adapter.get("test.txt").unwrap(), data);
    }

    #[test]
    fn test_put_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);

        adapter.put("a/b/c.txt", b"nested").unwrap();
        assert_eq!(adapter.get("a/b/c.txt").unwrap(), b"nested");
    }

    #[test]
    fn test_paths_are_normalized_before_use() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);

        adapter.put("a\\b\\file.txt", b"x").unwrap();
        assert_eq!(adapter.get("a/x/../b/./file.txt").unwrap(), b"x");
        assert!(adapter.exists("/a/b/file.txt").unwrap());
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);

        let err = adapter.get("absent.txt").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_exists_missing_is_false_not_error() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);

        assert!(!adapter.exists("absent.txt").unwrap());

        adapter.put("present.txt", b"1").unwrap();
        assert!(adapter.exists("present.txt").unwrap());
    }

    #[test]
    fn test_delete_then_exists_is_false() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);

        adapter.put("doomed.txt", b"1").unwrap();
        adapter.delete("doomed.txt").unwrap();
        assert!(!adapter.exists("doomed.txt").unwrap());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);

        adapter.delete("never-existed.txt").unwrap();
    }

    #[test]
    fn test_list_immediate_level_only() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);

        adapter.put("dir/file1.txt", b"1").unwrap();
        adapter.put("dir/sub/file2.txt", b"2").unwrap();

        let entries = adapter.list("dir", false).unwrap();
        let mut paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["dir/file1.txt", "dir/sub"]);
    }

    #[test]
    fn test_list_recursive() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);

        adapter.put("dir/file1.txt", b"1").unwrap();
        adapter.put("dir/sub/file2.txt", b"2").unwrap();

        let entries = adapter.list("dir", true).unwrap();
        let mut paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["dir/file1.txt", "dir/sub", "dir/sub/file2.txt"]);
    }

    #[test]
    fn test_list_missing_is_backend_error() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);

        let result = adapter.list("no-such-dir", false);
        assert!(matches!(result, Err(Error::Backend(_))));
    }

    #[test]
    fn test_escaping_paths_are_rejected() {
        let temp = TempDir::new().unwrap();
        let adapter = local_adapter(&temp);

        let result = adapter.get("../outside.txt");
        assert!(matches!(result, Err(Error::Backend(_))));
    }

    #[test]
    fn test_connect_without_path_option_fails() {
        let result = connect(&json!({"type": "local"}));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_failed_connect_yields_no_adapter() {
        let temp = TempDir::new().unwrap();
        // A file where a directory is required makes root creation fail.
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"file").unwrap();
        let root = blocker.join("sub");

        let result = connect(&json!({
            "type": "local",
            "path": root.to_str().unwrap(),
        }));
        assert!(result.is_err());
    }
}
