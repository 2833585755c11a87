//! Collection source listing the entries of a directory
//!
//! Every entry becomes a record:
//!
//! ```text
//! { "name": "a.txt", "fullpath": "/root/a.txt", "type": "file", "size": 12, "mtime": "Mon Oct 19 10:02:11 2026" }
//! ```
//!
//! `size` is `null` for directories. Hidden entries (starting with `.`)
//! are skipped.

use crate::core::error::SourceError;
use crate::core::record::{Collection, Record, field_str};
use crate::core::store::CollectionSource;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Names starting with this marker are not listed
pub const HIDDEN_MARKER: char = '.';

/// Layout of the `mtime` field (same as C `asctime`)
pub const MTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Value of the `type` field for directories
pub const DIRECTORY_TYPE: &str = "directory";

/// Value of the `type` field for everything else
pub const FILE_TYPE: &str = "file";

/// Directory listing loaded once and cached
pub struct DirectorySource {
    name: String,
    path: PathBuf,
    cache: OnceCell<Collection>,
}

impl DirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            path,
            cache: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Collection, SourceError> {
        let mut dir = tokio::fs::read_dir(&self.path)
            .await
            .map_err(|e| SourceError::from_io(&self.path, e))?;

        let mut records = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| SourceError::from_io(&self.path, e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(HIDDEN_MARKER) {
                continue;
            }

            let fullpath = entry.path();
            // follows symlinks; dangling links are left out
            let metadata = match tokio::fs::metadata(&fullpath).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::debug!(path = %fullpath.display(), error = %e, "skipping entry");
                    continue;
                }
            };

            records.push(entry_record(&name, &fullpath, &metadata));
        }

        records.sort_by(|a, b| entry_name(a).cmp(entry_name(b)));

        tracing::debug!(path = %self.path.display(), entries = records.len(), "directory listed");

        Ok(Arc::new(records))
    }
}

#[async_trait]
impl CollectionSource for DirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_all(&self) -> Result<Collection, SourceError> {
        self.cache
            .get_or_try_init(|| self.load())
            .await
            .map(Arc::clone)
    }

    fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }
}

/// Whether a listing record describes a directory
pub fn is_directory(record: &Record) -> bool {
    field_str(record, "type") == Some(DIRECTORY_TYPE)
}

/// Move directories ahead of files, keeping the order within each group
pub fn directories_first(records: Vec<&Record>) -> Vec<&Record> {
    let (mut directories, files): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|record| is_directory(record));
    directories.extend(files);
    directories
}

fn entry_name(record: &Record) -> &str {
    field_str(record, "name").unwrap_or_default()
}

fn entry_record(name: &str, fullpath: &Path, metadata: &std::fs::Metadata) -> Record {
    let (kind, size) = if metadata.is_dir() {
        (DIRECTORY_TYPE, Value::Null)
    } else {
        (FILE_TYPE, json!(metadata.len()))
    };

    let mtime = metadata
        .modified()
        .map(|time| DateTime::<Local>::from(time).format(MTIME_FORMAT).to_string())
        .map(Value::String)
        .unwrap_or(Value::Null);

    let mut record = Record::new();
    record.insert("name".to_string(), json!(name));
    record.insert("fullpath".to_string(), json!(fullpath.display().to_string()));
    record.insert("type".to_string(), json!(kind));
    record.insert("size".to_string(), size);
    record.insert("mtime".to_string(), mtime);
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.txt"), "hello").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::write(dir.path().join(".hidden"), "secret").unwrap();
        std::fs::create_dir(dir.path().join("photos")).unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_lists_visible_entries() {
        let dir = fixture();
        let source = DirectorySource::new(dir.path());
        let records = source.get_all().await.unwrap();

        let names: Vec<&str> = records.iter().map(entry_name).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "photos"]);
    }

    #[tokio::test]
    async fn test_entry_fields() {
        let dir = fixture();
        let source = DirectorySource::new(dir.path());
        let records = source.get_all().await.unwrap();

        let file = &records[1];
        assert_eq!(file["type"], "file");
        assert_eq!(file["size"], 5);
        assert_eq!(
            file["fullpath"],
            dir.path().join("b.txt").display().to_string()
        );
        assert!(file["mtime"].is_string());

        let folder = &records[2];
        assert_eq!(folder["type"], "directory");
        assert!(folder["size"].is_null());

        let keys: Vec<&String> = folder.keys().collect();
        assert_eq!(keys, vec!["name", "fullpath", "type", "size", "mtime"]);
    }

    #[tokio::test]
    async fn test_listing_is_cached() {
        let dir = fixture();
        let source = DirectorySource::new(dir.path());
        let first = source.get_all().await.unwrap();

        std::fs::write(dir.path().join("c.txt"), "late").unwrap();
        let second = source.get_all().await.unwrap();
        assert_eq!(second.len(), 3);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let source = DirectorySource::new("/no/such/folder");
        assert!(matches!(
            source.get_all().await,
            Err(SourceError::NotFound { .. })
        ));
    }

    #[test]
    fn test_directories_first_is_stable() {
        let records: Vec<Record> = serde_json::from_value(json!([
            { "name": "z.txt", "type": "file" },
            { "name": "b", "type": "directory" },
            { "name": "a.txt", "type": "file" },
            { "name": "a", "type": "directory" }
        ]))
        .unwrap();

        let ordered = directories_first(records.iter().collect());
        let names: Vec<&str> = ordered.iter().map(|r| entry_name(r)).collect();
        assert_eq!(names, vec!["b", "a", "z.txt", "a.txt"]);
    }
}
