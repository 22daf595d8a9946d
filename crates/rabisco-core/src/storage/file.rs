//! File-based storage for native platforms.

use super::{FileError, FileResult, export_filename, export_json, import_json};
use crate::canvas::CanvasState;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Saves exports as timestamped JSON files in a directory.
pub struct FileStorage {
    /// Directory that receives exports.
    base_path: PathBuf,
    /// File name prefix.
    prefix: String,
}

impl FileStorage {
    /// Create a storage writing into `base_path`, creating it if needed.
    pub fn new(base_path: PathBuf) -> FileResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                FileError::SerializationFailure(format!(
                    "Failed to create {}: {}",
                    base_path.display(),
                    e
                ))
            })?;
        }
        Ok(Self {
            base_path,
            prefix: "Rabisco".to_string(),
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write `state` to a file named after `now`; returns its path.
    pub fn save(&self, state: &CanvasState, now: DateTime<Utc>) -> FileResult<PathBuf> {
        let json = export_json(state)?;
        let path = self.base_path.join(export_filename(&self.prefix, now));
        fs::write(&path, json).map_err(|e| {
            log::error!("Failed to write {}: {}", path.display(), e);
            FileError::SerializationFailure(format!("Failed to write {}: {}", path.display(), e))
        })?;
        log::info!("Saved canvas to {}", path.display());
        Ok(path)
    }

    /// Read and decode the file at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> FileResult<CanvasState> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            log::error!("Failed to read {}: {}", path.display(), e);
            FileError::ReadFailure(format!("Failed to read {}: {}", path.display(), e))
        })?;
        import_json(&json)
    }

    /// JSON files in the storage directory, sorted by name (oldest export first).
    pub fn list(&self) -> FileResult<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            FileError::ReadFailure(format!("Failed to read directory: {}", e))
        })?;
        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{BoxShape, DrawingElement, Shape};
    use chrono::TimeZone;
    use kurbo::Vec2;
    use tempfile::tempdir;

    fn state() -> CanvasState {
        CanvasState {
            elements: vec![
                DrawingElement::new(
                    Shape::Rectangle(BoxShape::new(1.0, 2.0, 3.0, 4.0)),
                    "#FFFFFF",
                    2.0,
                )
                .with_id("r1"),
            ],
            zoom: 1.0,
            pan: Vec2::new(5.0, 6.0),
        }
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        let saved = state();
        let path = storage.save(&saved, now).unwrap();
        assert_eq!(path.file_name().unwrap(), "Rabisco_2025-01-02_030405.json");
        assert_eq!(storage.load(&path).unwrap(), saved);
        assert_eq!(storage.load(&path).unwrap(), state());
    }

    #[test]
    fn test_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }

    #[test]
    fn test_load_missing_file_is_read_failure() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let result = storage.load(dir.path().join("nope.json"));
        assert!(matches!(result, Err(FileError::ReadFailure(_))));
    }

    #[test]
    fn test_load_invalid_contents() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"elements": "not-an-array"}"#).unwrap();
        assert!(matches!(storage.load(&path), Err(FileError::InvalidFormat(_))));
    }

    #[test]
    fn test_list_with_prefix() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap().with_prefix("Board");
        storage
            .save(&state(), Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap())
            .unwrap();
        storage
            .save(&state(), Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
            .unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let names: Vec<String> = storage
            .list()
            .unwrap()
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect();
        assert_eq!(
            names,
            vec!["Board_2025-01-01_000000.json", "Board_2025-01-02_000000.json"]
        );
    }
}
