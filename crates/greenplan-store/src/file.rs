//! JSON file design store
//!
//! Layout of the store directory:
//!
//! ```text
//! <root>/latest.json                      most recent outcome
//! <root>/history/design_<stamp>.json      every outcome it replaced
//! <root>/configurations/<id>_config_<n>.json
//! ```
//!
//! Written files are pretty-printed and keep non-ASCII text as is.

use chrono::Local;
use greenplan_core::error::{GreenplanError, Result};
use greenplan_core::models::{DesignOutcome, DesignResult};
use greenplan_core::ports::DesignStore;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::outcome_id;

const LATEST_FILE: &str = "latest.json";
const HISTORY_DIR: &str = "history";
const CONFIGURATIONS_DIR: &str = "configurations";

/// Design store backed by a directory of JSON files
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `root`; directories are created on first save
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn latest_path(&self) -> PathBuf {
        self.root.join(LATEST_FILE)
    }

    pub fn history_dir(&self) -> PathBuf {
        self.root.join(HISTORY_DIR)
    }

    /// Write every configuration of `result` to its own file
    ///
    /// Each file carries the result's shared sections and one
    /// `configuration` entry in place of the full list.
    pub fn export_configurations(&self, result: &DesignResult) -> Result<Vec<PathBuf>> {
        let dir = self.root.join(CONFIGURATIONS_DIR);
        fs::create_dir_all(&dir)?;

        let mut common = match serde_json::to_value(result)? {
            Value::Object(map) => map,
            _ => return Err(GreenplanError::Serialization("design result is not an object".into())),
        };
        common.remove("configurations");

        let mut written = Vec::with_capacity(result.configurations.len());
        for (n, configuration) in result.configurations.iter().enumerate() {
            let mut document = common.clone();
            document.insert("configuration".to_string(), serde_json::to_value(configuration)?);

            let path = dir.join(format!("{}_config_{}.json", result.meta_info.id, n + 1));
            write_json(&path, &Value::Object(document))?;
            written.push(path);
        }

        tracing::info!(count = written.len(), dir = %dir.display(), "Exported configurations");
        Ok(written)
    }

    /// Move the current latest file into the history directory
    fn archive_latest(&self) -> Result<Option<PathBuf>> {
        let latest = self.latest_path();
        if !latest.exists() {
            return Ok(None);
        }

        let history = self.history_dir();
        fs::create_dir_all(&history)?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let mut target = history.join(format!("design_{}.json", stamp));
        let mut suffix = 1;
        while target.exists() {
            target = history.join(format!("design_{}_{:03}.json", stamp, suffix));
            suffix += 1;
        }

        fs::rename(&latest, &target)?;
        tracing::debug!(path = %target.display(), "Archived previous design");
        Ok(Some(target))
    }
}

impl DesignStore for JsonFileStore {
    fn save(&self, outcome: &DesignOutcome) -> Result<Uuid> {
        fs::create_dir_all(&self.root)?;
        self.archive_latest()?;

        let path = self.latest_path();
        write_json(&path, outcome)?;

        let id = outcome_id(outcome);
        tracing::info!(%id, path = %path.display(), "Saved design outcome");
        Ok(id)
    }

    fn latest(&self) -> Result<Option<DesignOutcome>> {
        let path = self.latest_path();
        if !path.exists() {
            return Ok(None);
        }
        read_outcome(&path).map(Some)
    }

    fn history(&self) -> Result<Vec<DesignOutcome>> {
        let mut outcomes = Vec::new();

        let history = self.history_dir();
        if history.exists() {
            let mut files: Vec<PathBuf> = fs::read_dir(&history)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .collect();
            files.sort();

            for path in files {
                outcomes.push(read_outcome(&path)?);
            }
        }

        if let Some(latest) = self.latest()? {
            outcomes.push(latest);
        }

        Ok(outcomes)
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}

fn read_outcome(path: &Path) -> Result<DesignOutcome> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        GreenplanError::Storage(format!("Failed to read design from {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use tempfile::TempDir;

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("results"));
        assert!(store.latest().unwrap().is_none());
        assert!(store.history().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload_latest() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let outcome = fixtures::completed();

        let id = store.save(&outcome).unwrap();
        assert_eq!(id, outcome.result().unwrap().meta_info.id);
        assert!(store.latest_path().exists());
        assert_eq!(store.latest().unwrap(), Some(outcome));
    }

    #[test]
    fn test_previous_latest_moves_to_history() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save(&fixtures::failure("first")).unwrap();
        store.save(&fixtures::failure("second")).unwrap();
        store.save(&fixtures::failure("third")).unwrap();

        let archived = fs::read_dir(store.history_dir()).unwrap().count();
        assert_eq!(archived, 2);

        let errors: Vec<String> = store
            .history()
            .unwrap()
            .into_iter()
            .map(|outcome| outcome.failure().unwrap().error.clone())
            .collect();
        assert_eq!(errors, ["first", "second", "third"]);
    }

    #[test]
    fn test_saved_file_keeps_chinese_text() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save(&fixtures::completed()).unwrap();

        let content = fs::read_to_string(store.latest_path()).unwrap();
        assert!(content.contains("客廳在位置A"));
        assert!(content.contains("\"status\": \"completed\""));
    }

    #[test]
    fn test_export_one_file_per_configuration() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let outcome = fixtures::completed();
        let result = outcome.result().unwrap();

        let paths = store.export_configurations(result).unwrap();
        assert_eq!(paths.len(), 2);

        let content = fs::read_to_string(&paths[1]).unwrap();
        let document: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(document["configuration"]["name"], "Compact");
        assert!(document.get("configurations").is_none());
        assert!(document.get("meta_info").is_some());
        assert!(document.get("design_data").is_some());
        assert!(document.get("room_environment_rules").is_some());
        assert_eq!(document["summary"]["configuration_count"], 2);
    }

    #[test]
    fn test_corrupt_latest_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.latest_path(), "{ not json").unwrap();

        let err = store.latest().unwrap_err();
        assert!(matches!(err, GreenplanError::Storage(_)));
    }
}
