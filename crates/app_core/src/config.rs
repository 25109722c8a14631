//! Application configuration and the tag sidecar file

use crate::tag_manager::TagManager;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the sidecar file in the user's home directory
pub const TAGS_FILE_NAME: &str = ".photorenamerconfig";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Folder browsed at startup
    pub start_folder: PathBuf,
    /// Where the tabs are persisted
    pub tags_file: PathBuf,
    /// Send deleted images to the trash instead of removing them
    pub use_trash: bool,
    /// Ask before deleting an image or closing a tab; when off both happen at once
    pub confirm_delete: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_folder: PathBuf::from("."),
            tags_file: Self::default_tags_file(),
            use_trash: true,
            confirm_delete: true,
        }
    }
}

impl AppConfig {
    /// Configuration browsing `start_folder`
    pub fn with_start_folder(start_folder: impl Into<PathBuf>) -> Self {
        Self {
            start_folder: start_folder.into(),
            ..Default::default()
        }
    }

    /// `~/.photorenamerconfig`, or the working directory without a home
    pub fn default_tags_file() -> PathBuf {
        dirs_next::home_dir()
            .map(|home| home.join(TAGS_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(TAGS_FILE_NAME))
    }

    pub fn tag_store(&self) -> TagStore {
        TagStore::new(&self.tags_file)
    }
}

/// Reads and writes the tabs as JSON
#[derive(Debug, Clone)]
pub struct TagStore {
    path: PathBuf,
}

impl TagStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored tabs. Missing, unreadable or malformed files give the
    /// default tabs.
    pub fn load(&self) -> TagManager {
        if !self.path.is_file() {
            tracing::info!("No tag file at {:?}", self.path);
            return TagManager::restore(None);
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                tracing::info!("Tags loaded from {:?}", self.path);
                TagManager::restore(Some(&content))
            }
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", self.path, e);
                TagManager::restore(None)
            }
        }
    }

    /// Save tabs to file
    pub fn save(&self, manager: &TagManager) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = manager.to_json()?;
        std::fs::write(&self.path, content)?;

        tracing::info!("Tags saved to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{GroupKind, TagGroup};

    #[test]
    fn test_default_config() {
        let config = AppConfig::with_start_folder("/photos");
        assert_eq!(config.start_folder, PathBuf::from("/photos"));
        assert!(config.use_trash);
        assert!(config.confirm_delete);
        assert!(config.tags_file.ends_with(TAGS_FILE_NAME));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TagStore::new(dir.path().join("nested").join(TAGS_FILE_NAME));

        let mut manager = TagManager::default();
        let idx = manager.add_group(GroupKind::Date, "day");
        if let Some(TagGroup::Date(date)) = manager.group_mut(idx) {
            date.set_pattern("DD");
        }
        store.save(&manager).unwrap();

        assert_eq!(store.load(), manager);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = TagStore::new(dir.path().join(TAGS_FILE_NAME));
        assert_eq!(store.load(), TagManager::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TAGS_FILE_NAME);
        std::fs::write(&path, r#"[{"name": "date", "type": "Calendar", "content": "YY"}]"#).unwrap();
        assert_eq!(TagStore::new(&path).load(), TagManager::default());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"use_trash": false}"#).unwrap();
        assert!(!config.use_trash);
        assert!(config.confirm_delete);
    }
}
