/// Settings persistence
///
/// Loads the settings record once (defaults merged with whatever is on disk)
/// and writes the whole record back after every change.

use crate::error::Result;
use crate::vault::{normalize_path, resolve_folder, NoteTree};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Template offered for new notes
pub const DEFAULT_TEMPLATE: &str = "# {{Name}}\n\n**Description**: {{Description}}";

/// User settings
///
/// Field names match the persisted record. Missing fields fall back to
/// their defaults on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
    pub template: String,
    #[serde(rename = "contextFolders")]
    pub context_folders: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            template: DEFAULT_TEMPLATE.to_string(),
            context_folders: Vec::new(),
        }
    }
}

impl Settings {
    pub fn is_context_folder(&self, path: &str) -> bool {
        self.context_folders.iter().any(|p| p == path)
    }
}

/// Owns the settings record and its file
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load settings from `path`
    ///
    /// A missing file yields defaults; nothing is written until the first
    /// change.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let settings = match fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => Settings::default(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(Self { path, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn set_api_key(&mut self, api_key: &str) -> Result<()> {
        self.settings.api_key = api_key.to_string();
        self.save().await
    }

    pub async fn set_template(&mut self, template: &str) -> Result<()> {
        self.settings.template = template.to_string();
        self.save().await
    }

    /// Add or remove a folder from the context set
    ///
    /// Enabling requires `path` to be a folder right now. Returns whether the
    /// folder is a context folder afterwards.
    pub async fn set_context_folder(
        &mut self,
        tree: &dyn NoteTree,
        path: &str,
        enabled: bool,
    ) -> Result<bool> {
        let path = normalize_path(path)?;

        if enabled {
            let folder = resolve_folder(tree, &path).await?;
            if !self.settings.is_context_folder(&folder.path) {
                self.settings.context_folders.push(folder.path);
            }
        } else {
            self.settings.context_folders.retain(|p| p != &path);
        }

        self.save().await?;
        Ok(enabled)
    }

    /// Write the full record
    async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, json).await?;
        tracing::debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CreatorError;
    use crate::vault::MemoryVault;
    use tempfile::TempDir;

    fn settings_path(temp: &TempDir) -> PathBuf {
        temp.path().join(".character-creator").join("data.json")
    }

    #[tokio::test]
    async fn test_load_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::load(settings_path(&temp)).await.unwrap();

        assert_eq!(store.settings(), &Settings::default());
        assert_eq!(store.settings().template, DEFAULT_TEMPLATE);
        assert!(!settings_path(&temp).exists());
    }

    #[tokio::test]
    async fn test_load_merges_partial_record() {
        let temp = TempDir::new().unwrap();
        let path = settings_path(&temp);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"api_key":"sk-test"}"#).unwrap();

        let store = SettingsStore::load(&path).await.unwrap();
        assert_eq!(store.settings().api_key, "sk-test");
        assert_eq!(store.settings().template, DEFAULT_TEMPLATE);
        assert!(store.settings().context_folders.is_empty());
    }

    #[tokio::test]
    async fn test_load_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = SettingsStore::load(&path).await;
        assert!(matches!(result, Err(CreatorError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order() {
        let temp = TempDir::new().unwrap();
        let path = settings_path(&temp);
        let vault = MemoryVault::new();
        vault.add_folder("World");
        vault.add_folder("Lore");
        vault.add_folder("Characters");

        let mut store = SettingsStore::load(&path).await.unwrap();
        store.set_api_key("sk-123").await.unwrap();
        store.set_template("## {{Name}}").await.unwrap();
        store.set_context_folder(&vault, "World", true).await.unwrap();
        store.set_context_folder(&vault, "Lore", true).await.unwrap();
        store.set_context_folder(&vault, "Characters", true).await.unwrap();

        let reloaded = SettingsStore::load(&path).await.unwrap();
        assert_eq!(reloaded.settings().api_key, "sk-123");
        assert_eq!(reloaded.settings().template, "## {{Name}}");
        assert_eq!(
            reloaded.settings().context_folders,
            vec!["World", "Lore", "Characters"]
        );
    }

    #[tokio::test]
    async fn test_persisted_field_names() {
        let temp = TempDir::new().unwrap();
        let path = settings_path(&temp);
        let vault = MemoryVault::new();
        vault.add_folder("World");

        let mut store = SettingsStore::load(&path).await.unwrap();
        store.set_context_folder(&vault, "World", true).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["contextFolders"][0], "World");
        assert!(raw.get("api_key").is_some());
        assert!(raw.get("template").is_some());
    }

    #[tokio::test]
    async fn test_toggle_context_folder() {
        let temp = TempDir::new().unwrap();
        let vault = MemoryVault::new();
        vault.add_folder("World");

        let mut store = SettingsStore::load(settings_path(&temp)).await.unwrap();
        store.set_context_folder(&vault, "/World/", true).await.unwrap();
        store.set_context_folder(&vault, "World", true).await.unwrap();
        assert_eq!(store.settings().context_folders, vec!["World"]);

        let now = store.set_context_folder(&vault, "World", false).await.unwrap();
        assert!(!now);
        assert!(store.settings().context_folders.is_empty());
    }

    #[tokio::test]
    async fn test_enable_requires_folder() {
        let temp = TempDir::new().unwrap();
        let vault = MemoryVault::new();
        vault.add_file("Notes.md", "x");

        let mut store = SettingsStore::load(settings_path(&temp)).await.unwrap();
        let result = store.set_context_folder(&vault, "Notes.md", true).await;
        assert!(matches!(result, Err(CreatorError::NotAFolder(_))));

        let result = store.set_context_folder(&vault, "Missing", true).await;
        assert!(result.is_err());
        assert!(store.settings().context_folders.is_empty());
    }

    #[tokio::test]
    async fn test_disable_stale_path_without_folder() {
        let temp = TempDir::new().unwrap();
        let path = settings_path(&temp);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"contextFolders":["Gone","Kept"]}"#).unwrap();

        let vault = MemoryVault::new();
        let mut store = SettingsStore::load(&path).await.unwrap();
        store.set_context_folder(&vault, "Gone", false).await.unwrap();
        assert_eq!(store.settings().context_folders, vec!["Kept"]);
    }
}
