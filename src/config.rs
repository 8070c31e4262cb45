/// Runtime configuration
///
/// Where the vault lives, where settings are stored, and which endpoint and
/// model to talk to. Resolved from the command line and environment; the
/// user's own settings live in the settings store.

use crate::error::{CreatorError, Result};
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Settings folder inside the vault; dot-prefixed so the tree never lists it
pub const SETTINGS_DIR: &str = ".character-creator";
pub const SETTINGS_FILE: &str = "data.json";

pub const ENV_VAULT: &str = "CHARACTER_CREATOR_VAULT";
pub const ENV_SETTINGS: &str = "CHARACTER_CREATOR_SETTINGS";
pub const ENV_API_BASE: &str = "OPENAI_BASE_URL";
pub const ENV_MODEL: &str = "CHARACTER_CREATOR_MODEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub vault_root: PathBuf,
    pub settings_path: PathBuf,
    pub api_base: String,
    pub model: String,
}

impl AppConfig {
    /// Resolve from the process environment
    pub fn from_env(vault_override: Option<PathBuf>) -> Result<Self> {
        Self::resolve(vault_override, |key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` for environment values
    ///
    /// Precedence for the vault: explicit override, then env, then the
    /// current directory.
    pub fn resolve<F>(vault_override: Option<PathBuf>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let vault_root = match vault_override.or_else(|| non_empty(ENV_VAULT).map(PathBuf::from)) {
            Some(path) => path,
            None => std::env::current_dir().map_err(|e| {
                CreatorError::Config(format!("cannot determine current directory: {}", e))
            })?,
        };

        let settings_path = non_empty(ENV_SETTINGS)
            .map(PathBuf::from)
            .unwrap_or_else(|| vault_root.join(SETTINGS_DIR).join(SETTINGS_FILE));

        let api_base = non_empty(ENV_API_BASE)
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let model = non_empty(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            vault_root,
            settings_path,
            api_base,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::resolve(Some(PathBuf::from("/vault")), lookup(&[])).unwrap();
        assert_eq!(config.vault_root, PathBuf::from("/vault"));
        assert_eq!(
            config.settings_path,
            PathBuf::from("/vault/.character-creator/data.json")
        );
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_env_overrides() {
        let env = lookup(&[
            (ENV_VAULT, "/notes"),
            (ENV_SETTINGS, "/etc/cc.json"),
            (ENV_API_BASE, "http://localhost:8080/v1/"),
            (ENV_MODEL, "gpt-4o-mini"),
        ]);
        let config = AppConfig::resolve(None, env).unwrap();
        assert_eq!(config.vault_root, PathBuf::from("/notes"));
        assert_eq!(config.settings_path, PathBuf::from("/etc/cc.json"));
        assert_eq!(config.api_base, "http://localhost:8080/v1");
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn test_flag_beats_env() {
        let env = lookup(&[(ENV_VAULT, "/notes")]);
        let config = AppConfig::resolve(Some(PathBuf::from("/flag")), env).unwrap();
        assert_eq!(config.vault_root, PathBuf::from("/flag"));
    }

    #[test]
    fn test_blank_env_ignored() {
        let env = lookup(&[(ENV_MODEL, "  ")]);
        let config = AppConfig::resolve(Some(PathBuf::from("/v")), env).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
