//! Configuration file handling for painel.
//!
//! The configuration file is stored at `$PAINEL_HOME/config.json` and holds
//! the settings of the application. Entity snapshots live next to it, one
//! JSON file per store key, and the `.secrets` subdirectory holds the
//! session and local account files.

use crate::store::Store;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "painel";
const CONFIG_VERSION: u8 = 1;
const SECRETS: &str = ".secrets";
const CONFIG_JSON: &str = "config.json";
const SESSION_JSON: &str = "session.json";
const USERS_JSON: &str = "users.json";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$PAINEL_HOME` and from there it
/// loads `$PAINEL_HOME/config.json`. It provides paths to the items that are
/// expected in certain locations within the painel home directory, and the
/// [`Store`] every collection persists through.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    secrets: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    store: Store,
}

impl Config {
    /// Creates the painel home directory and its `.secrets` subdirectory,
    /// and writes an initial `config.json` with default settings.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory,
    ///   e.g. `$HOME/painel`.
    /// - `company_name` - Optional business name shown on the dashboard.
    ///
    /// # Errors
    /// - Returns an error if the directory is already initialized or any
    ///   file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, company_name: Option<String>) -> Result<Self> {
        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the painel home directory")?;

        // Canonicalize the directory path
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.is_file() {
            bail!(
                "The painel home at '{}' is already initialized",
                root.display()
            );
        }

        // Create the secrets subdirectory
        let secrets = root.join(SECRETS);
        utils::make_dir(&secrets).await?;

        // Create and save an initial ConfigFile in the data directory
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            company_name,
        };
        config_file.save(&config_path).await?;

        let store = Store::new(root.clone());
        Ok(Self {
            root,
            secrets,
            config_path,
            config_file,
            store,
        })
    }

    /// This will
    /// - validate that the `painel_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the secrets directory exists
    /// - return the loaded configuration object
    pub async fn load(painel_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = painel_home.into();
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}'. Run 'painel init' first.",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let secrets = root.join(SECRETS);
        if !secrets.is_dir() {
            bail!("The secrets directory is missing '{}'", secrets.display())
        }

        let store = Store::new(root.clone());
        Ok(Self {
            root,
            secrets,
            config_path,
            config_file,
            store,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn secrets(&self) -> &Path {
        &self.secrets
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn company_name(&self) -> Option<&str> {
        self.config_file.company_name.as_deref()
    }

    /// Path of the persisted sign-in session.
    pub fn session_path(&self) -> PathBuf {
        self.secrets.join(SESSION_JSON)
    }

    /// Path of the local account registry.
    pub fn users_path(&self) -> PathBuf {
        self.secrets.join(USERS_JSON)
    }
}

/// Represents the serialization and deserialization format of the
/// configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "painel",
///   "config_version": 1,
///   "company_name": "Silva Web Studio"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "painel"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Business name shown on the dashboard (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    company_name: Option<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            company_name: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("painel_home");

        let config = Config::create(&home_dir, Some("Silva Web Studio".to_string()))
            .await
            .unwrap();

        assert_eq!(config.company_name(), Some("Silva Web Studio"));
        assert!(config.config_path().is_file());
        assert!(config.secrets().is_dir());
    }

    #[tokio::test]
    async fn test_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("painel_home");
        Config::create(&home_dir, None).await.unwrap();
        let result = Config::create(&home_dir, None).await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("already initialized"));
    }

    #[tokio::test]
    async fn test_create_then_load() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("painel_home");
        Config::create(&home_dir, Some("Estúdio X".to_string()))
            .await
            .unwrap();

        let loaded = Config::load(&home_dir).await.unwrap();
        assert_eq!(loaded.company_name(), Some("Estúdio X"));
        assert!(loaded.session_path().starts_with(loaded.secrets()));
    }

    #[tokio::test]
    async fn test_load_without_init_fails() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");

        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1
        }"#;
        tokio::fs::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");

        let original = ConfigFile {
            company_name: Some("Agência Z".to_string()),
            ..Default::default()
        };
        original.save(&config_path).await.unwrap();
        let loaded = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let config = ConfigFile::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("company_name"));
    }
}
