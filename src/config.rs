//! Configuration file handling.
//!
//! The configuration file is stored at `$VENTAS_HOME/config.json` and holds the settings that
//! outlive a single invocation, currently the default unit-price imputation method. The same
//! directory is where the engine keeps its data snapshot between sessions.

use crate::clean::ImputeMethod;
use crate::Result;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

const APP_NAME: &str = "ventas";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const SNAPSHOT_JSON: &str = "ventas.json";

/// The `Config` object represents the configuration of the app. You instantiate it by
/// providing the path to `$VENTAS_HOME` and from there it loads `$VENTAS_HOME/config.json`.
/// It provides the paths to the other items expected inside the data directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and an initial `config.json` with the given default
    /// imputation method.
    ///
    /// # Errors
    /// - Returns an error if the directory or the config file cannot be created.
    pub fn create(dir: impl Into<PathBuf>, method: ImputeMethod) -> Result<Self> {
        let maybe_relative = dir.into();
        std::fs::create_dir_all(&maybe_relative).with_context(|| {
            format!(
                "Unable to create the ventas home directory '{}'",
                maybe_relative.display()
            )
        })?;
        let root = canonicalize(&maybe_relative)?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            impute_method: method.to_string(),
        };
        config_file.save(&config_path)?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `ventas_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub fn load(ventas_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = ventas_home.into();
        let root = canonicalize(&maybe_relative)?;
        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run init first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;
        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The well-known path of the data snapshot that sessions load on open and save after
    /// mutating commands.
    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_JSON)
    }

    /// The configured unit-price imputation method. An unrecognized stored value falls back
    /// to the mean.
    pub fn impute_method(&self) -> ImputeMethod {
        match ImputeMethod::from_str(&self.config_file.impute_method) {
            Ok(method) => method,
            Err(_) => {
                warn!(
                    "The configured imputation method '{}' is not recognized, using mean",
                    self.config_file.impute_method
                );
                ImputeMethod::Mean
            }
        }
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path)
        .with_context(|| format!("Unable to canonicalize the path '{}'", path.display()))
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "ventas",
///   "config_version": 1,
///   "impute_method": "mean"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "ventas"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The statistic used to replace missing unit prices: "mean" or "median". Kept as a
    /// string so an unrecognized value degrades to the documented mean fallback instead of
    /// failing the whole load.
    impute_method: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            impute_method: ImputeMethod::Mean.to_string(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

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
    /// Returns an error if the file cannot be written
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        std::fs::write(path, data)
            .with_context(|| format!("Unable to write config file at {}", path.display()))
    }
}
