//! Admin console settings, loaded back from the instance config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::crypto;
use crate::db::{DbSettings, OdbType, resolve_sqlite_path};
use crate::layout::InstanceLayout;

mod defaults;
mod validation;

pub use defaults::{
    DEFAULT_ADMIN_HOST, DEFAULT_ADMIN_PORT, DEFAULT_LANGUAGE_CODE, DEFAULT_TIME_ZONE,
};

/// Environment overrides use `RELAY_ADMIN_CONF__<KEY>`, e.g. `RELAY_ADMIN_CONF__PORT`.
pub const ENV_PREFIX: &str = "RELAY_ADMIN_CONF";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Deserialize, Clone)]
pub struct AdminSettings {
    pub host: String,
    pub port: u16,
    pub db_type: OdbType,
    pub log_config: String,
    #[serde(default)]
    pub debug: bool,
    pub database_name: String,
    #[serde(default)]
    pub database_user: String,
    /// Encrypted with the instance public key.
    #[serde(default)]
    pub database_password: String,
    #[serde(default)]
    pub database_host: String,
    #[serde(default)]
    pub database_port: Option<u16>,
    pub time_zone: String,
    pub language_code: String,
    pub site_id: u32,
    /// Encrypted with the instance public key.
    pub secret_key: String,
    pub tech_account_name: String,
    /// Encrypted with the instance public key.
    pub tech_account_password: String,
    pub config_dir: PathBuf,
}

impl AdminSettings {
    /// Loads settings from `config_path` and merges `config_dir`.
    ///
    /// # Errors
    /// Returns error if the file is missing or malformed, or a value has the wrong type.
    pub fn load(config_path: &Path, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut s = Config::builder();

        s = defaults::apply_defaults(s)?;
        s = s.add_source(
            File::from(config_path.to_path_buf())
                .format(FileFormat::Json)
                .required(true),
        );
        s = s.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );
        s = s.set_override("config_dir", config_dir.to_string_lossy().to_string())?;

        s.build()?.try_deserialize()
    }

    /// Validates configuration values for correctness.
    ///
    /// # Errors
    /// Returns error if any setting is invalid or out of range.
    pub fn validate(&self) -> Result<()> {
        validation::validate_settings(self)
    }

    #[must_use]
    pub fn layout(&self) -> InstanceLayout {
        InstanceLayout::new(&self.config_dir)
    }

    /// Builds database connection settings, decrypting the stored password
    /// with the instance private key.
    ///
    /// # Errors
    /// Returns an error if the private key cannot be read or decryption fails.
    pub fn database(&self) -> Result<DbSettings> {
        let password = if self.database_password.is_empty() {
            String::new()
        } else {
            let key_path = self.layout().priv_key_path();
            let private_key = std::fs::read_to_string(&key_path)
                .with_context(|| format!("Failed to read {}", key_path.display()))?;
            crypto::decrypt(&self.database_password, &private_key)
                .context("Failed to decrypt database_password")?
        };
        let name = match self.db_type {
            OdbType::Sqlite => resolve_sqlite_path(&self.database_name, &self.config_dir)
                .to_string_lossy()
                .to_string(),
            OdbType::Postgresql => self.database_name.clone(),
        };
        Ok(DbSettings {
            db_type: self.db_type,
            name,
            user: self.database_user.clone(),
            password,
            host: self.database_host.clone(),
            port: self.database_port,
        })
    }
}
