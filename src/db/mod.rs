//! Operational database bootstrap for the admin console.
//!
//! [`AdminStore`] is the management layer the `create` command drives:
//! schema sync, fixture loading, superuser creation and user updates.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod postgres_store;
mod sqlite_store;
mod user;

pub use user::{NewSuperuser, User};

const SITE_MODEL: &str = "sites.site";
const DEFAULT_POSTGRES_PORT: u16 = 5432;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OdbType {
    Sqlite,
    Postgresql,
}

impl OdbType {
    #[must_use]
    pub fn default_port(self) -> Option<u16> {
        match self {
            OdbType::Sqlite => None,
            OdbType::Postgresql => Some(DEFAULT_POSTGRES_PORT),
        }
    }
}

impl fmt::Display for OdbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OdbType::Sqlite => write!(f, "sqlite"),
            OdbType::Postgresql => write!(f, "postgresql"),
        }
    }
}

/// Connection parameters with the password already decrypted.
#[derive(Clone)]
pub struct DbSettings {
    pub db_type: OdbType,
    /// Database name, or the database file path for `SQLite`.
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: Option<u16>,
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("db_type", &self.db_type)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"****")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    /// A user with this username already exists.
    #[error("user `{0}` already exists")]
    DuplicateUser(String),
    #[error("user `{0}` does not exist")]
    UserNotFound(String),
    #[error("failed to read fixture {path}: {source}")]
    FixtureRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture {path}: {source}")]
    FixtureFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported fixture model `{0}`")]
    UnsupportedModel(String),
    #[error("site id {0} is out of range")]
    InvalidSiteId(i64),
    #[error("failed to hash password")]
    PasswordHash,
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] postgres::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub id: u32,
    pub name: String,
    pub domain: String,
}

/// Management operations against the admin console database.
pub trait AdminStore {
    /// Creates any missing tables. Safe to run repeatedly.
    ///
    /// # Errors
    /// Returns an error if the schema statements fail.
    fn sync_schema(&mut self) -> Result<(), DbError>;

    /// Loads a fixture file, replacing records with the same primary key.
    /// Returns the number of records loaded.
    ///
    /// # Errors
    /// Returns an error if the file is unreadable, malformed, or names an
    /// unsupported model.
    fn load_fixture(&mut self, path: &Path) -> Result<usize, DbError>;

    /// Creates a superuser with an unusable password.
    ///
    /// # Errors
    /// Returns [`DbError::DuplicateUser`] if the username is taken.
    fn create_superuser(&mut self, user: &NewSuperuser) -> Result<(), DbError>;

    /// # Errors
    /// Returns [`DbError::UserNotFound`] if no user has this username.
    fn get_user(&mut self, username: &str) -> Result<User, DbError>;

    /// Persists every mutable field of `user`, matched by id.
    ///
    /// # Errors
    /// Returns [`DbError::UserNotFound`] if the user row no longer exists.
    fn save_user(&mut self, user: &User) -> Result<(), DbError>;

    /// Looks up a site loaded by [`AdminStore::load_fixture`]. The `create`
    /// flow does not need it; it is kept for inspecting a bootstrapped store.
    ///
    /// # Errors
    /// Returns an error if the lookup fails, or [`DbError::InvalidSiteId`] if
    /// a stored id does not fit in a site id.
    fn get_site(&mut self, id: u32) -> Result<Option<Site>, DbError>;
}

/// Opens the store selected by `settings.db_type`.
///
/// # Errors
/// Returns an error if the database cannot be opened or connected to.
pub fn open_store(settings: &DbSettings) -> Result<Box<dyn AdminStore>, DbError> {
    match settings.db_type {
        OdbType::Sqlite => Ok(Box::new(sqlite_store::SqliteStore::open(Path::new(
            &settings.name,
        ))?)),
        OdbType::Postgresql => Ok(Box::new(postgres_store::PostgresStore::connect(settings)?)),
    }
}

#[derive(Deserialize)]
struct FixtureRecord {
    pk: u32,
    model: String,
    fields: serde_json::Value,
}

#[derive(Deserialize)]
struct SiteFields {
    name: String,
    domain: String,
}

pub(crate) fn read_fixture(path: &Path) -> Result<Vec<Site>, DbError> {
    let display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| DbError::FixtureRead {
        path: display.clone(),
        source,
    })?;
    let records: Vec<FixtureRecord> =
        serde_json::from_str(&contents).map_err(|source| DbError::FixtureFormat {
            path: display.clone(),
            source,
        })?;
    records
        .into_iter()
        .map(|record| {
            if record.model != SITE_MODEL {
                return Err(DbError::UnsupportedModel(record.model));
            }
            let fields: SiteFields =
                serde_json::from_value(record.fields).map_err(|source| DbError::FixtureFormat {
                    path: display.clone(),
                    source,
                })?;
            Ok(Site {
                id: record.pk,
                name: fields.name,
                domain: fields.domain,
            })
        })
        .collect()
}

pub(crate) fn resolve_sqlite_path(name: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_read_fixture_parses_site() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("initial-data.json");
        std::fs::write(
            &path,
            r#"[{"pk": 17, "model": "sites.site", "fields": {"name": "Relay admin", "domain": "relayadmin.example.com"}}]"#,
        )
        .unwrap();

        let sites = read_fixture(&path).unwrap();
        assert_eq!(
            sites,
            vec![Site {
                id: 17,
                name: "Relay admin".to_string(),
                domain: "relayadmin.example.com".to_string(),
            }]
        );
    }

    #[test]
    fn test_read_fixture_rejects_unknown_model() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fixture.json");
        std::fs::write(&path, r#"[{"pk": 1, "model": "auth.group", "fields": {}}]"#).unwrap();

        let err = read_fixture(&path).unwrap_err();
        assert!(matches!(err, DbError::UnsupportedModel(model) if model == "auth.group"));
    }

    #[test]
    fn test_read_fixture_reports_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_fixture(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DbError::FixtureRead { .. }));
    }

    #[test]
    fn test_resolve_sqlite_path() {
        let base = Path::new("/srv/relay/admin");
        assert_eq!(
            resolve_sqlite_path("relay.db", base),
            PathBuf::from("/srv/relay/admin/relay.db")
        );
        assert_eq!(
            resolve_sqlite_path("/var/lib/relay.db", base),
            PathBuf::from("/var/lib/relay.db")
        );
    }

    #[test]
    fn test_db_settings_debug_masks_password() {
        let settings = DbSettings {
            db_type: OdbType::Postgresql,
            name: "relay".to_string(),
            user: "relay".to_string(),
            password: "hunter2".to_string(),
            host: "localhost".to_string(),
            port: Some(5432),
        };
        assert!(!format!("{settings:?}").contains("hunter2"));
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(OdbType::Sqlite.default_port(), None);
        assert_eq!(OdbType::Postgresql.default_port(), Some(5432));
    }
}
