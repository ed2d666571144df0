use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "relay";
pub const INFO_FILE_NAME: &str = ".relay-admin-info";
pub const ADMIN_CONFIG_NAME: &str = "relay-admin.conf";
pub const INITIAL_DATA_NAME: &str = "initial-data.json";
pub const LOGGING_CONFIG_NAME: &str = "logging.conf";
pub const PUB_KEY_NAME: &str = "relay-admin-pub-key.pem";
pub const PRIV_KEY_NAME: &str = "relay-admin-priv-key.pem";
pub const CERT_NAME: &str = "relay-admin-cert.pem";
pub const CA_CERTS_NAME: &str = "relay-admin-ca-certs.pem";

const LOGS_DIR: &str = "logs";
const CONFIG_DIR: &str = "config";
const ZDAEMON_DIR: &str = "zdaemon";
const REPO_DIR: &str = "repo";

/// Log file path relative to the instance root, as written into `logging.conf`.
pub const LOG_FILE_RELATIVE: &str = "./logs/relay-admin.log";
/// Logging config path relative to the instance root, as written into the admin config.
pub const LOGGING_CONFIG_RELATIVE: &str = "./config/repo/logging.conf";

/// Paths of a Relay Admin instance rooted at an installation directory.
#[derive(Debug, Clone)]
pub struct InstanceLayout {
    root: PathBuf,
}

impl InstanceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    #[must_use]
    pub fn zdaemon_dir(&self) -> PathBuf {
        self.config_dir().join(ZDAEMON_DIR)
    }

    #[must_use]
    pub fn repo_dir(&self) -> PathBuf {
        self.config_dir().join(REPO_DIR)
    }

    /// Directories created by scaffolding, parents first.
    #[must_use]
    pub fn scaffold_dirs(&self) -> [PathBuf; 4] {
        [
            self.logs_dir(),
            self.config_dir(),
            self.zdaemon_dir(),
            self.repo_dir(),
        ]
    }

    #[must_use]
    pub fn info_path(&self) -> PathBuf {
        self.root.join(INFO_FILE_NAME)
    }

    #[must_use]
    pub fn admin_config_path(&self) -> PathBuf {
        self.repo_dir().join(ADMIN_CONFIG_NAME)
    }

    #[must_use]
    pub fn initial_data_path(&self) -> PathBuf {
        self.repo_dir().join(INITIAL_DATA_NAME)
    }

    #[must_use]
    pub fn logging_config_path(&self) -> PathBuf {
        self.repo_dir().join(LOGGING_CONFIG_NAME)
    }

    #[must_use]
    pub fn pub_key_path(&self) -> PathBuf {
        self.repo_dir().join(PUB_KEY_NAME)
    }

    #[must_use]
    pub fn priv_key_path(&self) -> PathBuf {
        self.repo_dir().join(PRIV_KEY_NAME)
    }

    #[must_use]
    pub fn cert_path(&self) -> PathBuf {
        self.repo_dir().join(CERT_NAME)
    }

    #[must_use]
    pub fn ca_certs_path(&self) -> PathBuf {
        self.repo_dir().join(CA_CERTS_NAME)
    }
}
