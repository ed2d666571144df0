use std::path::PathBuf;

use relay_admin::db::OdbType;
use serde::Serialize;

/// Contents of `relay-admin.conf`. Secret fields hold ciphertext only.
#[derive(Debug, Serialize)]
pub(crate) struct AdminConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) db_type: OdbType,
    pub(crate) log_config: String,
    pub(crate) debug: bool,
    pub(crate) database_name: String,
    pub(crate) database_user: String,
    pub(crate) database_password: String,
    pub(crate) database_host: String,
    pub(crate) database_port: Option<u16>,
    pub(crate) time_zone: String,
    pub(crate) language_code: String,
    pub(crate) site_id: u32,
    pub(crate) secret_key: String,
    pub(crate) tech_account_name: String,
    pub(crate) tech_account_password: String,
}

#[derive(Serialize)]
pub(crate) struct FixtureRecord<'a> {
    pub(crate) pk: u32,
    pub(crate) model: &'a str,
    pub(crate) fields: SiteFields<'a>,
}

#[derive(Serialize)]
pub(crate) struct SiteFields<'a> {
    pub(crate) name: &'a str,
    pub(crate) domain: &'a str,
}

/// Secrets supplied on the command line, through the environment or a prompt.
pub(crate) struct SuppliedSecrets {
    pub(crate) odb_password: String,
    pub(crate) tech_account_password: String,
}

pub(crate) struct GeneratedSecrets {
    pub(crate) admin_password: String,
    pub(crate) site_id: u32,
    pub(crate) secret_key: String,
}

pub(crate) struct CreateSummary {
    pub(crate) target: PathBuf,
    pub(crate) config_path: PathBuf,
    pub(crate) site_id: u32,
    pub(crate) admin_username: String,
    pub(crate) admin_password: String,
    pub(crate) admin_created: bool,
    pub(crate) show_secrets: bool,
}
