use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use relay_admin::db::OdbType;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Language for CLI output (en or ko)
    #[arg(long, env = "RELAY_ADMIN_LANG", default_value = "en", global = true)]
    pub(crate) lang: String,

    /// Print a detailed summary and debug logs
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    /// Create a new Relay Admin instance
    Create(Box<CreateArgs>),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct OdbArgs {
    /// Operational database type
    #[arg(long, value_enum)]
    pub(crate) odb_type: OdbType,

    /// Operational database name (file path for sqlite)
    #[arg(long)]
    pub(crate) odb_db_name: String,

    /// Operational database user
    #[arg(long, default_value = "")]
    pub(crate) odb_user: String,

    /// Operational database password (prompted if omitted)
    #[arg(long, env = "RELAY_ODB_PASSWORD", hide_env_values = true)]
    pub(crate) odb_password: Option<String>,

    /// Operational database host
    #[arg(long, default_value = "localhost")]
    pub(crate) odb_host: String,

    /// Operational database port (defaults per database type)
    #[arg(long)]
    pub(crate) odb_port: Option<u16>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct KeyMaterialArgs {
    /// Path to the public key PEM file
    #[arg(long)]
    pub(crate) pub_key_path: PathBuf,

    /// Path to the private key PEM file
    #[arg(long)]
    pub(crate) priv_key_path: PathBuf,

    /// Path to the certificate PEM file
    #[arg(long)]
    pub(crate) cert_path: PathBuf,

    /// Path to the CA certificates bundle PEM file
    #[arg(long)]
    pub(crate) ca_certs_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct TechAccountArgs {
    /// Technical account name
    #[arg(long)]
    pub(crate) tech_account_name: String,

    /// Technical account password (prompted if omitted)
    #[arg(long, env = "RELAY_TECH_ACCOUNT_PASSWORD", hide_env_values = true)]
    pub(crate) tech_account_password: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CreateArgs {
    /// Directory to create the instance in (must be empty or absent)
    pub(crate) path: PathBuf,

    #[command(flatten)]
    pub(crate) odb: OdbArgs,

    #[command(flatten)]
    pub(crate) keys: KeyMaterialArgs,

    #[command(flatten)]
    pub(crate) tech_account: TechAccountArgs,

    /// Admin password (generated if omitted)
    #[arg(long, env = "RELAY_ADMIN_PASSWORD", hide_env_values = true)]
    pub(crate) admin_password: Option<String>,

    /// Show secrets in output summaries
    #[arg(long)]
    pub(crate) show_secrets: bool,
}
