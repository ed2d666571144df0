// Helper functions are shared across multiple test crates; not every helper is
// referenced in each test module.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rsa::RsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};

pub(crate) const TECH_ACCOUNT_PASSWORD: &str = "tech-account-secret";
pub(crate) const SECRET_ENV_VARS: [&str; 4] = [
    "RELAY_ODB_PASSWORD",
    "RELAY_TECH_ACCOUNT_PASSWORD",
    "RELAY_ADMIN_PASSWORD",
    "RELAY_ADMIN_LANG",
];

pub(crate) struct KeyMaterial {
    pub(crate) pub_key: PathBuf,
    pub(crate) priv_key: PathBuf,
    pub(crate) cert: PathBuf,
    pub(crate) ca_certs: PathBuf,
}

impl KeyMaterial {
    pub(crate) fn args(&self) -> Vec<String> {
        vec![
            "--pub-key-path".to_string(),
            self.pub_key.display().to_string(),
            "--priv-key-path".to_string(),
            self.priv_key.display().to_string(),
            "--cert-path".to_string(),
            self.cert.display().to_string(),
            "--ca-certs-path".to_string(),
            self.ca_certs.display().to_string(),
        ]
    }

    pub(crate) fn private_key_pem(&self) -> Result<String> {
        fs::read_to_string(&self.priv_key)
            .with_context(|| format!("read {}", self.priv_key.display()))
    }
}

/// Writes a freshly generated RSA key pair plus placeholder certificate files.
pub(crate) fn write_key_material(dir: &Path) -> Result<KeyMaterial> {
    let key = RsaPrivateKey::new(&mut StdRng::seed_from_u64(2024), 1024)
        .context("generate rsa key")?;
    let public_pem = key
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .context("encode public key")?;
    let private_pem = key.to_pkcs8_pem(LineEnding::LF).context("encode private key")?;

    let material = KeyMaterial {
        pub_key: dir.join("pub.pem"),
        priv_key: dir.join("priv.pem"),
        cert: dir.join("cert.pem"),
        ca_certs: dir.join("ca-certs.pem"),
    };
    fs::write(&material.pub_key, public_pem).context("write public key")?;
    fs::write(&material.priv_key, private_pem.as_bytes()).context("write private key")?;
    fs::write(
        &material.cert,
        "-----BEGIN CERTIFICATE-----\nY2VydA==\n-----END CERTIFICATE-----\n",
    )
    .context("write cert")?;
    fs::write(
        &material.ca_certs,
        "-----BEGIN CERTIFICATE-----\nY2EtY2VydHM=\n-----END CERTIFICATE-----\n",
    )
    .context("write ca certs")?;
    Ok(material)
}

/// Runs `relay-admin` with secret env vars cleared and stdin closed.
pub(crate) fn run_relay_admin(args: &[String]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_relay-admin"));
    for name in SECRET_ENV_VARS {
        command.env_remove(name);
    }
    command
        .env_remove("RUST_LOG")
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("relay-admin binary runs in tests")
}

/// Arguments for a sqlite-backed `create` run.
pub(crate) fn sqlite_create_args(
    target: &Path,
    db_name: &str,
    keys: &KeyMaterial,
    admin_password: &str,
) -> Vec<String> {
    let mut args = vec![
        "create".to_string(),
        target.display().to_string(),
        "--odb-type".to_string(),
        "sqlite".to_string(),
        "--odb-db-name".to_string(),
        db_name.to_string(),
        "--tech-account-name".to_string(),
        "techacct".to_string(),
        "--tech-account-password".to_string(),
        TECH_ACCOUNT_PASSWORD.to_string(),
        "--admin-password".to_string(),
        admin_password.to_string(),
    ];
    args.extend(keys.args());
    args
}
