use std::path::Path;

use anyhow::{Context, Result};
use relay_admin::fs_util;
use relay_admin::layout::{InstanceLayout, LOG_FILE_RELATIVE};
use relay_admin::logging::build_logging_config;
use tracing::debug;

use crate::cli::args::KeyMaterialArgs;
use crate::i18n::Messages;

pub(super) fn validate_key_material(keys: &KeyMaterialArgs, messages: &Messages) -> Result<()> {
    for source in key_sources(keys) {
        fs_util::ensure_readable_file(source)
            .with_context(|| messages.error_key_material_unreadable(&source.display().to_string()))?;
    }
    Ok(())
}

pub(super) fn scaffold_dirs(layout: &InstanceLayout, messages: &Messages) -> Result<()> {
    fs_util::create_dirs(&layout.scaffold_dirs())
        .with_context(|| messages.error_create_dir_failed(&layout.root().display().to_string()))?;
    debug!(root = %layout.root().display(), "Created instance directories");
    Ok(())
}

pub(super) fn install_key_material(
    keys: &KeyMaterialArgs,
    layout: &InstanceLayout,
    messages: &Messages,
) -> Result<()> {
    let targets = [
        layout.pub_key_path(),
        layout.priv_key_path(),
        layout.cert_path(),
        layout.ca_certs_path(),
    ];
    for (source, target) in key_sources(keys).into_iter().zip(&targets) {
        fs_util::copy_file(source, target)
            .with_context(|| messages.error_copy_file_failed(&target.display().to_string()))?;
        debug!(target = %target.display(), "Installed key material");
    }
    let priv_key_path = layout.priv_key_path();
    fs_util::set_key_permissions(&priv_key_path)
        .with_context(|| messages.error_copy_file_failed(&priv_key_path.display().to_string()))?;
    Ok(())
}

pub(super) fn write_config_files(
    layout: &InstanceLayout,
    admin_config: &str,
    initial_data: &str,
    messages: &Messages,
) -> Result<()> {
    write_file(&layout.admin_config_path(), admin_config, messages)?;
    write_file(&layout.initial_data_path(), initial_data, messages)?;
    write_file(
        &layout.logging_config_path(),
        &build_logging_config(LOG_FILE_RELATIVE),
        messages,
    )?;
    Ok(())
}

fn write_file(path: &Path, contents: &str, messages: &Messages) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| messages.error_write_file_failed(&path.display().to_string()))?;
    debug!(path = %path.display(), "Wrote config file");
    Ok(())
}

fn key_sources(keys: &KeyMaterialArgs) -> [&Path; 4] {
    [
        keys.pub_key_path.as_path(),
        keys.priv_key_path.as_path(),
        keys.cert_path.as_path(),
        keys.ca_certs_path.as_path(),
    ]
}
