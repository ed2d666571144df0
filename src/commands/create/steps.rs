use std::io::{self, ErrorKind};
use std::path::Path;

use anyhow::{Context, Result};
use relay_admin::config::{
    AdminSettings, DEFAULT_ADMIN_HOST, DEFAULT_ADMIN_PORT, DEFAULT_LANGUAGE_CODE,
    DEFAULT_TIME_ZONE,
};
use relay_admin::db::{AdminStore, DbError, NewSuperuser, OdbType, open_store};
use relay_admin::layout::{APP_NAME, InstanceLayout, LOGGING_CONFIG_RELATIVE};
use relay_admin::{crypto, fs_util, secrets};
use tracing::{debug, info};

use super::constants::{
    ADMIN_EMAIL, ADMIN_FIRST_NAME, ADMIN_LAST_NAME, ADMIN_USERNAME, COMPONENT, DEBUG_ENABLED,
};
use super::files::{
    install_key_material, scaffold_dirs, validate_key_material, write_config_files,
};
use super::templates::{build_admin_config, build_initial_data};
use super::types::{AdminConfig, CreateSummary, GeneratedSecrets, SuppliedSecrets};
use crate::cli::args::CreateArgs;
use crate::cli::output::print_create_summary;
use crate::cli::prompt::Prompt;
use crate::i18n::Messages;
use crate::state::InstanceInfo;

/// Creates a Relay Admin instance and returns whether the admin user was
/// newly created.
pub(crate) fn run_create(args: &CreateArgs, verbose: bool, messages: &Messages) -> Result<bool> {
    let target = std::path::absolute(&args.path)
        .map(|path| fs_util::normalize_path(&path))
        .with_context(|| messages.error_resolve_path_failed(&args.path.display().to_string()))?;
    validate_key_material(&args.keys, messages)?;
    let target_exists = check_target(&target, messages)?;

    let supplied = resolve_supplied_secrets(args, messages)?;
    let generated = GeneratedSecrets {
        admin_password: args
            .admin_password
            .clone()
            .unwrap_or_else(secrets::generate_password),
        site_id: secrets::generate_site_id(),
        secret_key: secrets::generate_secret_key(),
    };

    if !target_exists {
        std::fs::create_dir_all(&target)
            .with_context(|| messages.error_create_dir_failed(&target.display().to_string()))?;
    }
    let layout = InstanceLayout::new(&target);
    scaffold_dirs(&layout, messages)?;
    install_key_material(&args.keys, &layout, messages)?;

    let config = build_config(args, &layout, &supplied, &generated, messages)?;
    write_config_files(
        &layout,
        &build_admin_config(&config, messages)?,
        &build_initial_data(generated.site_id, messages)?,
        messages,
    )?;
    InstanceInfo::new(COMPONENT)?.save(&layout.info_path())?;
    info!(target = %target.display(), site_id = generated.site_id, "Wrote instance configuration");

    let config_path = layout.admin_config_path();
    let settings = AdminSettings::load(&config_path, &target)
        .with_context(|| messages.error_load_settings_failed(&config_path.display().to_string()))?;
    settings.validate()?;
    let db_settings = settings.database()?;
    debug!(?db_settings, "Opening operational database");
    let mut store = open_store(&db_settings)
        .with_context(|| messages.error_open_store_failed(&db_settings.db_type.to_string()))?;

    let admin_created = bootstrap_admin(
        store.as_mut(),
        &layout.initial_data_path(),
        &generated.admin_password,
        messages,
    )?;

    let summary = CreateSummary {
        target,
        config_path,
        site_id: generated.site_id,
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: generated.admin_password,
        admin_created,
        show_secrets: args.show_secrets,
    };
    print_create_summary(&summary, verbose, messages);
    Ok(admin_created)
}

#[must_use]
pub(crate) fn start_command(target: &Path) -> String {
    format!("{APP_NAME} start {}", target.display())
}

/// Returns whether `target` already exists. It must be an empty directory if so.
fn check_target(target: &Path, messages: &Messages) -> Result<bool> {
    let display = target.display().to_string();
    match std::fs::metadata(target) {
        Ok(metadata) => {
            if !metadata.is_dir() {
                anyhow::bail!(messages.error_target_not_dir(&display));
            }
            if !fs_util::is_empty_dir(target)? {
                anyhow::bail!(messages.error_target_not_empty(&display));
            }
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| messages.error_resolve_path_failed(&display)),
    }
}

fn resolve_supplied_secrets(args: &CreateArgs, messages: &Messages) -> Result<SuppliedSecrets> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let mut prompt = Prompt::new(&mut input, &mut output, messages);

    let odb_password = match (&args.odb.odb_password, args.odb.odb_type) {
        (Some(value), _) => value.clone(),
        (None, OdbType::Sqlite) => String::new(),
        (None, OdbType::Postgresql) => prompt.prompt_text(messages.prompt_odb_password(), None)?,
    };
    let tech_account_password = match &args.tech_account.tech_account_password {
        Some(value) => value.clone(),
        None => prompt.prompt_text(messages.prompt_tech_account_password(), None)?,
    };
    Ok(SuppliedSecrets {
        odb_password,
        tech_account_password,
    })
}

fn build_config(
    args: &CreateArgs,
    layout: &InstanceLayout,
    supplied: &SuppliedSecrets,
    generated: &GeneratedSecrets,
    messages: &Messages,
) -> Result<AdminConfig> {
    let pub_key_path = layout.pub_key_path();
    let public_key = std::fs::read_to_string(&pub_key_path)
        .with_context(|| messages.error_read_file_failed(&pub_key_path.display().to_string()))?;
    let encrypt = |field: &str, plaintext: &str| -> Result<String> {
        crypto::encrypt(plaintext, &public_key).with_context(|| messages.error_encrypt_failed(field))
    };

    Ok(AdminConfig {
        host: DEFAULT_ADMIN_HOST.to_string(),
        port: DEFAULT_ADMIN_PORT,
        db_type: args.odb.odb_type,
        log_config: LOGGING_CONFIG_RELATIVE.to_string(),
        debug: DEBUG_ENABLED,
        database_name: args.odb.odb_db_name.clone(),
        database_user: args.odb.odb_user.clone(),
        database_password: encrypt("database_password", &supplied.odb_password)?,
        database_host: args.odb.odb_host.clone(),
        database_port: args.odb.odb_port.or(args.odb.odb_type.default_port()),
        time_zone: DEFAULT_TIME_ZONE.to_string(),
        language_code: DEFAULT_LANGUAGE_CODE.to_string(),
        site_id: generated.site_id,
        secret_key: encrypt("secret_key", &generated.secret_key)?,
        tech_account_name: args.tech_account.tech_account_name.clone(),
        tech_account_password: encrypt(
            "tech_account_password",
            &supplied.tech_account_password,
        )?,
    })
}

/// Syncs the schema, loads the initial data and makes sure `admin` exists
/// with `admin_password`. Returns `false` if the user already existed.
fn bootstrap_admin(
    store: &mut dyn AdminStore,
    fixture_path: &Path,
    admin_password: &str,
    messages: &Messages,
) -> Result<bool> {
    store
        .sync_schema()
        .with_context(|| messages.error_sync_schema_failed())?;
    let loaded = store
        .load_fixture(fixture_path)
        .with_context(|| messages.error_load_fixture_failed(&fixture_path.display().to_string()))?;
    debug!(records = loaded, "Loaded initial data");

    let admin_created = match store.create_superuser(&admin_superuser()) {
        Ok(()) => {
            info!(username = ADMIN_USERNAME, "Created admin user");
            true
        }
        Err(DbError::DuplicateUser(username)) => {
            info!(%username, "Admin user already exists, updating its password");
            false
        }
        Err(err) => return Err(err).with_context(|| messages.error_create_superuser_failed()),
    };

    let mut user = store
        .get_user(ADMIN_USERNAME)
        .with_context(|| messages.error_admin_lookup_failed(ADMIN_USERNAME))?;
    if !user.is_superuser {
        anyhow::bail!(messages.error_existing_user_not_superuser(ADMIN_USERNAME));
    }
    user.set_password(admin_password)
        .with_context(|| messages.error_set_password_failed())?;
    store
        .save_user(&user)
        .with_context(|| messages.error_set_password_failed())?;
    Ok(admin_created)
}

fn admin_superuser() -> NewSuperuser {
    NewSuperuser {
        username: ADMIN_USERNAME.to_string(),
        first_name: ADMIN_FIRST_NAME.to_string(),
        last_name: ADMIN_LAST_NAME.to_string(),
        email: ADMIN_EMAIL.to_string(),
    }
}
