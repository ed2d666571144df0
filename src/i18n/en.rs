use super::Strings;

pub(crate) static STRINGS: Strings = Strings {
    create_success: "Successfully created a Relay Admin instance.",
    create_start_hint: "You can start it with the '{command}' command.",
    create_ok: "OK",
    summary_config_path: "- Config file: {value}",
    summary_site_id: "- Site ID: {value}",
    summary_admin_user: "- Admin user: {value}",
    summary_admin_password: "- Admin password: {value}",
    summary_admin_created: "- Admin account: created",
    summary_admin_existing: "- Admin account: already existed, password updated",
    prompt_odb_password: "ODB password",
    prompt_tech_account_password: "Tech account password",
    error_resolve_path_failed: "Failed to resolve path: {value}",
    error_target_not_dir: "Target is not a directory: {value}",
    error_target_not_empty: "Target directory is not empty: {value}",
    error_key_material_unreadable: "Key material file is not readable: {value}",
    error_create_dir_failed: "Failed to create directory: {value}",
    error_copy_file_failed: "Failed to install key material: {value}",
    error_read_file_failed: "Failed to read file: {value}",
    error_write_file_failed: "Failed to write file: {value}",
    error_encrypt_failed: "Failed to encrypt {value}",
    error_serialize_config_failed: "Failed to serialize admin config",
    error_load_settings_failed: "Failed to load settings from {value}",
    error_open_store_failed: "Failed to open the {value} database",
    error_sync_schema_failed: "Failed to synchronize database schema",
    error_load_fixture_failed: "Failed to load fixture: {value}",
    error_create_superuser_failed: "Failed to create superuser",
    error_admin_lookup_failed: "Failed to look up user: {value}",
    error_set_password_failed: "Failed to set the admin password",
    error_existing_user_not_superuser: "User '{value}' already exists but is not a superuser; refusing to reset its password",
    error_prompt_write_failed: "Failed to write prompt",
    error_prompt_flush_failed: "Failed to flush prompt",
    error_prompt_read_failed: "Failed to read input",
};
