use anyhow::{Context, Result};

pub(crate) mod en;
pub(crate) mod ko;

pub(crate) struct Strings {
    pub(crate) create_success: &'static str,
    pub(crate) create_start_hint: &'static str,
    pub(crate) create_ok: &'static str,
    pub(crate) summary_config_path: &'static str,
    pub(crate) summary_site_id: &'static str,
    pub(crate) summary_admin_user: &'static str,
    pub(crate) summary_admin_password: &'static str,
    pub(crate) summary_admin_created: &'static str,
    pub(crate) summary_admin_existing: &'static str,
    pub(crate) prompt_odb_password: &'static str,
    pub(crate) prompt_tech_account_password: &'static str,
    pub(crate) error_resolve_path_failed: &'static str,
    pub(crate) error_target_not_dir: &'static str,
    pub(crate) error_target_not_empty: &'static str,
    pub(crate) error_key_material_unreadable: &'static str,
    pub(crate) error_create_dir_failed: &'static str,
    pub(crate) error_copy_file_failed: &'static str,
    pub(crate) error_read_file_failed: &'static str,
    pub(crate) error_write_file_failed: &'static str,
    pub(crate) error_encrypt_failed: &'static str,
    pub(crate) error_serialize_config_failed: &'static str,
    pub(crate) error_load_settings_failed: &'static str,
    pub(crate) error_open_store_failed: &'static str,
    pub(crate) error_sync_schema_failed: &'static str,
    pub(crate) error_load_fixture_failed: &'static str,
    pub(crate) error_create_superuser_failed: &'static str,
    pub(crate) error_admin_lookup_failed: &'static str,
    pub(crate) error_set_password_failed: &'static str,
    pub(crate) error_existing_user_not_superuser: &'static str,
    pub(crate) error_prompt_write_failed: &'static str,
    pub(crate) error_prompt_flush_failed: &'static str,
    pub(crate) error_prompt_read_failed: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Locale {
    En,
    Ko,
}

impl Locale {
    pub(crate) fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_ascii_lowercase();
        let base = normalized
            .split('-')
            .next()
            .context("Missing language code")?;
        match base {
            "en" => Ok(Locale::En),
            "ko" => Ok(Locale::Ko),
            _ => anyhow::bail!("Unsupported language: {input}"),
        }
    }
}

pub(crate) struct Messages {
    locale: Locale,
}

impl Messages {
    pub(crate) fn new(lang: &str) -> Result<Self> {
        let locale = Locale::parse(lang)?;
        Ok(Self { locale })
    }

    pub(crate) fn create_success(&self) -> &'static str {
        self.strings().create_success
    }

    pub(crate) fn create_start_hint(&self, command: &str) -> String {
        format_template(self.strings().create_start_hint, &[("command", command)])
    }

    pub(crate) fn create_ok(&self) -> &'static str {
        self.strings().create_ok
    }

    pub(crate) fn summary_config_path(&self, value: &str) -> String {
        format_template(self.strings().summary_config_path, &[("value", value)])
    }

    pub(crate) fn summary_site_id(&self, value: u32) -> String {
        let site_id = value.to_string();
        format_template(self.strings().summary_site_id, &[("value", &site_id)])
    }

    pub(crate) fn summary_admin_user(&self, value: &str) -> String {
        format_template(self.strings().summary_admin_user, &[("value", value)])
    }

    pub(crate) fn summary_admin_password(&self, value: &str) -> String {
        format_template(self.strings().summary_admin_password, &[("value", value)])
    }

    pub(crate) fn summary_admin_created(&self) -> &'static str {
        self.strings().summary_admin_created
    }

    pub(crate) fn summary_admin_existing(&self) -> &'static str {
        self.strings().summary_admin_existing
    }

    pub(crate) fn prompt_odb_password(&self) -> &'static str {
        self.strings().prompt_odb_password
    }

    pub(crate) fn prompt_tech_account_password(&self) -> &'static str {
        self.strings().prompt_tech_account_password
    }

    pub(crate) fn error_resolve_path_failed(&self, value: &str) -> String {
        format_template(self.strings().error_resolve_path_failed, &[("value", value)])
    }

    pub(crate) fn error_target_not_dir(&self, value: &str) -> String {
        format_template(self.strings().error_target_not_dir, &[("value", value)])
    }

    pub(crate) fn error_target_not_empty(&self, value: &str) -> String {
        format_template(self.strings().error_target_not_empty, &[("value", value)])
    }

    pub(crate) fn error_key_material_unreadable(&self, value: &str) -> String {
        format_template(
            self.strings().error_key_material_unreadable,
            &[("value", value)],
        )
    }

    pub(crate) fn error_create_dir_failed(&self, value: &str) -> String {
        format_template(self.strings().error_create_dir_failed, &[("value", value)])
    }

    pub(crate) fn error_copy_file_failed(&self, value: &str) -> String {
        format_template(self.strings().error_copy_file_failed, &[("value", value)])
    }

    pub(crate) fn error_read_file_failed(&self, value: &str) -> String {
        format_template(self.strings().error_read_file_failed, &[("value", value)])
    }

    pub(crate) fn error_write_file_failed(&self, value: &str) -> String {
        format_template(self.strings().error_write_file_failed, &[("value", value)])
    }

    pub(crate) fn error_encrypt_failed(&self, value: &str) -> String {
        format_template(self.strings().error_encrypt_failed, &[("value", value)])
    }

    pub(crate) fn error_serialize_config_failed(&self) -> &'static str {
        self.strings().error_serialize_config_failed
    }

    pub(crate) fn error_load_settings_failed(&self, value: &str) -> String {
        format_template(self.strings().error_load_settings_failed, &[("value", value)])
    }

    pub(crate) fn error_open_store_failed(&self, value: &str) -> String {
        format_template(self.strings().error_open_store_failed, &[("value", value)])
    }

    pub(crate) fn error_sync_schema_failed(&self) -> &'static str {
        self.strings().error_sync_schema_failed
    }

    pub(crate) fn error_load_fixture_failed(&self, value: &str) -> String {
        format_template(self.strings().error_load_fixture_failed, &[("value", value)])
    }

    pub(crate) fn error_create_superuser_failed(&self) -> &'static str {
        self.strings().error_create_superuser_failed
    }

    pub(crate) fn error_admin_lookup_failed(&self, value: &str) -> String {
        format_template(self.strings().error_admin_lookup_failed, &[("value", value)])
    }

    pub(crate) fn error_set_password_failed(&self) -> &'static str {
        self.strings().error_set_password_failed
    }

    pub(crate) fn error_existing_user_not_superuser(&self, value: &str) -> String {
        format_template(
            self.strings().error_existing_user_not_superuser,
            &[("value", value)],
        )
    }

    pub(crate) fn error_prompt_write_failed(&self) -> &'static str {
        self.strings().error_prompt_write_failed
    }

    pub(crate) fn error_prompt_flush_failed(&self) -> &'static str {
        self.strings().error_prompt_flush_failed
    }

    pub(crate) fn error_prompt_read_failed(&self) -> &'static str {
        self.strings().error_prompt_read_failed
    }

    fn strings(&self) -> &'static Strings {
        match self.locale {
            Locale::En => &en::STRINGS,
            Locale::Ko => &ko::STRINGS,
        }
    }
}

fn format_template(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut output = template.to_string();
    for (key, value) in pairs {
        output = output.replace(&format!("{{{key}}}"), value);
    }
    output
}
