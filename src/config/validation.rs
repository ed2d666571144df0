use anyhow::Result;

use super::AdminSettings;
use crate::db::OdbType;
use crate::secrets::SITE_ID_BITS;

pub(crate) fn validate_settings(settings: &AdminSettings) -> Result<()> {
    if settings.host.trim().is_empty() {
        anyhow::bail!("host must not be empty");
    }
    if settings.port == 0 {
        anyhow::bail!("port must be greater than 0");
    }
    if settings.database_name.trim().is_empty() {
        anyhow::bail!("database_name must not be empty");
    }
    if settings.db_type == OdbType::Postgresql && settings.database_host.trim().is_empty() {
        anyhow::bail!("database_host must not be empty for postgresql");
    }
    if settings.database_port == Some(0) {
        anyhow::bail!("database_port must be greater than 0");
    }
    if settings.site_id >= 1 << SITE_ID_BITS {
        anyhow::bail!("site_id must be below 2^{SITE_ID_BITS}");
    }
    if settings.secret_key.trim().is_empty() {
        anyhow::bail!("secret_key must not be empty");
    }
    if settings.tech_account_name.trim().is_empty() {
        anyhow::bail!("tech_account_name must not be empty");
    }
    Ok(())
}
