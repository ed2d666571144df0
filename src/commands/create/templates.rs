use anyhow::{Context, Result};

use super::constants::{SITE_DOMAIN, SITE_MODEL, SITE_NAME};
use super::types::{AdminConfig, FixtureRecord, SiteFields};
use crate::i18n::Messages;

pub(crate) fn build_admin_config(config: &AdminConfig, messages: &Messages) -> Result<String> {
    serde_json::to_string_pretty(config).context(messages.error_serialize_config_failed())
}

pub(crate) fn build_initial_data(site_id: u32, messages: &Messages) -> Result<String> {
    let records = [FixtureRecord {
        pk: site_id,
        model: SITE_MODEL,
        fields: SiteFields {
            name: SITE_NAME,
            domain: SITE_DOMAIN,
        },
    }];
    serde_json::to_string_pretty(&records).context(messages.error_serialize_config_failed())
}

#[cfg(test)]
mod tests {
    use relay_admin::db::OdbType;
    use serde_json::{Value, json};

    use super::*;

    fn sample_config() -> AdminConfig {
        AdminConfig {
            host: "localhost".to_string(),
            port: 8183,
            db_type: OdbType::Postgresql,
            log_config: "./config/repo/logging.conf".to_string(),
            debug: true,
            database_name: "relay".to_string(),
            database_user: "relay".to_string(),
            database_password: "ciphertext-db".to_string(),
            database_host: "db.internal".to_string(),
            database_port: Some(5432),
            time_zone: "America/New_York".to_string(),
            language_code: "en-us".to_string(),
            site_id: 99,
            secret_key: "ciphertext-key".to_string(),
            tech_account_name: "techacct".to_string(),
            tech_account_password: "ciphertext-tech".to_string(),
        }
    }

    #[test]
    fn test_build_admin_config_uses_snake_case_keys() {
        let messages = Messages::new("en").unwrap();
        let rendered = build_admin_config(&sample_config(), &messages).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["db_type"], "postgresql");
        assert_eq!(value["port"], 8183);
        assert_eq!(value["database_port"], 5432);
        assert_eq!(value["site_id"], 99);
        assert_eq!(value["tech_account_password"], "ciphertext-tech");
    }

    #[test]
    fn test_build_admin_config_writes_null_port() {
        let messages = Messages::new("en").unwrap();
        let mut config = sample_config();
        config.db_type = OdbType::Sqlite;
        config.database_port = None;
        let rendered = build_admin_config(&config, &messages).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["db_type"], "sqlite");
        assert!(value["database_port"].is_null());
    }

    #[test]
    fn test_build_initial_data_has_single_site() {
        let messages = Messages::new("en").unwrap();
        let rendered = build_initial_data(424_242, &messages).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(
            value,
            json!([{
                "pk": 424_242,
                "model": "sites.site",
                "fields": {"name": "Relay admin", "domain": "relayadmin.example.com"}
            }])
        );
    }
}
