use config::{ConfigBuilder, ConfigError, builder::DefaultState};

pub const DEFAULT_ADMIN_HOST: &str = "localhost";
pub const DEFAULT_ADMIN_PORT: u16 = 8183;
pub const DEFAULT_TIME_ZONE: &str = "America/New_York";
pub const DEFAULT_LANGUAGE_CODE: &str = "en-us";
const DEFAULT_LOG_CONFIG: &str = crate::layout::LOGGING_CONFIG_RELATIVE;

pub(crate) fn apply_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("host", DEFAULT_ADMIN_HOST)?
        .set_default("port", DEFAULT_ADMIN_PORT)?
        .set_default("log_config", DEFAULT_LOG_CONFIG)?
        .set_default("time_zone", DEFAULT_TIME_ZONE)?
        .set_default("language_code", DEFAULT_LANGUAGE_CODE)
}
