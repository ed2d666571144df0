use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Logging configuration shared by every Relay component.
///
/// `{log_path}` is replaced with the component's log file.
pub const LOGGING_CONF_TEMPLATE: &str = r#"# Relay logging configuration

[logging]
level = "info"
format = "full"
ansi = false

[logging.file]
path = "{log_path}"
max_bytes = 20000000
backup_count = 10
"#;

#[must_use]
pub fn build_logging_config(log_path: &str) -> String {
    LOGGING_CONF_TEMPLATE.replace("{log_path}", log_path)
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over `verbose`.
/// Colors are only used when stderr is a terminal.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::*;

    #[test]
    fn test_logging_config_is_valid_toml() {
        let rendered = build_logging_config("./logs/relay-admin.log");
        let parsed = Config::builder()
            .add_source(File::from_str(&rendered, FileFormat::Toml))
            .build()
            .unwrap();
        assert_eq!(
            parsed.get_string("logging.file.path").unwrap(),
            "./logs/relay-admin.log"
        );
        assert_eq!(parsed.get_string("logging.level").unwrap(), "info");
        assert_eq!(parsed.get_int("logging.file.backup_count").unwrap(), 10);
    }
}
