//! # Salesboard Configuration
//!
//! One explicit `Config` object replaces every hard-wired constant the
//! dashboard needs: where the sales sheet lives, what its columns are called,
//! which timezone "today" belongs to, and how the server listens.
//!
//! Values come from an optional TOML file, then `SALESBOARD__*` environment
//! variables, then (for the binary) command-line overrides.

use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod overrides;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use overrides::CliOverrides;
pub use settings::{
    AnalyticsSettings, Config, DashboardConfig, LoggingConfig, ServerConfig, SourceConfig,
};

/// Default file name looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "salesboard.toml";

/// Prefix for environment overrides, e.g. `SALESBOARD__SOURCE__URL`.
pub const ENV_PREFIX: &str = "SALESBOARD";

/// Loads and validates the application configuration.
///
/// The file is optional: every setting has a default except the source URL,
/// which may just as well arrive through the environment.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with(path, CliOverrides::default())
}

/// Like [`load_config`], applying command-line overrides before validation so
/// that a value missing from the file can be supplied on the command line.
pub fn load_config_with(path: &Path, overrides: CliOverrides) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    overrides.apply(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_file_and_fills_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[source]
url = "https://example.com/sheet.csv"
amount_column = "Valor"

[analytics]
top_n = 3
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.source.url, "https://example.com/sheet.csv");
        assert_eq!(config.source.amount_column, "Valor");
        assert_eq!(config.source.date_column, "Emissao");
        assert_eq!(config.source.customer_column(), Some("Cliente"));
        assert_eq!(config.analytics.top_n, 3);
        assert_eq!(config.analytics.timezone, chrono_tz::America::Sao_Paulo);
        assert_eq!(config.server.port, 5556);
    }

    #[test]
    fn rejects_unknown_timezone() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[source]
url = "https://example.com/sheet.csv"

[analytics]
timezone = "Mars/Olympus_Mons"
"#
        )
        .unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[test]
    fn command_line_can_supply_the_source_url() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[dashboard]\ntitle = \"Loja Centro\"").unwrap();

        let overrides = CliOverrides {
            source_url: Some("https://example.com/cli.csv".to_string()),
            ..CliOverrides::default()
        };
        let config = load_config_with(file.path(), overrides).unwrap();
        assert_eq!(config.source.url, "https://example.com/cli.csv");
        assert_eq!(config.dashboard.title, "Loja Centro");
    }

    #[test]
    fn rejects_missing_source_url() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 8080").unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
