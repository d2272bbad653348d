use crate::error::ConfigError;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub analytics: AnalyticsSettings,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// The published sales sheet and the names of the columns read from it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// A CSV export reachable with a plain, unauthenticated GET.
    pub url: String,
    pub date_column: String,
    pub amount_column: String,
    /// Set to an empty string for sheets that predate the customer column.
    pub customer_column: Option<String>,
}

/// Parameters for the period analytics engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// The timezone that decides which calendar day "today" is.
    pub timezone: Tz,
    /// Length of the top days / top customers rankings.
    pub top_n: usize,
    /// Customer names containing this text (any case) are left out of the
    /// customer ranking, e.g. the walk-in "CONSUMIDOR FINAL" entry.
    pub generic_customer_marker: String,
}

/// Presentation settings for the rendered page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub filter: String,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---
// Every section may be omitted from the toml; only `source.url` has no
// usable default.

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5556,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            date_column: "Emissao".to_string(),
            amount_column: "Total Nota".to_string(),
            customer_column: Some("Cliente".to_string()),
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Sao_Paulo,
            top_n: 5,
            generic_customer_marker: "CONSUMIDOR FINAL".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Sales Tracking".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "source.url must point at the published CSV".to_string(),
            ));
        }
        if self.source.date_column.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "source.date_column must not be empty".to_string(),
            ));
        }
        if self.source.amount_column.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "source.amount_column must not be empty".to_string(),
            ));
        }
        if self.analytics.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.top_n must be at least 1".to_string(),
            ));
        }
        if self.analytics.generic_customer_marker.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "analytics.generic_customer_marker must not be empty".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must not be 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl ServerConfig {
    /// Host and port to bind. The host may be an IP literal or a name such as
    /// `localhost`; it is resolved when the listener binds.
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.trim(), self.port)
    }
}

impl SourceConfig {
    /// The customer column, if this sheet version has one.
    pub fn customer_column(&self) -> Option<&str> {
        self.customer_column
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl AnalyticsSettings {
    /// The current calendar date in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        self.today_at(Utc::now())
    }

    pub fn today_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid() -> Config {
        let mut config = Config::default();
        config.source.url = "https://example.com/sheet.csv".to_string();
        config
    }

    #[test]
    fn default_with_url_is_valid() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn zero_top_n_is_rejected() {
        let mut config = valid();
        config.analytics.top_n = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn blank_customer_column_means_none() {
        let mut source = SourceConfig::default();
        assert_eq!(source.customer_column(), Some("Cliente"));
        source.customer_column = Some("  ".to_string());
        assert_eq!(source.customer_column(), None);
        source.customer_column = None;
        assert_eq!(source.customer_column(), None);
    }

    #[test]
    fn today_follows_configured_timezone() {
        let settings = AnalyticsSettings::default();
        // 01:00 UTC on New Year's Day is still 22:00 on Dec 31 in Sao Paulo.
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 1, 0, 0).unwrap();
        assert_eq!(
            settings.today_at(instant),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );

        let utc = AnalyticsSettings {
            timezone: chrono_tz::UTC,
            ..AnalyticsSettings::default()
        };
        assert_eq!(
            utc.today_at(instant),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }

    #[test]
    fn bind_target_keeps_host_names() {
        let server = ServerConfig {
            host: " localhost ".to_string(),
            port: 8080,
        };
        assert_eq!(server.bind_target(), ("localhost", 8080));
        assert_eq!(ServerConfig::default().bind_target(), ("0.0.0.0", 5556));
    }

    #[test]
    fn blank_host_is_rejected() {
        let mut config = Config::default();
        config.source.url = "https://sheets.invalid/pub.csv".to_string();
        config.server.host = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("server.host")
        ));
    }
}
