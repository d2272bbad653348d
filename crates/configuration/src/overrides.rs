use crate::settings::Config;

/// Values a command line may override after the file and environment are read.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct CliOverrides {
    /// Address to bind the web server to.
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<String>,

    /// Port to bind the web server to.
    #[cfg_attr(feature = "clap", arg(long))]
    pub port: Option<u16>,

    /// URL of the published sales CSV.
    #[cfg_attr(feature = "clap", arg(long = "source-url"))]
    pub source_url: Option<String>,
}

impl CliOverrides {
    /// Applies the overrides and re-validates the result.
    pub fn apply(self, mut config: Config) -> Result<Config, crate::error::ConfigError> {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.source_url {
            config.source.url = url;
        }
        config.validate()?;
        Ok(config)
    }
}
