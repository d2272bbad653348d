use anyhow::Context;
use std::path::Path;

// This main function is the entry point when running `cargo run -p web-server`.
// It reads `salesboard.toml` (plus SALESBOARD__* variables) and serves.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config(Path::new(configuration::DEFAULT_CONFIG_FILE))
        .context("failed to load configuration")?;
    let _guard = configuration::init_tracing(&config.logging)?;
    web_server::run_server(config).await
}
