use anyhow::Result;
use gry::config;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = config::load_from_env()?;
    config.print_summary();

    gry::server::run(config).await
}

/// Installs the global subscriber from `RUST_LOG` and `LOG_FORMAT`.
///
/// Runs before configuration is loaded so that everything logged while
/// loading it is kept.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
