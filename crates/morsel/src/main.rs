//! Pink Morsel sales dashboard.
//!
//! Loads `output.csv` from the working directory and serves the dashboard
//! on http://127.0.0.1:8050.

mod colors;

use morsel_server::{ServerConfig, ServerError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ServerConfig::default();
    tracing::debug!("Using configuration {:?}", config);
    print_banner(&config);

    // Startup data errors carry a recovery hint
    morsel_server::serve(config).await.map_err(|err| match err {
        ServerError::Data(data_err) => anyhow::anyhow!("{}", data_err.with_hint()),
        other => other.into(),
    })?;

    Ok(())
}

fn print_banner(config: &ServerConfig) {
    println!(
        "\n{}Pink Morsel{} - Sales Dashboard",
        colors::BOLD,
        colors::RESET
    );
    println!("{}", "─".repeat(50));
    println!(
        "{}  ◆ Data:{} {}",
        colors::CYAN,
        colors::RESET,
        config.data_path.display()
    );
    println!(
        "{}  ◆ Price increase:{} {}",
        colors::CYAN,
        colors::RESET,
        config.cutoff
    );
    println!(
        "{}  ◆ Server:{} http://{}:{}",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!("{}", "─".repeat(50));
    println!("{}Press Ctrl+C to stop{}", colors::GREEN, colors::RESET);
    println!();
}
