pub mod config;
pub mod logging;
pub mod scheduler;
pub mod tui;

use crate::config::Config;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load();

    if logging::init(&config)? {
        tracing::info!(
            advance_delay_ms = config.advance_delay.as_millis() as u64,
            start_empty = config.start_empty,
            theme = config.theme.as_str(),
            "Starting flipcards"
        );
    }

    let app = config.build_app()?;
    tracing::info!(subjects = app.catalog().len(), "Catalog ready");

    tui::run(app, config.advance_delay).await?;

    tracing::info!("Exiting");
    Ok(())
}
