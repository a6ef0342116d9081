use std::error::Error;

use crypto_assistant::{AppState, config, controllers::menu_controller};
use tokio::io::{BufReader, stdin, stdout};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // logs go to stderr so they don't interleave with the menu
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = config::load();
    tracing::info!(
        data_file = %settings.data_file.display(),
        language = ?settings.language,
        api_key = !settings.coingecko_api_key.trim().is_empty(),
        "starting crypto trading assistant"
    );

    let mut state = match AppState::new(settings) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "cannot load alerts file");
            return Err(e.into());
        }
    };

    menu_controller::run(&mut state, BufReader::new(stdin()), stdout()).await?;
    Ok(())
}
