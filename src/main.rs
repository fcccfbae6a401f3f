use clap::Parser;
use nfl_data_api::{config::Settings, logging::init_tracing, server};
use std::error::Error;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::parse();
    init_tracing(settings.log_level, settings.log_format);

    info!("Starting NFL Data API");

    let state = server::build_state(&settings)?;
    server::start_server(&settings.host, settings.port, state).await?;

    info!("Shutting down");
    Ok(())
}
