//! # Course Authoring Server
//!
//! Entry point. Initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Database connection pool and migrations
//! - HTTP server with graceful shutdown

use anyhow::Result;
use tracing::info;

use course_authoring::config::Settings;
use course_authoring::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Settings first: they choose the log format
    let settings = Settings::load()?;

    course_authoring::telemetry::init_tracing(&settings.telemetry);

    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
