use std::sync::Arc;

use campus_api::{config::ApiConfig, ApiState};
use campus_assistant::{config::AssistantConfig, GeminiGateway};
use campus_db::{seed::demo_database, Database};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    let assistant_config = AssistantConfig::from_env()?;

    campus_api::init_tracing(config.log_level)?;

    if assistant_config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; chat replies will fall back to an apology");
    }
    let gateway = GeminiGateway::new(assistant_config)?;

    // Build the stores
    let db = if config.seed_demo_data {
        demo_database()?
    } else {
        info!("Starting with an empty campus");
        Database::new()
    };

    let state = ApiState::new(db, Arc::new(gateway), config.low_attendance_threshold);

    // Start API server
    campus_api::start_server(config, state).await?;

    Ok(())
}
