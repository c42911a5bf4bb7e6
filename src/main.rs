use dotenvy::dotenv;
use foodfleet::{
    config::{database, policy},
    errors::Result,
};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the delivery policy; a missing config.toml means defaults
    let delivery_policy = if Path::new("config.toml").exists() {
        policy::load_policy("config.toml")?
    } else {
        policy::DeliveryPolicy::default()
    };
    info!(
        holiday = %delivery_policy.holiday_weekday,
        renewal_threshold = delivery_policy.renewal_reminder_threshold,
        "Delivery policy loaded."
    );

    // 4. Initialize the database
    let db = database::create_connection().await?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    Ok(())
}
