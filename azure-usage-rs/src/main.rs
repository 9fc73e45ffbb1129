// azure-usage-rs/src/main.rs
//
// One-shot dispatcher for the Synapse SQL usage query.
//
// Authenticates with the service-principal credentials from the environment,
// runs the fixed KQL query over a 30-day window, and prints each returned
// row on its own line. Failures propagate and exit non-zero.

mod client;
mod models;
mod tests;

use usage_core::UsageQuery;

use client::{AzureUsageConfig, LogsQueryClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AzureUsageConfig::from_env()?;
    let client = LogsQueryClient::connect(config)?;
    log::debug!("Query text: {}", client.query());

    let outcome = client.run().await?;
    outcome.emit();
    Ok(())
}
