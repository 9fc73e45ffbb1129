// bq-usage-rs/src/main.rs
//
// One-shot dispatcher for the BigQuery table-usage query.
//
// Resolves application-default credentials, runs the fixed
// INFORMATION_SCHEMA query, and prints the materialized table with its
// header. Failures propagate and exit non-zero.

mod client;
mod models;

use usage_core::UsageQuery;

use client::{BigQueryClient, BqUsageConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = BqUsageConfig::from_env()?;
    let client = BigQueryClient::connect(config)?;
    log::debug!("Query text: {}", client.query());

    let outcome = client.run().await?;
    outcome.emit();
    Ok(())
}
