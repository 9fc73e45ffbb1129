// athena-usage-rs/src/main.rs
//
// One-shot dispatcher for the CloudTrail usage query.
//
// Authenticates through the default AWS credential chain, submits the fixed
// Athena query, prints the execution id, and exits. Any failure propagates
// and terminates the process with a non-zero status.

mod client;
mod tests;

use usage_core::{env_or, UsageQuery};

use client::{AthenaDispatch, AthenaUsage, DEFAULT_DATABASE, DEFAULT_OUTPUT_LOCATION, DEFAULT_REGION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let region = env_or("ATHENA_REGION", DEFAULT_REGION);
    let database = env_or("CLOUDTRAIL_DATABASE", DEFAULT_DATABASE);
    let output_location = env_or("ATHENA_OUTPUT_LOCATION", DEFAULT_OUTPUT_LOCATION);

    log::info!("Submitting CloudTrail usage query to Athena in {}", region);
    let dispatch = AthenaDispatch::connect(region).await;
    let tool = AthenaUsage::new(Box::new(dispatch), database, output_location);
    log::debug!("Query text: {}", tool.query());

    let outcome = tool.run().await?;
    outcome.emit();
    Ok(())
}
