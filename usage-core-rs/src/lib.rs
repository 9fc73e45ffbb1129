//! Shared plumbing for the usage-logging query tools
//!
//! Each binary in this workspace dispatches exactly one fixed analytic query
//! against one cloud provider's audit/usage log store. The providers share
//! nothing beyond the boilerplate of connecting, running the query, and
//! printing whatever came back, so this crate deliberately stays thin:
//!
//! - `UsageQuery`: the connect/run seam each provider client implements
//! - `QueryOutcome`: the printable result of a dispatched query
//! - `UsageError`: the common error type
//! - env-var helpers for the deployment-specific constants

pub mod config;
pub mod error;
pub mod outcome;

pub use config::{env_or, require_env};
pub use error::{Result, UsageError};
pub use outcome::{QueryOutcome, Row};

use async_trait::async_trait;

/// A one-shot usage query against a single provider.
///
/// Implementations hold whatever client handle their provider needs; `run`
/// issues the query exactly once and never retries.
#[async_trait]
pub trait UsageQuery {
    /// The fixed query text this tool dispatches.
    fn query(&self) -> &str;

    /// Issue the query and return its printable outcome.
    async fn run(&self) -> Result<QueryOutcome>;
}
