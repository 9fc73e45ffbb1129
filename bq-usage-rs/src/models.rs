// bq-usage-rs/src/models.rs
//
// Wire models for the BigQuery jobs.query API and the metadata token server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a jobs.query request.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
    #[serde(rename = "useLegacySql")]
    pub use_legacy_sql: bool,
}

/// Metadata-server (or ADC) access token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// jobs.query response, limited to the fields the tool consumes.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub schema: Option<TableSchema>,
    pub rows: Option<Vec<TableRow>>,
    #[serde(rename = "jobComplete")]
    pub job_complete: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct TableSchema {
    pub fields: Vec<TableFieldSchema>,
}

#[derive(Debug, Deserialize)]
pub struct TableFieldSchema {
    pub name: String,
}

/// One result row; BigQuery wraps each cell value in an `f`/`v` envelope.
#[derive(Debug, Deserialize)]
pub struct TableRow {
    pub f: Vec<TableCell>,
}

#[derive(Debug, Deserialize)]
pub struct TableCell {
    pub v: Value,
}
