// azure-usage-rs/src/models.rs
//
// Wire models for the AAD token endpoint and the Azure Monitor Logs query API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a Logs query request.
#[derive(Debug, Serialize)]
pub struct LogsQueryBody<'a> {
    pub query: &'a str,
    pub timespan: &'a str,
}

/// AAD client-credentials token response (only the field we consume).
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Top-level Logs query response.
#[derive(Debug, Deserialize)]
pub struct LogsQueryResponse {
    pub tables: Vec<LogsTable>,
}

/// One result table with its column schema and row tuples. Only the fields
/// the tool consumes are modeled.
#[derive(Debug, Deserialize)]
pub struct LogsTable {
    pub name: String,
    pub columns: Vec<LogsColumn>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct LogsColumn {
    pub name: String,
}
