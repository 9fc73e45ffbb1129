// azure-usage-rs/src/client.rs
//
// Azure Monitor Logs client for the Synapse SQL usage query
//
// Acquires one AAD bearer token via the client-credentials grant, issues one
// workspace query over the Logs REST API, and returns every row of every
// returned table. Nothing is paged, cached, or retried.

use async_trait::async_trait;
use reqwest::Client;

use usage_core::{env_or, require_env, QueryOutcome, Result, UsageError, UsageQuery};

use crate::models::{LogsQueryBody, LogsQueryResponse, TokenResponse};

/// Synapse SQL execution counts by statement over the query timespan.
pub const USAGE_QUERY: &str = "
AzureDiagnostics
| where ResourceType == \"SYNAPSE\"
| where OperationName_s == \"ExecuteSql\"
| summarize count() by Statement_s
";

/// ISO 8601 window the Logs API applies to the query.
pub const TIMESPAN: &str = "P30D";

pub const DEFAULT_WORKSPACE_ID: &str = "YOUR_WORKSPACE_ID";
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";
pub const DEFAULT_LOGS_ENDPOINT: &str = "https://api.loganalytics.io";
pub const TOKEN_SCOPE: &str = "https://api.loganalytics.io/.default";

/// Connection settings for the Logs query, with placeholder defaults.
#[derive(Debug, Clone)]
pub struct AzureUsageConfig {
    pub workspace_id: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub authority: String,
    pub logs_endpoint: String,
}

impl AzureUsageConfig {
    /// Load settings from the environment. The service-principal triple is
    /// required; everything else falls back to the hardcoded defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            workspace_id: env_or("AZURE_LOG_WORKSPACE_ID", DEFAULT_WORKSPACE_ID),
            tenant_id: require_env("AZURE_TENANT_ID")?,
            client_id: require_env("AZURE_CLIENT_ID")?,
            client_secret: require_env("AZURE_CLIENT_SECRET")?,
            authority: env_or("AZURE_AUTHORITY_HOST", DEFAULT_AUTHORITY),
            logs_endpoint: env_or("AZURE_LOGS_ENDPOINT", DEFAULT_LOGS_ENDPOINT),
        })
    }
}

/// Client for the Azure Monitor Logs query API.
pub struct LogsQueryClient {
    http: Client,
    config: AzureUsageConfig,
}

impl LogsQueryClient {
    /// Build the HTTP client for the configured endpoints.
    pub fn connect(config: AzureUsageConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|err| UsageError::configuration(err.to_string()))?;
        Ok(Self { http, config })
    }

    /// Fetch a bearer token through the AAD client-credentials grant.
    async fn acquire_token(&self) -> Result<String> {
        let token_url = format!(
            "{}/{}/oauth2/v2.0/token",
            self.config.authority, self.config.tenant_id
        );
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("scope", TOKEN_SCOPE),
            ("grant_type", "client_credentials"),
        ];

        log::debug!("Requesting AAD token from {}", token_url);
        let response = self.http.post(&token_url).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UsageError::authentication(format!(
                "token endpoint returned HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Run one query against the configured workspace and collect its rows.
    pub async fn query_workspace(&self, query: &str, timespan: &str) -> Result<QueryOutcome> {
        let token = self.acquire_token().await?;
        let query_url = format!(
            "{}/v1/workspaces/{}/query",
            self.config.logs_endpoint, self.config.workspace_id
        );

        log::info!(
            "Querying workspace {} over timespan {}",
            self.config.workspace_id,
            timespan
        );
        let response = self
            .http
            .post(&query_url)
            .bearer_auth(&token)
            .json(&LogsQueryBody { query, timespan })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UsageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: LogsQueryResponse = response.json().await?;
        let mut rows = Vec::new();
        for table in payload.tables {
            let columns: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
            log::debug!(
                "Table {} returned {} rows (columns: {})",
                table.name,
                table.rows.len(),
                columns.join(", ")
            );
            rows.extend(table.rows);
        }
        Ok(QueryOutcome::Table { header: None, rows })
    }
}

#[async_trait]
impl UsageQuery for LogsQueryClient {
    fn query(&self) -> &str {
        USAGE_QUERY
    }

    async fn run(&self) -> Result<QueryOutcome> {
        self.query_workspace(USAGE_QUERY, TIMESPAN).await
    }
}
