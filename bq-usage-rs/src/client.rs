// bq-usage-rs/src/client.rs
//
// BigQuery client for the table-usage query
//
// Resolves an access token from the application-default surface (env var
// first, then the GCE metadata server), runs one jobs.query call, and
// materializes the whole result in memory before anything is printed.

use async_trait::async_trait;
use reqwest::Client;

use usage_core::{env_or, require_env, QueryOutcome, Result, Row, UsageError, UsageQuery};

use crate::models::{QueryRequest, QueryResponse, TokenResponse};

/// Table-reference counts from the jobs run over the last 30 days.
pub const USAGE_QUERY: &str = "
SELECT
  referenced_table_id,
  COUNT(*) AS query_count
FROM
  `region-us`.INFORMATION_SCHEMA.JOBS_BY_PROJECT
WHERE
  creation_time > TIMESTAMP_SUB(CURRENT_TIMESTAMP(), INTERVAL 30 DAY)
GROUP BY referenced_table_id
ORDER BY query_count DESC
";

pub const DEFAULT_ENDPOINT: &str = "https://bigquery.googleapis.com";
pub const DEFAULT_METADATA_HOST: &str = "http://metadata.google.internal";
pub const METADATA_TOKEN_PATH: &str =
    "/computeMetadata/v1/instance/service-accounts/default/token";

/// Connection settings for the BigQuery query.
#[derive(Debug, Clone)]
pub struct BqUsageConfig {
    pub project_id: String,
    pub endpoint: String,
    pub metadata_host: String,
    /// Pre-issued token, bypassing the metadata server when present.
    pub access_token: Option<String>,
}

impl BqUsageConfig {
    /// Load settings from the environment. The project id is required; the
    /// endpoints fall back to the public Google hosts.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            project_id: require_env("GOOGLE_CLOUD_PROJECT")?,
            endpoint: env_or("BIGQUERY_ENDPOINT", DEFAULT_ENDPOINT),
            metadata_host: env_or("GCE_METADATA_HOST", DEFAULT_METADATA_HOST),
            access_token: std::env::var("GOOGLE_OAUTH_ACCESS_TOKEN").ok(),
        })
    }
}

/// Client for the BigQuery jobs.query API.
pub struct BigQueryClient {
    http: Client,
    config: BqUsageConfig,
}

impl BigQueryClient {
    /// Build the HTTP client for the configured endpoints.
    pub fn connect(config: BqUsageConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|err| UsageError::configuration(err.to_string()))?;
        Ok(Self { http, config })
    }

    /// Resolve an access token: explicit token if configured, otherwise the
    /// metadata server's default service account.
    async fn acquire_token(&self) -> Result<String> {
        if let Some(token) = &self.config.access_token {
            return Ok(token.clone());
        }

        let token_url = format!("{}{}", self.config.metadata_host, METADATA_TOKEN_PATH);
        log::debug!("Requesting access token from {}", token_url);
        let response = self
            .http
            .get(&token_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UsageError::authentication(format!(
                "metadata server returned HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Run one query and materialize the full result table.
    pub async fn jobs_query(&self, sql: &str) -> Result<QueryOutcome> {
        let token = self.acquire_token().await?;
        let query_url = format!(
            "{}/bigquery/v2/projects/{}/queries",
            self.config.endpoint, self.config.project_id
        );

        log::info!("Running jobs.query in project {}", self.config.project_id);
        let response = self
            .http
            .post(&query_url)
            .bearer_auth(&token)
            .json(&QueryRequest {
                query: sql,
                use_legacy_sql: false,
            })
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

        let payload: QueryResponse = response.json().await?;
        if payload.job_complete == Some(false) {
            return Err(UsageError::provider(
                "jobs.query returned before the job completed",
            ));
        }

        let header = payload
            .schema
            .map(|schema| schema.fields.into_iter().map(|f| f.name).collect());
        let rows: Vec<Row> = payload
            .rows
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.f.into_iter().map(|cell| cell.v).collect())
            .collect();

        log::debug!("Materialized {} rows", rows.len());
        Ok(QueryOutcome::Table { header, rows })
    }
}

#[async_trait]
impl UsageQuery for BigQueryClient {
    fn query(&self) -> &str {
        USAGE_QUERY
    }

    async fn run(&self) -> Result<QueryOutcome> {
        self.jobs_query(USAGE_QUERY).await
    }
}
