// athena-usage-rs/src/client.rs
//
// Athena client for the CloudTrail usage query
//
// Submits one StartQueryExecution call and reports the execution id. Athena
// keeps running the query remotely; nothing here polls for completion, and
// nothing retries.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_athena::error::DisplayErrorContext;
use aws_sdk_athena::types::{QueryExecutionContext, ResultConfiguration};

use usage_core::{QueryOutcome, Result, UsageError, UsageQuery};

/// CloudTrail usage aggregation, grouped by Athena API event.
pub const USAGE_QUERY: &str = "
SELECT eventSource, eventName, resources[1].ARN AS table_arn, COUNT(*) AS usage_count
FROM cloudtrail_logs_database.cloudtrail_logs
WHERE eventSource = 'athena.amazonaws.com'
GROUP BY eventSource, eventName, resources[1].ARN
ORDER BY usage_count DESC
";

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_DATABASE: &str = "cloudtrail_logs_database";
pub const DEFAULT_OUTPUT_LOCATION: &str = "s3://your-bucket/query-results/";

/// Seam over the Athena StartQueryExecution call so tests can mock the SDK.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StartQuery: Send + Sync {
    /// Start the query execution and return its execution id.
    async fn start_query_execution(
        &self,
        query: &str,
        database: &str,
        output_location: &str,
    ) -> Result<String>;
}

/// Production dispatch backed by the AWS SDK.
pub struct AthenaDispatch {
    client: aws_sdk_athena::Client,
}

impl AthenaDispatch {
    /// Connect using the default AWS credential provider chain.
    pub async fn connect(region: String) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .load()
            .await;
        Self {
            client: aws_sdk_athena::Client::new(&config),
        }
    }
}

#[async_trait]
impl StartQuery for AthenaDispatch {
    async fn start_query_execution(
        &self,
        query: &str,
        database: &str,
        output_location: &str,
    ) -> Result<String> {
        let response = self
            .client
            .start_query_execution()
            .query_string(query)
            .query_execution_context(
                QueryExecutionContext::builder().database(database).build(),
            )
            .result_configuration(
                ResultConfiguration::builder()
                    .output_location(output_location)
                    .build(),
            )
            .send()
            .await
            .map_err(|err| UsageError::provider(format!("{}", DisplayErrorContext(&err))))?;

        response
            .query_execution_id()
            .map(str::to_string)
            .ok_or_else(|| {
                UsageError::parsing("StartQueryExecution response carried no execution id")
            })
    }
}

/// The CloudTrail usage tool: fixed query plus the dispatch seam.
pub struct AthenaUsage {
    dispatch: Box<dyn StartQuery>,
    database: String,
    output_location: String,
}

impl AthenaUsage {
    pub fn new(
        dispatch: Box<dyn StartQuery>,
        database: String,
        output_location: String,
    ) -> Self {
        Self {
            dispatch,
            database,
            output_location,
        }
    }
}

#[async_trait]
impl UsageQuery for AthenaUsage {
    fn query(&self) -> &str {
        USAGE_QUERY
    }

    async fn run(&self) -> Result<QueryOutcome> {
        let execution_id = self
            .dispatch
            .start_query_execution(USAGE_QUERY, &self.database, &self.output_location)
            .await?;
        log::info!("Athena accepted query execution {}", execution_id);
        Ok(QueryOutcome::Started {
            message: format!("Athena query started, execution ID: {}", execution_id),
        })
    }
}
