// athena-usage-rs/src/tests.rs
// Tests for the Athena usage dispatcher against a mocked SDK seam.

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use usage_core::{QueryOutcome, UsageError, UsageQuery};

    use crate::client::{
        AthenaUsage, MockStartQuery, DEFAULT_DATABASE, DEFAULT_OUTPUT_LOCATION, USAGE_QUERY,
    };

    fn tool_with(mock: MockStartQuery) -> AthenaUsage {
        AthenaUsage::new(
            Box::new(mock),
            DEFAULT_DATABASE.to_string(),
            DEFAULT_OUTPUT_LOCATION.to_string(),
        )
    }

    #[tokio::test]
    async fn test_submits_exact_query_once() {
        let mut mock = MockStartQuery::new();
        mock.expect_start_query_execution()
            .with(
                eq(USAGE_QUERY),
                eq(DEFAULT_DATABASE),
                eq(DEFAULT_OUTPUT_LOCATION),
            )
            .times(1)
            .returning(|_, _, _| Ok("abc123".to_string()));

        let outcome = tool_with(mock).run().await.unwrap();
        let lines = outcome.lines();
        assert_eq!(lines, vec!["Athena query started, execution ID: abc123"]);
        assert!(lines[0].contains("abc123"));
    }

    #[tokio::test]
    async fn test_query_text_matches_constant() {
        let mock = MockStartQuery::new();
        let tool = tool_with(mock);
        assert_eq!(tool.query(), USAGE_QUERY);
        assert!(tool
            .query()
            .contains("WHERE eventSource = 'athena.amazonaws.com'"));
    }

    #[tokio::test]
    async fn test_dispatch_error_propagates() {
        let mut mock = MockStartQuery::new();
        mock.expect_start_query_execution()
            .times(1)
            .returning(|_, _, _| {
                Err(UsageError::authentication(
                    "no credentials in the default chain",
                ))
            });

        let err = tool_with(mock).run().await.unwrap_err();
        assert!(matches!(err, UsageError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_missing_execution_id_is_a_parsing_error() {
        let mut mock = MockStartQuery::new();
        mock.expect_start_query_execution()
            .times(1)
            .returning(|_, _, _| {
                Err(UsageError::parsing(
                    "StartQueryExecution response carried no execution id",
                ))
            });

        let err = tool_with(mock).run().await.unwrap_err();
        assert!(matches!(err, UsageError::Parsing(_)));
    }

    #[test]
    fn test_started_outcome_prints_one_line() {
        let outcome = QueryOutcome::Started {
            message: "Athena query started, execution ID: abc123".to_string(),
        };
        assert_eq!(outcome.lines().len(), 1);
    }
}
