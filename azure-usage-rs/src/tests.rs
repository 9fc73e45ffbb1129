// azure-usage-rs/src/tests.rs
// Mock tests for the Azure Monitor Logs client.
//
// WireMock stands in for both the AAD token endpoint and the Logs query API
// so the tests can assert the exact request the client sends.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use usage_core::{QueryOutcome, UsageError, UsageQuery};

    use crate::client::{AzureUsageConfig, LogsQueryClient, TIMESPAN, USAGE_QUERY};

    fn test_config(mock_server: &MockServer) -> AzureUsageConfig {
        AzureUsageConfig {
            workspace_id: "test-workspace".to_string(),
            tenant_id: "test-tenant".to_string(),
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            authority: mock_server.uri(),
            logs_endpoint: mock_server.uri(),
        }
    }

    async fn mount_token_mock(mock_server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/test-tenant/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "mock-aad-token"
            })))
            .expect(1)
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_workspace_query_sends_exact_query_once() {
        let mock_server = MockServer::start().await;
        mount_token_mock(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/v1/workspaces/test-workspace/query"))
            .and(header("Authorization", "Bearer mock-aad-token"))
            .and(body_json(json!({
                "query": USAGE_QUERY,
                "timespan": TIMESPAN,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tables": [
                    {
                        "name": "PrimaryResult",
                        "columns": [
                            { "name": "Statement_s", "type": "string" },
                            { "name": "count_", "type": "long" }
                        ],
                        "rows": [
                            ["SELECT * FROM sales", 42],
                            ["SELECT TOP 10 * FROM users", 7]
                        ]
                    }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LogsQueryClient::connect(test_config(&mock_server)).unwrap();
        let outcome = client.run().await.unwrap();

        let lines = outcome.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[\"SELECT * FROM sales\",42]");
        assert_eq!(lines[1], "[\"SELECT TOP 10 * FROM users\",7]");
    }

    #[tokio::test]
    async fn test_empty_result_prints_nothing() {
        let mock_server = MockServer::start().await;
        mount_token_mock(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/v1/workspaces/test-workspace/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tables": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LogsQueryClient::connect(test_config(&mock_server)).unwrap();
        let outcome = client.run().await.unwrap();
        assert_eq!(outcome, QueryOutcome::Table { header: None, rows: vec![] });
        assert!(outcome.lines().is_empty());
    }

    #[tokio::test]
    async fn test_query_error_propagates_without_retry() {
        let mock_server = MockServer::start().await;
        mount_token_mock(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/v1/workspaces/test-workspace/query"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string("InsufficientAccessError"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LogsQueryClient::connect(test_config(&mock_server)).unwrap();
        let err = client.run().await.unwrap_err();
        match err {
            UsageError::Api { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("InsufficientAccessError"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_token_failure_is_an_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/test-tenant/oauth2/v2.0/token"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string("invalid_client"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LogsQueryClient::connect(test_config(&mock_server)).unwrap();
        let err = client.run().await.unwrap_err();
        assert!(matches!(err, UsageError::Authentication(_)));
        assert!(err.to_string().contains("invalid_client"));
    }
}
