//! Integration tests against a mock GraphQL endpoint.

use cooper_pair::{
    CooperPair, ExpectationConfig, ExpectationsConfig, PairConfig, PairError,
};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

fn authed_config(server: &ServerGuard) -> PairConfig {
    PairConfig::new(format!("{}/graphql", server.url()))
        .with_credentials("machine@example.com", "foobar")
}

async fn mock_login(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("loginMutation".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": {"login": {"token": "tok-123"}}}).to_string())
        .create_async()
        .await
}

async fn mock_operation(server: &mut ServerGuard, marker: &str, data: serde_json::Value) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex(marker.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": data }).to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_login_stores_token() {
    let mut server = Server::new_async().await;
    let login = mock_login(&mut server).await;

    let pair = CooperPair::new(&authed_config(&server)).unwrap();
    assert!(pair.login().await.unwrap());
    assert_eq!(pair.token().await.as_deref(), Some("tok-123"));

    login.assert_async().await;
}

#[tokio::test]
async fn test_login_without_credentials_returns_false() {
    let server = Server::new_async().await;

    let pair = CooperPair::connect(format!("{}/graphql", server.url())).unwrap();
    assert!(!pair.login().await.unwrap());
    assert!(pair.token().await.is_none());
}

#[tokio::test]
async fn test_login_with_empty_token_returns_false() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("loginMutation".to_string()))
        .with_body(json!({"data": {"login": {"token": ""}}}).to_string())
        .create_async()
        .await;

    let pair = CooperPair::new(&authed_config(&server)).unwrap();
    assert!(!pair.login().await.unwrap());
    assert!(pair.token().await.is_none());
}

#[tokio::test]
async fn test_query_authenticates_lazily_and_sends_token_header() {
    let mut server = Server::new_async().await;
    let login = mock_login(&mut server).await;
    let datasets = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("allDatasets".to_string()))
        .match_header("x-fullerene-token", "tok-123")
        .with_body(json!({"data": {"allDatasets": {"edges": []}}}).to_string())
        .create_async()
        .await;

    let pair = CooperPair::new(&authed_config(&server)).unwrap();
    let data = pair.list_datasets().await.unwrap();
    assert!(data["allDatasets"]["edges"].as_array().unwrap().is_empty());

    login.assert_async().await;
    datasets.assert_async().await;
}

#[tokio::test]
async fn test_graphql_errors_are_surfaced() {
    let mut server = Server::new_async().await;
    let _checkpoint = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("checkpointQuery".to_string()))
        .with_body(
            json!({
                "data": null,
                "errors": [{"message": "Checkpoint not found"}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let pair = CooperPair::connect(format!("{}/graphql", server.url())).unwrap();
    let err = pair.get_checkpoint("bogus").await.unwrap_err();

    match err {
        PairError::Graphql(errors) => {
            assert_eq!(errors.0.len(), 1);
            assert_eq!(errors.0[0].message, "Checkpoint not found");
        }
        other => panic!("expected Graphql error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_failure_is_surfaced_with_status() {
    let mut server = Server::new_async().await;
    let _failure = server
        .mock("POST", "/graphql")
        .with_status(500)
        .with_body("internal server error")
        .create_async()
        .await;

    let pair = CooperPair::connect(format!("{}/graphql", server.url())).unwrap();
    let err = pair.list_datasets().await.unwrap_err();

    match err {
        PairError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal server error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_failure_refreshes_token_and_retries_once() {
    let mut server = Server::new_async().await;
    // Initial lazy login plus the refresh before the retry.
    let login = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("loginMutation".to_string()))
        .with_body(json!({"data": {"login": {"token": "tok-123"}}}).to_string())
        .expect(2)
        .create_async()
        .await;
    // Two dispatches of the same document: the initial failure and the
    // retry after re-authentication.
    let datasets = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("allDatasets".to_string()))
        .with_status(401)
        .with_body("token expired")
        .expect(2)
        .create_async()
        .await;

    let pair = CooperPair::new(&authed_config(&server)).unwrap();
    let err = pair.list_datasets().await.unwrap_err();

    assert!(matches!(err, PairError::Api { status: 401, .. }));
    datasets.assert_async().await;
    login.assert_async().await;
}

#[tokio::test]
async fn test_add_dataset_from_path_uploads_contents() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;

    let upload_url = format!(
        "{}/storage/bucket?key=datasets%2Fnonce.csv&signature=abc",
        server.url()
    );
    let add = mock_operation(
        &mut server,
        "addDatasetMutation",
        json!({"addDataset": {"dataset": {
            "id": "RGF0YXNldDox",
            "filename": "nonce.csv",
            "s3Url": upload_url,
            "s3Key": "datasets/nonce.csv"
        }}}),
    )
    .await;
    let upload = server
        .mock("POST", "/storage/bucket")
        .match_header(
            "content-type",
            Matcher::Regex("multipart/form-data".to_string()),
        )
        .with_status(204)
        .create_async()
        .await;
    let get = mock_operation(
        &mut server,
        "datasetQuery",
        json!({"dataset": {"id": "RGF0YXNldDox", "filename": "nonce.csv"}}),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nonce.csv");
    std::fs::write(&path, b"a,b\n1,2\n").unwrap();

    let pair = CooperPair::new(&authed_config(&server)).unwrap();
    let dataset = pair
        .add_dataset_from_path(&path, "UHJvamVjdDox", None)
        .await
        .unwrap();

    assert_eq!(dataset["dataset"]["filename"], "nonce.csv");
    add.assert_async().await;
    upload.assert_async().await;
    get.assert_async().await;
}

#[tokio::test]
async fn test_rejected_upload_is_surfaced() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;

    let upload_url = format!("{}/storage/bucket?key=nonce.csv", server.url());
    let _add = mock_operation(
        &mut server,
        "addDatasetMutation",
        json!({"addDataset": {"dataset": {
            "id": "RGF0YXNldDox",
            "filename": "nonce.csv",
            "s3Url": upload_url
        }}}),
    )
    .await;
    let _upload = server
        .mock("POST", "/storage/bucket")
        .with_status(403)
        .with_body("signature mismatch")
        .create_async()
        .await;

    let pair = CooperPair::new(&authed_config(&server)).unwrap();
    let err = pair
        .add_dataset_from_bytes(b"a,b\n".to_vec(), "UHJvamVjdDox", "nonce.csv")
        .await
        .unwrap_err();

    match err {
        PairError::Upload { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "signature mismatch");
        }
        other => panic!("expected Upload error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_evaluate_checkpoint_on_path() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;

    let upload_url = format!("{}/storage/bucket?key=data.csv", server.url());
    let _add = mock_operation(
        &mut server,
        "addDatasetMutation",
        json!({"addDataset": {"dataset": {
            "id": "RGF0YXNldDox",
            "filename": "data.csv",
            "s3Url": upload_url
        }}}),
    )
    .await;
    let _upload = server
        .mock("POST", "/storage/bucket")
        .with_status(204)
        .create_async()
        .await;
    let _get = mock_operation(
        &mut server,
        "datasetQuery",
        json!({"dataset": {"id": "RGF0YXNldDox", "filename": "data.csv"}}),
    )
    .await;
    let evaluation = mock_operation(
        &mut server,
        "addEvaluationMutation",
        json!({"addEvaluation": {"evaluation": {
            "id": "RXZhbHVhdGlvbjox",
            "dataset": {"id": "RGF0YXNldDox"},
            "checkpoint": {"id": "Q2hlY2twb2ludDox"},
            "status": "created"
        }}}),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(&path, b"a,b\n1,2\n").unwrap();

    let pair = CooperPair::new(&authed_config(&server)).unwrap();
    let result = pair
        .evaluate_checkpoint_on_path("Q2hlY2twb2ludDox", &path, "UHJvamVjdDox", None)
        .await
        .unwrap();

    assert_eq!(result["addEvaluation"]["evaluation"]["status"], "created");
    evaluation.assert_async().await;
}

#[tokio::test]
async fn test_add_checkpoint_from_expectations_config() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;

    let _add = mock_operation(
        &mut server,
        "addCheckpointMutation",
        json!({"addCheckpoint": {"checkpoint": {"id": "Q2hlY2twb2ludDox", "name": "foo"}}}),
    )
    .await;
    let update = server
        .mock("POST", "/graphql")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("updateCheckpoint".to_string()),
            Matcher::Regex("expect_column_to_exist".to_string()),
        ]))
        .with_body(
            json!({"data": {"updateCheckpoint": {"checkpoint": {
                "id": "Q2hlY2twb2ludDox",
                "expectations": {"edges": [{"node": {"id": "RXhwZWN0YXRpb246MQ=="}}]}
            }}}})
            .to_string(),
        )
        .create_async()
        .await;

    let config = ExpectationsConfig::new(vec![ExpectationConfig {
        expectation_type: "expect_column_to_exist".to_string(),
        kwargs: json!({"column": "a_column"}),
    }]);

    let pair = CooperPair::new(&authed_config(&server)).unwrap();
    let result = pair
        .add_checkpoint_from_expectations_config(&config, "foo")
        .await
        .unwrap();

    assert_eq!(
        result["updateCheckpoint"]["checkpoint"]["id"],
        "Q2hlY2twb2ludDox"
    );
    update.assert_async().await;
}

#[tokio::test]
async fn test_get_checkpoint_as_expectations_config_filters_inactive() {
    let mut server = Server::new_async().await;
    let _checkpoint = mock_operation(
        &mut server,
        "checkpointQuery",
        json!({"checkpoint": {
            "id": "Q2hlY2twb2ludDox",
            "expectations": {"edges": [
                {"node": {
                    "expectationType": "expect_column_to_exist",
                    "expectationKwargs": "{\"column\": \"a_column\"}",
                    "isActivated": true
                }},
                {"node": {
                    "expectationType": "expect_column_to_exist",
                    "expectationKwargs": "{\"column\": \"b_column\"}",
                    "isActivated": false
                }}
            ]}
        }}),
    )
    .await;

    let pair = CooperPair::connect(format!("{}/graphql", server.url())).unwrap();

    let active = pair
        .get_checkpoint_as_expectations_config("Q2hlY2twb2ludDox", false)
        .await
        .unwrap();
    assert_eq!(active.expectations.len(), 1);

    let all = pair
        .get_checkpoint_as_expectations_config("Q2hlY2twb2ludDox", true)
        .await
        .unwrap();
    assert_eq!(all.expectations.len(), 2);

    let json_string = pair
        .get_checkpoint_as_json_string("Q2hlY2twb2ludDox", false)
        .await
        .unwrap();
    let parsed: ExpectationsConfig = serde_json::from_str(&json_string).unwrap();
    assert_eq!(parsed, active);
}

#[tokio::test]
async fn test_add_checkpoint_validates_autoinspect_arguments() {
    let pair = CooperPair::connect("http://127.0.0.1:1/graphql").unwrap();

    let err = pair
        .add_checkpoint("my cool checkpoint", true, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PairError::InvalidInput(_)));

    let err = pair
        .add_checkpoint("my cool checkpoint", false, Some("RGF0YXNldDox"))
        .await
        .unwrap_err();
    assert!(matches!(err, PairError::InvalidInput(_)));
}

#[tokio::test]
async fn test_update_checkpoint_requires_a_field() {
    let pair = CooperPair::connect("http://127.0.0.1:1/graphql").unwrap();

    let err = pair
        .update_checkpoint("Q2hlY2twb2ludDox", None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PairError::InvalidInput(_)));

    let err = pair
        .update_checkpoint("Q2hlY2twb2ludDox", None, Some(vec![]), Some(vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, PairError::InvalidInput(_)));
}

#[tokio::test]
async fn test_expectation_kwargs_must_be_json() {
    let pair = CooperPair::connect("http://127.0.0.1:1/graphql").unwrap();

    let err = pair
        .add_expectation("Q2hlY2twb2ludDox", "expect_column_to_exist", "not json")
        .await
        .unwrap_err();
    assert!(matches!(err, PairError::InvalidInput(_)));

    let err = pair
        .update_expectation("RXhwZWN0YXRpb246MQ==", None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, PairError::InvalidInput(_)));

    let err = pair
        .update_expectation("RXhwZWN0YXRpb246MQ==", None, Some("{"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, PairError::InvalidInput(_)));
}

#[tokio::test]
async fn test_add_evaluation_dispatches_ids() {
    let mut server = Server::new_async().await;
    let evaluation = server
        .mock("POST", "/graphql")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("addEvaluationMutation".to_string()),
            Matcher::Regex("RGF0YXNldDox".to_string()),
            Matcher::Regex("Q2hlY2twb2ludDox".to_string()),
        ]))
        .with_body(
            json!({"data": {"addEvaluation": {"evaluation": {
                "id": "RXZhbHVhdGlvbjox",
                "status": "created"
            }}}})
            .to_string(),
        )
        .create_async()
        .await;

    let pair = CooperPair::connect(format!("{}/graphql", server.url())).unwrap();
    let result = pair
        .add_evaluation("RGF0YXNldDox", "Q2hlY2twb2ludDox")
        .await
        .unwrap();

    assert_eq!(result["addEvaluation"]["evaluation"]["status"], "created");
    evaluation.assert_async().await;
}

#[tokio::test]
async fn test_update_evaluation_sends_only_supplied_fields() {
    let mut server = Server::new_async().await;
    let update = server
        .mock("POST", "/graphql")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("updateEvaluation".to_string()),
            Matcher::Regex("pending".to_string()),
        ]))
        .with_body(
            json!({"data": {"updateEvaluation": {"evaluation": {
                "id": "RXZhbHVhdGlvbjox",
                "status": "pending"
            }}}})
            .to_string(),
        )
        .create_async()
        .await;

    let pair = CooperPair::connect(format!("{}/graphql", server.url())).unwrap();
    let result = pair
        .update_evaluation("RXZhbHVhdGlvbjox", Some("pending"), None)
        .await
        .unwrap();

    assert_eq!(
        result["updateEvaluation"]["evaluation"]["status"],
        "pending"
    );
    update.assert_async().await;
}
