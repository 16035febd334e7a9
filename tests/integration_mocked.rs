/// Integration tests with a mocked claims backend
/// Exercises the live transport end to end without a real server
use claims_reconciler::claims_client::ClaimsClient;
use claims_reconciler::errors::AppError;
use claims_reconciler::ingestion::ClaimSource;
use claims_reconciler::models::ClaimStatus;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_claims(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/claims"))
        .respond_with(response)
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_bare_array_is_normalized() {
    let mock_server = MockServer::start().await;

    let mock_response = serde_json::json!([
        {
            "claim_id": "cl-1",
            "patient": "Jane Doe",
            "cpt_code": "99213",
            "billed_amount": "150.00",
            "expected": "120",
            "actual": "115",
            "status": "paid",
            "payer": "Aetna"
        },
        {
            "id": "cl-2",
            "expected_reimbursement": 68,
            "status": "processing"
        }
    ]);
    mount_claims(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(&mock_response),
    )
    .await;

    let client = ClaimsClient::new(mock_server.uri()).unwrap();
    let claims = client.fetch_claims().await.unwrap();

    assert_eq!(claims.len(), 2);

    let first = &claims[0];
    assert_eq!(first.id, "cl-1");
    assert_eq!(first.patient_name, "Jane Doe");
    assert_eq!(first.procedure_code, "99213");
    assert_eq!(first.billed_amount, 150.0);
    assert_eq!(first.expected_reimbursement, 120.0);
    assert_eq!(first.actual_reimbursement, Some(115.0));
    assert_eq!(first.variance, Some(-5.0));
    assert_eq!(first.status, Some(ClaimStatus::Paid));
    assert_eq!(first.payer_name, "Aetna");

    let second = &claims[1];
    assert_eq!(second.id, "cl-2");
    assert_eq!(second.actual_reimbursement, None);
    assert_eq!(second.variance, None);
    assert_eq!(second.billed_amount, 0.0);
    assert_eq!(second.status, Some(ClaimStatus::Processing));
}

#[tokio::test]
async fn test_data_wrapper_is_unwrapped() {
    let mock_server = MockServer::start().await;

    let mock_response = serde_json::json!({
        "data": [{"claim_id": "cl-9", "status": "denied", "billed": 40}]
    });
    mount_claims(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(&mock_response),
    )
    .await;

    let client = ClaimsClient::new(mock_server.uri()).unwrap();
    let claims = client.fetch_claims().await.unwrap();

    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].id, "cl-9");
    assert_eq!(claims[0].billed_amount, 40.0);
    assert_eq!(claims[0].status, Some(ClaimStatus::Denied));
}

#[tokio::test]
async fn test_server_error_fails_whole_batch() {
    let mock_server = MockServer::start().await;

    mount_claims(
        &mock_server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = ClaimsClient::new(mock_server.uri()).unwrap();
    let result = client.fetch_claims().await;

    match result {
        Err(AppError::Transport {
            status,
            status_text,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_is_a_transport_error() {
    let mock_server = MockServer::start().await;

    mount_claims(&mock_server, ResponseTemplate::new(404)).await;

    let client = ClaimsClient::new(mock_server.uri()).unwrap();
    let err = client.fetch_claims().await.unwrap_err();

    assert_eq!(err.transport_status(), Some(404));
    assert_eq!(err.to_string(), "Failed to fetch claims: 404 Not Found");
}

#[tokio::test]
async fn test_unexpected_shape_yields_empty_batch() {
    let mock_server = MockServer::start().await;

    mount_claims(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"rows": [{"id": "x"}]})),
    )
    .await;

    let client = ClaimsClient::new(mock_server.uri()).unwrap();
    let claims = client.fetch_claims().await.unwrap();

    assert!(claims.is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_an_external_api_error() {
    let mock_server = MockServer::start().await;

    mount_claims(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;

    let client = ClaimsClient::new(mock_server.uri()).unwrap();
    let err = client.fetch_claims().await.unwrap_err();

    assert!(matches!(err, AppError::ExternalApiError(_)));
    assert_eq!(err.transport_status(), None);
}

#[tokio::test]
async fn test_trailing_slash_base_url_hits_claims_path() {
    let mock_server = MockServer::start().await;

    mount_claims(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!([])),
    )
    .await;

    let client = ClaimsClient::new(format!("{}/", mock_server.uri())).unwrap();
    let claims = client.fetch_claims().await.unwrap();

    assert!(claims.is_empty());
}

#[tokio::test]
async fn test_find_claim_fetches_full_collection() {
    let mock_server = MockServer::start().await;

    mount_claims(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"claim_id": "cl-1", "status": "paid"},
            {"claim_id": "cl-2", "status": "appealed", "patient_name": "Emily Davis"}
        ])),
    )
    .await;

    let client = ClaimsClient::new(mock_server.uri()).unwrap();
    let claim = client.find_claim("cl-2").await.unwrap().unwrap();

    assert_eq!(claim.patient_name, "Emily Davis");
    assert_eq!(claim.status, Some(ClaimStatus::Appealed));
}
