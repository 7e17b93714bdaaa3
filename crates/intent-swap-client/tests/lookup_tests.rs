/*
[INPUT]:  Scripted lookup and submission responses
[OUTPUT]: Test results for absence-as-null and acknowledgement policies
[POS]:    Integration tests - single-entity endpoints
[UPDATE]: When lookup or submission policies change
*/

mod common;

use common::{scripted_client, token_json};
use intent_swap_client::{BackendResponse, DepositSubmission, TokenLookup};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(404, true)]
#[case(400, true)]
#[case(401, false)]
#[case(409, false)]
#[case(500, false)]
#[tokio::test]
async fn test_token_absence_statuses(#[case] status: u16, #[case] absent: bool) {
    let (client, backend) = scripted_client();
    backend.push_json(status, json!({ "message": "nope" }));

    let result = client.token(8453, "USDC").await;

    match result {
        Ok(token) => {
            assert!(absent, "status {status} should have been an error");
            assert!(token.is_none());
        }
        Err(err) => {
            assert!(!absent, "status {status} should have been absence");
            assert_eq!(err.status, status);
        }
    }
}

#[rstest]
#[case(404, true)]
#[case(400, false)]
#[case(500, false)]
#[tokio::test]
async fn test_intent_absence_statuses(#[case] status: u16, #[case] absent: bool) {
    let (client, backend) = scripted_client();
    backend.push_json(status, json!({ "message": "nope" }));

    let result = client.intent_status("intent-123").await;

    assert_eq!(result.is_ok(), absent);
    if let Ok(status) = result {
        assert!(status.is_none());
    }
}

#[tokio::test]
async fn test_lookup_routes_by_format() {
    let (client, backend) = scripted_client();
    let address = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
    backend
        .push_json(200, token_json(8453, "USDC", address))
        .push_json(200, token_json(8453, "USDC", address))
        .push_json(200, token_json(8453, "USDC", address));

    let by_address = client.token(8453, address).await.expect("address");
    let by_symbol = client.token(8453, "usdc").await.expect("symbol");
    let explicit = client
        .token(8453, TokenLookup::BySymbol("0xabc".to_string()))
        .await
        .expect("explicit");

    assert_eq!(by_address, by_symbol);
    assert!(explicit.is_some());
    let urls: Vec<String> = backend.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            format!("https://swap.example.test/v1/tokens/8453/address/{address}"),
            "https://swap.example.test/v1/tokens/8453/symbol/usdc".to_string(),
            "https://swap.example.test/v1/tokens/8453/symbol/0xabc".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_repeated_lookup_is_not_cached() {
    let (client, backend) = scripted_client();
    let status = json!({ "intentId": "intent-123", "status": "pending" });
    backend
        .push_json(200, status.clone())
        .push_json(200, status);

    let first = client.intent_status("intent-123").await.expect("first");
    let second = client.intent_status("intent-123").await.expect("second");

    assert_eq!(first, second);
    assert_eq!(backend.call_count(), 2);
}

#[tokio::test]
async fn test_bodiless_lookup_is_absent() {
    let (client, backend) = scripted_client();
    backend.push_response(BackendResponse::new(204));

    assert!(client.intent_status("intent-123").await.expect("ok").is_none());
}

#[tokio::test]
async fn test_deposit_acknowledgement() {
    let (client, backend) = scripted_client();
    backend
        .push_json(200, json!({ "accepted": true, "intentId": "intent-123" }))
        .push_response(BackendResponse::new(200).with_body("queued"))
        .push_json(409, json!({ "message": "Already submitted", "code": "Duplicate" }));
    let deposit = DepositSubmission {
        tx_hash: "0xabc".to_string(),
        chain_id: 42161,
    };

    assert!(client.submit_deposit("intent-123", &deposit).await.expect("accepted"));
    assert!(!client.submit_deposit("intent-123", &deposit).await.expect("not accepted"));
    let err = client
        .submit_deposit("intent-123", &deposit)
        .await
        .expect_err("conflict");
    assert_eq!(err.code.as_deref(), Some("Duplicate"));

    let sent = &backend.requests()[0];
    assert_eq!(sent.header("content-type"), Some("application/json"));
    assert_eq!(sent.json_body(), Some(json!({ "txHash": "0xabc", "chainId": 42161 })));
}
