/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for intent-swap-client tests

use std::sync::Arc;

use intent_swap_client::{ClientConfig, QuoteRequest, ScriptedBackend, SwapClient};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client talking to a wiremock server over the reqwest backend
#[allow(dead_code)]
pub fn http_client(server: &MockServer) -> SwapClient {
    SwapClient::new(ClientConfig::new(server.uri()).expect("config")).expect("client init")
}

/// Client replaying canned responses in call order
#[allow(dead_code)]
pub fn scripted_client() -> (SwapClient, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::new());
    let config = ClientConfig::new("https://swap.example.test")
        .expect("config")
        .with_backend(backend.clone());
    let client = SwapClient::new(config).expect("client init");
    (client, backend)
}

/// Arbitrum to Base quote request used across tests
#[allow(dead_code)]
pub fn arbitrum_to_base_quote() -> QuoteRequest {
    QuoteRequest {
        from_chain_id: 42161,
        to_chain_id: 8453,
        from_token: "0xaf88d065e77c8cC2239327C5EDb3A432268e5831".to_string(),
        to_token: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
        amount: "100000".to_string(),
        sender: None,
        recipient: None,
        slippage_bps: None,
    }
}

/// Token fixture as the API serves it
#[allow(dead_code)]
pub fn token_json(chain_id: u64, symbol: &str, address: &str) -> Value {
    json!({
        "chainId": chain_id,
        "address": address,
        "symbol": symbol,
        "decimals": 6
    })
}
