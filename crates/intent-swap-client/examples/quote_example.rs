/*
[INPUT]:  Base URL of the swap API (first CLI argument)
[OUTPUT]: Supported chains, a token lookup and a quote printed to stdout
[POS]:    Examples - end-to-end tour of the client facade
[UPDATE]: When facade methods change
*/

use futures_util::TryStreamExt;
use intent_swap_client::*;
use tracing_subscriber::EnvFilter;

/// Example: list chains, resolve a token and request a quote
///
/// Run with `RUST_LOG=intent_swap_client=debug` to see every dispatched request.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080".to_string());

    println!("=== Cross-chain Swap Example ===\n");

    let client = match ClientConfig::new(&base_url).and_then(SwapClient::new) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Client created for {}\n", client.base_url());

    println!("Listing supported chains...");
    match client.chains(None).try_collect::<Vec<Vec<Chain>>>().await {
        Ok(pages) => {
            for chain in pages.into_iter().flatten() {
                println!("  {} ({})", chain.name, chain.chain_id);
            }
        }
        Err(e) => println!("✗ Error: {} (status {})", e.message, e.status),
    }

    println!("\nLooking up USDC on Base...");
    match client.token(8453, "USDC").await {
        Ok(Some(token)) => println!("✓ Token: {} at {}", token.symbol, token.address),
        Ok(None) => println!("✗ Token not listed"),
        Err(e) => println!("✗ Error: {} (status {})", e.message, e.status),
    }

    println!("\nRequesting quote Arbitrum -> Base...");
    let request = QuoteRequest {
        from_chain_id: 42161,
        to_chain_id: 8453,
        from_token: "0xaf88d065e77c8cC2239327C5EDb3A432268e5831".to_string(),
        to_token: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
        amount: "100000".to_string(),
        sender: None,
        recipient: None,
        slippage_bps: Some(50),
    };
    match client.quote(&request).await {
        Ok(quote) => println!("✓ Quote: intent {} -> {:?}", quote.intent_id, quote.amount_out),
        Err(e) if e.is_transport_failure() => println!("✗ Server unreachable: {}", e.message),
        Err(e) => println!(
            "✗ Error: {} (status {}, request id {:?})",
            e.message,
            e.status,
            e.request_id()
        ),
    }

    println!("\n✓ Swap example complete");
}
