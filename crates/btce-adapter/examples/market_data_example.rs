/*
[INPUT]:  Pair identifier (e.g., "btc_usd")
[OUTPUT]: Market data (exchange info, ticker, depth, trades, fee)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use btce_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: Query market data (no keys required)
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== BTC-e Market Data Example ===\n");

    let client = match BtceClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (no keys required for public endpoints)\n");

    let pair = "btc_usd";

    println!("Querying exchange info...");
    match client.info().await {
        Ok(info) => println!("✓ {} pairs listed", info.pairs.len()),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying ticker for {}...", pair);
    match client.ticker(pair).await {
        Ok(ticker) => println!("✓ Ticker: {:?}", ticker.get(pair)),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying depth for {}...", pair);
    match client.depth(pair).await {
        Ok(depth) => println!("✓ Depth: {:?}", depth.get(pair)),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying last 10 trades for {}...", pair);
    match client.trades(pair, Some(10)).await {
        Ok(trades) => println!("✓ Trades: {:?}", trades.get(pair)),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying fee for {}...", pair);
    match client.fee(pair).await {
        Ok(fee) => println!("✓ Fee: {:?}", fee.get(pair)),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
