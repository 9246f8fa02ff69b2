/*
[INPUT]:  Keys from BTCE_PUBLIC_KEY / BTCE_SECRET_KEY and order parameters
[OUTPUT]: Account info, order placement and cancellation results
[POS]:    Examples - trading operations
[UPDATE]: When trading API changes
*/

use btce_adapter::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Example: Trading operations (requires keys + HMAC body signature)
///
/// Every call is awaited before the next one so nonces reach the exchange
/// in order.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== BTC-e Trading Example ===\n");

    let client = match BtceClient::with_credentials(Credentials::from_env(), 0) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created");

    match client.get_info().await {
        Ok(info) => println!("✓ Funds: {:?}", info.funds),
        Err(e) => {
            println!("✗ Error: {}", e);
            return;
        }
    }

    let request = TradeRequest::new(
        "btc_usd",
        TradeType::Buy,
        Decimal::from_str("100").unwrap(),
        Decimal::from_str("0.01").unwrap(),
    );
    println!("\nPlacing order: {:?}", request);

    let order_id = match client.trade(request).await {
        Ok(result) => {
            println!("✓ Order placed: {:?}", result);
            result.order_id
        }
        Err(e) => {
            println!("✗ Error: {}", e);
            if let Some(payload) = e.payload() {
                println!("  Response: {}", payload);
            }
            return;
        }
    };

    if order_id == 0 {
        println!("\nOrder filled immediately, nothing to cancel");
        return;
    }

    match client.cancel_order(order_id).await {
        Ok(result) => println!("✓ Cancelled order {}", result.order_id),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Trading example complete");
}
