//! Examples for using the Brandscan Server API

use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8080";

/// Auth is off unless the server has `BRANDSCAN_SERVER__API_KEYS` set; pass one
/// of those keys here via `BRANDSCAN_API_KEY`.
fn api_key() -> String {
    std::env::var("BRANDSCAN_API_KEY").unwrap_or_default()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();
    let api_key = api_key();

    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("2. Check an inline chat-completions payload:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/check"))
        .header("X-API-Key", &api_key)
        .json(&json!({
            "prompt": "What are the best CRM tools?",
            "brand": "Acme",
            "response": {
                "choices": [{
                    "message": { "content": "1. Globex\n2. Acme CRM\n3. Initech" }
                }]
            }
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("3. Let the configured provider answer:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/check"))
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&json!({
            "prompt": "Which project trackers do teams recommend?",
            "brand": "Initech"
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);

    Ok(())
}
