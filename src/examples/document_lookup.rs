//! Document Lookup Example
//!
//! Single-shot requests: fetch, check and query documents by id.
//!
//! Run with: cargo run --example document_lookup -- config.json

use esclient_rs::{telemetry, Client, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = telemetry::init_telemetry("./logs")?;

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::load(&path)?,
        None => ClientConfig::from_address("localhost")?,
    };
    let mut client = Client::from_config(config)?;

    match client.exists_by_id("books", 1, "").await? {
        Some(response) if response.is_success() => println!("📝 books/1 exists"),
        Some(response) => println!("❓ books/1 missing (status {})", response.status),
        None => println!("❌ search engine unreachable"),
    }

    if let Some(response) = client.get_by_id("books", 1, "pretty").await? {
        println!("   {}", response.text());
    }

    let query = r#"{"query": {"match": {"title": "fox"}}, "size": 5}"#;
    if let Some(response) = client.get_query("books", "", query).await? {
        let body = response.json()?;
        println!("🔍 Search for 'fox': {} hits", body["hits"]["total"]);
    }

    client.close();
    Ok(())
}
