//! Scroll Example
//!
//! Pages through every document of an index with a scroll cursor, then
//! releases the cursor.
//!
//! Run with: cargo run --example scroll_index -- localhost:9200 books

use esclient_rs::{telemetry, Client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = telemetry::init_telemetry("./logs")?;

    let mut args = std::env::args().skip(1);
    let address = args.next().unwrap_or_else(|| "localhost".to_string());
    let index = args.next().unwrap_or_else(|| "books".to_string());

    let mut client = Client::new(&address)?;
    client.initialize_scroll(
        &index,
        "scroll=1m",
        r#"{"size": 100, "query": {"match_all": {}}}"#,
    )?;

    let mut total = 0;
    loop {
        let Some(page) = client.scroll().await? else {
            tracing::error!("No response from {}, giving up", address);
            break;
        };
        if !page.is_success() {
            tracing::error!("Scroll failed with status {}: {}", page.status, page.text());
            break;
        }

        let hits = page.json()?["hits"]["hits"]
            .as_array()
            .map_or(0, |hits| hits.len());
        if hits == 0 {
            break;
        }
        total += hits;
        println!("📄 page of {} hits ({} so far)", hits, total);
    }

    if let Some(response) = client.clear_scroll().await? {
        println!("🧹 scroll cleared (status {})", response.status);
    }
    client.close();

    println!("✅ Fetched {} documents from {}", total, index);
    Ok(())
}
