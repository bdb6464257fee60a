//! esclient Client Library
//!
//! HTTP client for a search engine REST API (Elasticsearch-style):
//! document lookups by id, one-shot queries and scroll cursors.
//!
//! ```rust,no_run
//! use esclient_rs::Client;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut client = Client::new("localhost")?;
//!     client.initialize_scroll("books", "scroll=1m", r#"{"size": 100}"#)?;
//!     while let Some(page) = client.scroll().await? {
//!         let hits = page.json()?["hits"]["hits"].as_array().map_or(0, |h| h.len());
//!         if hits == 0 {
//!             break;
//!         }
//!         println!("fetched {} hits", hits);
//!     }
//!     client.clear_scroll().await?;
//!     client.close();
//!     Ok(())
//! }
//! ```

mod client;
pub mod telemetry;
mod transport;

pub use client::Client;
pub use esclient_core::{
    ClientConfig, Error, Method, Request, Response, Result, ScrollSession, ScrollState,
};
pub use transport::{HttpTransport, Transport};
