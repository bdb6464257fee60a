//! JSON body helpers

use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub const SCROLL_ID: &str = "scroll_id";

/// Parse a request body, which must be a JSON object.
pub fn parse_object(body: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) | Err(_) => {
            tracing::error!("Invalid body (not a valid json object): {}", body);
            Err(Error::InvalidArgument(format!(
                "Invalid body, should be json: {}",
                body
            )))
        }
    }
}

/// Pull a string `scroll_id` out of a response body
pub fn scroll_id(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get(SCROLL_ID)?.as_str().map(str::to_string)
}

/// Find the duration of the `scroll=<duration>` clause in a query string
pub fn scroll_param(params: &str) -> Option<&str> {
    params
        .split('&')
        .filter_map(|clause| clause.strip_prefix("scroll="))
        .find(|duration| !duration.is_empty())
}

pub fn object(entries: impl IntoIterator<Item = (&'static str, String)>) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value)))
        .collect()
}
