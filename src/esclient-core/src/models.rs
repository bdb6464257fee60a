use serde_json::{Map, Value};
use std::fmt;

/// HTTP verbs the client issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Delete,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Delete => "DELETE",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request against the search engine, relative to the base URL
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Map<String, Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, body: Map<String, Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    /// Request without a payload
    pub fn empty(method: Method, path: impl Into<String>) -> Self {
        Self::new(method, path, Map::new())
    }

    /// `{index}/_doc/{id}?{params}` with an empty body
    pub fn document(method: Method, index: &str, id: &str, params: &str) -> Self {
        Self::empty(method, with_params(&format!("{}/_doc/{}", index, id), params))
    }

    /// `{index}/_search?{params}` carrying `body`
    pub fn search(method: Method, index: &str, params: &str, body: Map<String, Value>) -> Self {
        Self::new(method, search_path(index, params), body)
    }

    /// An empty body is sent without any payload
    pub fn has_payload(&self) -> bool {
        !self.body.is_empty()
    }

    pub fn payload(&self) -> Option<String> {
        self.has_payload()
            .then(|| Value::Object(self.body.clone()).to_string())
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if let Some(payload) = self.payload() {
            write!(f, " {}", payload)?;
        }
        Ok(())
    }
}

pub fn search_path(index: &str, params: &str) -> String {
    with_params(&format!("{}/_search", index), params)
}

fn with_params(path: &str, params: &str) -> String {
    format!("{}?{}", path, params)
}

/// Raw HTTP response. Error statuses (4xx/5xx) are ordinary responses.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_slice(&self.body)
    }
}
