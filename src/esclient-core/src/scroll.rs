//! Scroll cursor state machine
//!
//! A scroll walks a large result set in pages. The session stores the
//! opening request, then tracks the opaque cursor token the server hands
//! back with every page:
//!
//! ```text
//! Unopened --initialize--> AwaitingFirstPage --record(scroll_id)--> Paging
//!    ^                                                                 |
//!    +------------------------------ reset ----------------------------+
//! ```
//!
//! The session never touches the network. It produces the [`Request`] for
//! the next step and absorbs the [`Response`] the caller got back, so the
//! whole protocol can be driven and checked offline.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::json::{self, SCROLL_ID};
use crate::models::{search_path, Method, Request, Response};

pub const SCROLL_PATH: &str = "/_search/scroll";

/// The request that opens the server-side scroll context
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningRequest {
    pub path: String,
    pub body: Map<String, Value>,
    /// Duration literal from the `scroll=` clause, e.g. "1m"
    pub keep_alive: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScrollState {
    #[default]
    Unopened,
    AwaitingFirstPage(OpeningRequest),
    Paging {
        opening: OpeningRequest,
        token: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ScrollSession {
    state: ScrollState,
}

impl ScrollSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store the opening request. Nothing is sent.
    pub fn initialize(&mut self, index: &str, params: &str, body: &str) -> Result<()> {
        if self.is_active() {
            return Err(Error::IllegalState(
                "A scroll is already in progress, clear it before starting another".to_string(),
            ));
        }

        let keep_alive = json::scroll_param(params).ok_or_else(|| {
            tracing::error!(
                "Invalid scroll initialization request: {}, {}, {}",
                index,
                params,
                body
            );
            Error::InvalidArgument(
                "Invalid scroll initialization request, requires scroll=<time> parameter"
                    .to_string(),
            )
        })?;

        let body_json = json::parse_object(body)?;
        if !body_json.contains_key("size") {
            tracing::error!("Invalid body, required size parameter not found: {}", body);
            return Err(Error::InvalidArgument(format!(
                "Invalid body, required size parameter: {}",
                body
            )));
        }

        self.state = ScrollState::AwaitingFirstPage(OpeningRequest {
            path: search_path(index, params),
            body: body_json,
            keep_alive: keep_alive.to_string(),
        });
        tracing::debug!("Scroll initialized for {} (keep alive {})", index, keep_alive);
        Ok(())
    }

    /// The request that fetches the next page
    pub fn next_request(&self) -> Result<Request> {
        match &self.state {
            ScrollState::Unopened => Err(Error::IllegalState(
                "Scroll was not initialized".to_string(),
            )),
            ScrollState::AwaitingFirstPage(opening) => Ok(Request::new(
                Method::Post,
                opening.path.clone(),
                opening.body.clone(),
            )),
            ScrollState::Paging { opening, token } => Ok(Request::new(
                Method::Post,
                SCROLL_PATH,
                json::object([
                    ("scroll", opening.keep_alive.clone()),
                    (SCROLL_ID, token.clone()),
                ]),
            )),
        }
    }

    /// Take the cursor token from a page response.
    ///
    /// Returns false and keeps the previous token when the body is not JSON
    /// or carries no `scroll_id`.
    pub fn record(&mut self, response: &Response) -> bool {
        if !self.is_active() {
            tracing::warn!("Ignoring page response for a scroll that was not initialized");
            return false;
        }
        let Some(token) = json::scroll_id(&response.body) else {
            tracing::warn!(
                "Couldn't read scroll_id from response (status {}), keeping previous cursor",
                response.status
            );
            return false;
        };

        self.state = match std::mem::take(&mut self.state) {
            ScrollState::Unopened => ScrollState::Unopened,
            ScrollState::AwaitingFirstPage(opening) | ScrollState::Paging { opening, .. } => {
                ScrollState::Paging { opening, token }
            }
        };
        true
    }

    /// The request that releases the server-side cursor, if one is held
    pub fn clear_request(&self) -> Option<Request> {
        self.cursor().map(|token| {
            Request::new(
                Method::Delete,
                SCROLL_PATH,
                json::object([(SCROLL_ID, token.to_string())]),
            )
        })
    }

    pub fn reset(&mut self) {
        self.state = ScrollState::Unopened;
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn cursor(&self) -> Option<&str> {
        match &self.state {
            ScrollState::Paging { token, .. } => Some(token.as_str()),
            _ => None,
        }
    }

    pub fn keep_alive(&self) -> Option<&str> {
        match &self.state {
            ScrollState::Unopened => None,
            ScrollState::AwaitingFirstPage(opening) | ScrollState::Paging { opening, .. } => {
                Some(opening.keep_alive.as_str())
            }
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, ScrollState::Unopened)
    }
}
