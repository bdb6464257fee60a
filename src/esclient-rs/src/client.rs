use esclient_core::{json, ClientConfig, Error, Method, Request, Response, Result, ScrollSession};
use std::fmt::Display;

use crate::transport::{HttpTransport, Transport};

/// Search engine REST API client
///
/// Owns the connection and a single scroll cursor. Scroll operations take
/// `&mut self`; run concurrent scrolls on separate clients.
pub struct Client<T: Transport = HttpTransport> {
    transport: Option<T>,
    scroll: ScrollSession,
}

impl Client<HttpTransport> {
    /// Connect to `host` or `host:port`; the port defaults to 9200
    pub fn new(address: &str) -> Result<Self> {
        Self::from_config(ClientConfig::from_address(address)?)
    }

    pub fn with_port(host: &str, port: u16) -> Result<Self> {
        Self::from_config(ClientConfig::new(host, port)?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        tracing::info!("Search client created for {}", transport.base_url());
        Ok(Self::with_transport(transport))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Some(transport),
            scroll: ScrollSession::new(),
        }
    }

    /// Get a document by ID
    pub async fn get_by_id(
        &self,
        index: &str,
        id: impl Display,
        params: &str,
    ) -> Result<Option<Response>> {
        self.request_by_id(Method::Get, index, id, params).await
    }

    /// Check whether a document exists (HEAD)
    pub async fn exists_by_id(
        &self,
        index: &str,
        id: impl Display,
        params: &str,
    ) -> Result<Option<Response>> {
        self.request_by_id(Method::Head, index, id, params).await
    }

    /// Delete a document by ID
    pub async fn delete_by_id(
        &self,
        index: &str,
        id: impl Display,
        params: &str,
    ) -> Result<Option<Response>> {
        self.request_by_id(Method::Delete, index, id, params).await
    }

    /// One-shot search with a JSON query body
    pub async fn get_query(
        &self,
        index: &str,
        params: &str,
        body: &str,
    ) -> Result<Option<Response>> {
        let body = json::parse_object(body)?;
        self.send(&Request::search(Method::Get, index, params, body))
            .await
    }

    /// Validate and store a scroll's opening request. Nothing is sent until
    /// the first [`Client::scroll`].
    pub fn initialize_scroll(&mut self, index: &str, params: &str, body: &str) -> Result<()> {
        self.scroll.initialize(index, params, body)
    }

    /// Fetch the next scroll page.
    ///
    /// The first call opens the scroll with the stored request, later calls
    /// continue from the last cursor. A page without a readable `scroll_id`
    /// is still returned; the previous cursor is kept.
    pub async fn scroll(&mut self) -> Result<Option<Response>> {
        let request = self.scroll.next_request()?;
        let Some(response) = self.send(&request).await? else {
            return Ok(None);
        };
        self.scroll.record(&response);
        Ok(Some(response))
    }

    /// Release the server-side cursor and forget the local scroll.
    ///
    /// Local state is reset even when the delete request fails.
    pub async fn clear_scroll(&mut self) -> Result<Option<Response>> {
        let Some(request) = self.scroll.clear_request() else {
            tracing::info!("No scroll request to clear found");
            self.scroll.reset();
            return Ok(None);
        };
        let response = self.send(&request).await;
        self.scroll.reset();
        response
    }

    pub fn scroll_session(&self) -> &ScrollSession {
        &self.scroll
    }

    /// Send a raw request through the connection
    pub async fn send(&self, request: &Request) -> Result<Option<Response>> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| Error::IllegalState("Client connection is closed".to_string()))?;
        Ok(transport.send(request).await)
    }

    /// Release the connection. Safe to call more than once.
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            if self.scroll.cursor().is_some() {
                tracing::warn!("Closing client with an uncleared scroll cursor");
            }
            tracing::info!("Search client connection closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_none()
    }

    async fn request_by_id(
        &self,
        method: Method,
        index: &str,
        id: impl Display,
        params: &str,
    ) -> Result<Option<Response>> {
        let request = Request::document(method, index, &id.to_string(), params);
        self.send(&request).await
    }
}
