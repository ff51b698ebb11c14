//! reqwest-backed transport

use std::time::Duration;

use async_trait::async_trait;
use guild_common::ApiConfig;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::debug;

use super::error::{TransportError, TransportResult};
use super::route::{Method, Route};
use super::transport::RestTransport;

/// HTTP transport over a shared `reqwest::Client`
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Build a transport from the API settings
    pub fn new(config: &ApiConfig) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Absolute URL for a route
    pub fn url(&self, route: &Route) -> String {
        format!("{}/{}", self.base_url, route.path)
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl RestTransport for HttpTransport {
    async fn request(&self, route: &Route, body: Option<Value>) -> TransportResult<Value> {
        let mut request = self
            .client
            .request(reqwest_method(route.method), self.url(route));

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        debug!(route = %route, status = status.as_u16(), "Request completed");

        if !status.is_success() {
            return Err(TransportError::status(status.as_u16(), text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
