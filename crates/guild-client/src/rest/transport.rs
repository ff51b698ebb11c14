//! The transport seam used by confirmed mutations

use async_trait::async_trait;
use serde_json::Value;

use super::error::TransportResult;
use super::route::Route;

/// Issues a single request and settles once the service answers.
///
/// Implementations own retries, rate limiting, timeouts and cancellation;
/// callers never retry. An empty response body is returned as `Value::Null`.
#[async_trait]
pub trait RestTransport: Send + Sync {
    async fn request(&self, route: &Route, body: Option<Value>) -> TransportResult<Value>;
}
