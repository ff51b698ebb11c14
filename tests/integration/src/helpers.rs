//! Test helpers for integration tests
//!
//! Provides a scripted transport, a context builder, and an axum server that
//! answers every route with one canned response for the reqwest transport.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use guild_client::{
    ClientContext, EntityRegistry, Member, Relations, RestTransport, Route, TransportError,
    TransportResult,
};
use guild_common::{try_init_tracing, Environment, TracingConfig};
use guild_core::Snowflake;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::fixtures::member_payload;

/// A request the transport saw
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub route: Route,
    pub body: Option<Value>,
}

struct Scripted {
    outcome: TransportResult<Value>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Transport that records every request and replays queued outcomes.
///
/// With nothing queued it answers `Ok(Value::Null)`.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    script: Mutex<VecDeque<Scripted>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful response
    pub fn respond(&self, body: Value) {
        self.push(Ok(body), None);
    }

    /// Queue a failure
    pub fn fail(&self, err: TransportError) {
        self.push(Err(err), None);
    }

    /// Queue a successful response that is held until the returned sender fires
    pub fn respond_after(&self, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Ok(body), Some(rx));
        tx
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn push(&self, outcome: TransportResult<Value>, gate: Option<oneshot::Receiver<()>>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted { outcome, gate });
    }
}

#[async_trait]
impl RestTransport for RecordingTransport {
    async fn request(&self, route: &Route, body: Option<Value>) -> TransportResult<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            route: route.clone(),
            body,
        });

        let next = self.script.lock().unwrap().pop_front();
        let Some(Scripted { outcome, gate }) = next else {
            return Ok(Value::Null);
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        outcome
    }
}

/// A registry, a recording transport, and a context acting as `self_id`
pub struct TestGuild {
    pub registry: Arc<EntityRegistry>,
    pub transport: Arc<RecordingTransport>,
    pub ctx: Arc<ClientContext>,
}

impl TestGuild {
    pub fn new(self_id: u64) -> Self {
        // Already set by an earlier test in this binary
        let _ = try_init_tracing(&TracingConfig::for_environment(Environment::Development));

        let registry = EntityRegistry::new_shared();
        let transport = RecordingTransport::new();
        let ctx = Arc::new(ClientContext::new(
            Snowflake::new(self_id),
            Arc::clone(&transport) as Arc<dyn RestTransport>,
            Relations::from_registry(&registry),
        ));
        Self {
            registry,
            transport,
            ctx,
        }
    }

    /// Member built from the fixture payload
    pub fn member(&self, user_id: u64, roles: &[u64]) -> Result<Member> {
        Ok(Member::from_value(
            Arc::clone(&self.ctx),
            member_payload(user_id, roles),
        )?)
    }
}

/// A request the mock server received
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// HTTP server answering every request with one canned response
pub struct MockHttpServer {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
    _handle: JoinHandle<()>,
}

impl MockHttpServer {
    pub async fn start(status: u16, body: &'static str) -> Result<Self> {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status)?,
            body,
            received: Arc::clone(&received),
        };
        let app = Router::new().fallback(capture).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            received,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}

/// Catch-all handler: record the request, answer with the canned response
async fn capture(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(String::from);

    state.received.lock().unwrap().push(ReceivedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization,
        body,
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}
