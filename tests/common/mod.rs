#![allow(dead_code)]

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vehicle_lookup_proxy::application::services::LookupService;
use vehicle_lookup_proxy::domain::{Branding, Sanitizer};
use vehicle_lookup_proxy::infrastructure::cache::MemoryCache;
use vehicle_lookup_proxy::infrastructure::clock::Clock;
use vehicle_lookup_proxy::infrastructure::upstream::HttpUpstream;
use vehicle_lookup_proxy::state::{ApiKeys, AppState};

pub const API_KEY: &str = "SPLEXXO";
pub const TTL_SECONDS: u64 = 3600;

/// Clock that only moves when told to.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self(Mutex::new(Utc::now())))
    }

    pub fn advance(&self, seconds: i64) {
        let mut now = self.0.lock().unwrap();
        *now += TimeDelta::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

#[derive(Clone)]
struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

/// In-process stand-in for the third-party lookup service.
#[derive(Clone)]
pub struct FakeUpstream {
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
    reply: Arc<Mutex<Reply>>,
    pub base_url: String,
}

impl FakeUpstream {
    /// Starts a server on a random loopback port answering `GET /rc`.
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let fake = Self {
            calls: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new(Reply {
                status,
                body: body.to_string(),
                delay: Duration::ZERO,
            })),
            base_url: format!("http://{}/rc", addr),
        };

        let app = Router::new()
            .route("/rc", get(upstream_handler))
            .with_state(fake.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        fake
    }

    pub fn set_reply(&self, status: u16, body: &str) {
        let mut reply = self.reply.lock().unwrap();
        reply.status = status;
        reply.body = body.to_string();
    }

    pub fn set_delay(&self, delay: Duration) {
        self.reply.lock().unwrap().delay = delay;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

async fn upstream_handler(
    State(fake): State<FakeUpstream>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    fake.calls.fetch_add(1, Ordering::SeqCst);
    if let Some(query) = params.get("query") {
        fake.queries.lock().unwrap().push(query.clone());
    }

    let reply = fake.reply.lock().unwrap().clone();
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    (
        StatusCode::from_u16(reply.status).unwrap(),
        reply.body,
    )
}

/// Builds application state pointed at `upstream_url`.
pub fn create_test_state(upstream_url: &str, clock: Arc<ManualClock>) -> AppState {
    create_test_state_with_timeout(upstream_url, clock, Duration::from_secs(5))
}

pub fn create_test_state_with_timeout(
    upstream_url: &str,
    clock: Arc<ManualClock>,
    timeout: Duration,
) -> AppState {
    let cache = Arc::new(MemoryCache::with_clock(TTL_SECONDS, clock));
    let upstream = Arc::new(HttpUpstream::new(upstream_url, timeout).unwrap());

    let lookup_service = Arc::new(LookupService::new(
        cache,
        upstream,
        Sanitizer::new("@oxmzoo", "oxmzoo").unwrap(),
        Branding::default(),
    ));

    AppState::new(lookup_service, ApiKeys::new([API_KEY]))
}
