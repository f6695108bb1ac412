//! Shared helpers for client tests.

#![allow(dead_code)]

use flexiride_client::{AuthClient, ClientConfig};
use flexiride_identity::{IdentityResult, IdentityStore, KeyValueStore, MemoryKeyValueStore};
use flexiride_types::{BookingId, Role, Session, VehicleId};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Memory backend that counts reads.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryKeyValueStore,
    reads: AtomicUsize,
}

impl CountingStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for CountingStore {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn get_item(&self, key: &str) -> IdentityResult<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> IdentityResult<()> {
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> IdentityResult<()> {
        self.inner.remove_item(key)
    }
}

/// A fresh id in the form the API issues.
pub fn new_vehicle_id() -> VehicleId {
    uuid::Uuid::new_v4().to_string().parse().unwrap()
}

pub fn new_booking_id() -> BookingId {
    uuid::Uuid::new_v4().to_string().parse().unwrap()
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::with_origin(&server.uri())
}

/// An anonymous client against `server` with its backend exposed.
pub fn client_for(server: &MockServer) -> (Arc<CountingStore>, AuthClient) {
    let backend = Arc::new(CountingStore::default());
    let store = IdentityStore::new(backend.clone());
    let client = AuthClient::new(config_for(server), store).unwrap();
    (backend, client)
}

pub fn session(id: &str, email: &str, role: Role, token: &str) -> Session {
    Session {
        id: id.to_string(),
        email: email.to_string(),
        name: id.to_uppercase(),
        role,
        token: Some(token.to_string()),
    }
}

pub fn session_json(session: &Session) -> serde_json::Value {
    serde_json::to_value(session).unwrap()
}

/// Mounts a successful `/auth/login` for the given credentials.
pub async fn mount_login(server: &MockServer, email: &str, password: &str, session: &Session) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({"email": email, "password": password})))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json(session)))
        .mount(server)
        .await;
}
