//! Session cache and login/register/logout facade.

use crate::api::{ApiClient, server_message, transport_message};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use flexiride_identity::IdentityStore;
use flexiride_types::{Role, Session};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};
use tracing::{debug, info, warn};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Register response; the service may leave out the role.
#[derive(Deserialize)]
struct RegisteredUser {
    id: String,
    email: String,
    name: String,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    token: Option<String>,
}

impl From<RegisteredUser> for Session {
    fn from(user: RegisteredUser) -> Self {
        Session {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.unwrap_or(Role::Customer),
            token: user.token,
        }
    }
}

/// The authoritative view of the signed-in user.
///
/// Anonymous until a login or register succeeds, or until a read finds a
/// persisted session to adopt. The in-memory copy wins while present; the
/// identity store is consulted only when memory is empty.
pub struct AuthClient {
    config: ClientConfig,
    http: Client,
    store: IdentityStore,
    current: RwLock<Option<Session>>,
}

impl AuthClient {
    /// Creates an anonymous client over `store`.
    ///
    /// Nothing is read from the store until the first session query.
    pub fn new(config: ClientConfig, store: IdentityStore) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            http,
            store,
            current: RwLock::new(None),
        })
    }

    /// Returns the configuration the client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the backing identity store.
    #[must_use]
    pub fn store(&self) -> &IdentityStore {
        &self.store
    }

    /// Signs in with email and password.
    ///
    /// On success the returned session replaces any cached one and is
    /// persisted. On failure the cached session is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        debug!("Logging in as {}", email);

        let response = self
            .http
            .post(self.config.auth_url("login"))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| {
                warn!("Login request failed: {}", e);
                ClientError::LoginFailed(transport_message(&e))
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| "Invalid credentials".to_string());
            return Err(ClientError::InvalidCredentials(message));
        }
        if !status.is_success() {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| format!("server returned {status}"));
            warn!("Login failed with {}: {}", status, message);
            return Err(ClientError::LoginFailed(message));
        }

        let session: Session = response
            .json()
            .await
            .map_err(|e| ClientError::LoginFailed(format!("invalid session payload: {e}")))?;

        self.adopt(session.clone());
        Ok(session)
    }

    /// Creates an account and signs in as it.
    ///
    /// The session role falls back to [`Role::Customer`] when the service
    /// omits it. Every failure is reported as
    /// [`ClientError::RegistrationFailed`].
    pub async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<Session> {
        debug!("Registering {}", email);

        let response = self
            .http
            .post(self.config.auth_url("register"))
            .json(&RegisterRequest {
                name,
                email,
                password,
            })
            .send()
            .await
            .map_err(|e| {
                warn!("Register request failed: {}", e);
                ClientError::RegistrationFailed(transport_message(&e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| format!("server returned {status}"));
            warn!("Registration failed with {}: {}", status, message);
            return Err(ClientError::RegistrationFailed(message));
        }

        let user: RegisteredUser = response.json().await.map_err(|e| {
            ClientError::RegistrationFailed(format!("invalid session payload: {e}"))
        })?;

        let session = Session::from(user);
        self.adopt(session.clone());
        Ok(session)
    }

    /// Signs out: forgets the cached session and removes the persisted one.
    pub fn logout(&self) {
        let previous = {
            let mut current = self.write_current();
            self.store.clear();
            current.take()
        };

        if let Some(session) = previous {
            info!("Signed out {}", session.email);
        }
    }

    /// Drops the in-memory session only. The next read re-hydrates from the
    /// identity store.
    pub fn invalidate(&self) {
        *self.write_current() = None;
    }

    /// Returns the signed-in user, hydrating from the store if needed.
    #[must_use]
    pub fn current_user(&self) -> Option<Session> {
        self.hydrate()
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.hydrate().is_some()
    }

    /// Returns true if a user is signed in with `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.hydrate().is_some_and(|s| s.has_role(role))
    }

    /// Builds a client for `base_url` carrying the current bearer token.
    ///
    /// The header is taken from the session as it is right now; call this
    /// again after any login or logout.
    #[must_use]
    pub fn authenticated_client(&self, base_url: &str) -> ApiClient {
        let token = self
            .hydrate()
            .and_then(|s| s.bearer_token().map(String::from));
        ApiClient::new(self.http.clone(), base_url, token)
    }

    /// [`AuthClient::authenticated_client`] for the configured resource API.
    #[must_use]
    pub fn api_client(&self) -> ApiClient {
        self.authenticated_client(&self.config.api_base_url)
    }

    /// Single cache-fill path for every read.
    ///
    /// The cold path reads the store under the write lock, and `adopt` and
    /// `logout` change the store under the same lock, so memory and store
    /// always move together.
    fn hydrate(&self) -> Option<Session> {
        if let Some(session) = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Some(session.clone());
        }

        let mut current = self.write_current();
        if current.is_none() {
            if let Some(stored) = self.store.get() {
                debug!("Restored session for {} from store", stored.email);
                *current = Some(stored);
            }
        }
        current.clone()
    }

    /// Replaces the cached session and persists it. Last writer wins.
    fn adopt(&self, session: Session) {
        info!("Signed in as {} ({})", session.email, session.role);
        let mut current = self.write_current();
        self.store.put(&session);
        *current = Some(session);
    }

    fn write_current(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let signed_in = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("AuthClient")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("signed_in", &signed_in)
            .finish()
    }
}
