//! HTTP client bound to one base URL and one session snapshot.

use crate::config::join_url;
use crate::error::{ClientError, ClientResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, warn};

/// A request helper carrying the bearer token current at creation time.
///
/// Obtain one from [`crate::AuthClient::authenticated_client`] right before
/// issuing requests and drop it afterwards; holding it across a login or
/// logout keeps the old token.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub(crate) fn new(http: Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the `Authorization` header value this client sends, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    /// Returns true if requests carry a bearer token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Builds the absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// `GET path`, decoding a JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, action: &str) -> ClientResult<T> {
        self.send(self.http.get(self.url(path)), action).await
    }

    /// `POST path` with a JSON body, decoding a JSON response.
    pub async fn post<B, T>(&self, path: &str, body: &B, action: &str) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body), action)
            .await
    }

    /// `POST path` without a body, decoding a JSON response.
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        action: &str,
    ) -> ClientResult<T> {
        self.send(self.http.post(self.url(path)), action).await
    }

    /// `DELETE path`, decoding a JSON response.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, action: &str) -> ClientResult<T> {
        self.send(self.http.delete(self.url(path)), action).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> ClientResult<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", action, e);
            ClientError::Request {
                action: action.to_string(),
                message: transport_message(&e),
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            debug!("{} rejected with 401", action);
            return Err(ClientError::Unauthorized {
                action: action.to_string(),
            });
        }
        if !status.is_success() {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| format!("server returned {status}"));
            warn!("{} failed with {}: {}", action, status, message);
            return Err(ClientError::Request {
                action: action.to_string(),
                message,
            });
        }

        response.json().await.map_err(|e| ClientError::Request {
            action: action.to_string(),
            message: format!("invalid response body: {e}"),
        })
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

/// Extracts the `message` field the API puts in error bodies.
pub(crate) async fn server_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let value: serde_json::Value = serde_json::from_str(&body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
}

pub(crate) fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        "could not reach server".to_string()
    } else {
        "network error".to_string()
    }
}
