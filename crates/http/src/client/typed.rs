//! Typed API clients that enforce authentication requirements at compile time

use super::refresh::{RefreshCoordinator, RefreshOutcome, RefreshTicket};
use super::token_store::{Credential, TokenStore};
use super::ClientError;
use crate::types::ApiResponse;
use reqwest::{header, Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = "postdeck-client/0.1.0";

/// Client for public endpoints that don't require authentication.
///
/// The renewal call runs through this client, which is what keeps the
/// refresh protocol from intercepting its own failures.
#[derive(Clone)]
pub struct PublicDeckClient {
    client: Client,
    base_url: String,
}

/// Client for authenticated endpoints.
///
/// The bearer header is read from the [`TokenStore`] at send time, not
/// captured at request-build time, so a replay after renewal picks up
/// the fresh credential. On an authorization failure the client runs
/// the single-flight renewal protocol and replays the original request
/// at most once.
#[derive(Clone)]
pub struct AuthenticatedDeckClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    refresh: Arc<RefreshCoordinator>,
}

fn build_http_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    #[cfg(not(target_arch = "wasm32"))]
    let client = {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()?
    };

    #[cfg(target_arch = "wasm32")]
    let client = {
        let _ = timeout; // Timeouts not supported on WASM
        ClientBuilder::new().user_agent(USER_AGENT).build()?
    };

    Ok(client)
}

/// Parse the response into the envelope, falling back to the transport
/// status for non-JSON error bodies.
async fn read_envelope<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiResponse<T>, ClientError> {
    let status = response.status();
    let text = response.text().await?;

    match serde_json::from_str::<ApiResponse<T>>(&text) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Err(ClientError::from_status(status.as_u16(), text)),
        Err(e) => Err(ClientError::Serialization(e)),
    }
}

/// Surface the envelope's own status; `meta.code` wins over the
/// transport status, so a 401 reported inside a 200 body is still an
/// authorization failure.
fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<Option<T>, ClientError> {
    match envelope.meta.code {
        200..=299 => Ok(envelope.data),
        400 => Err(ClientError::Validation {
            message: envelope.meta.message,
            errors: envelope.errors.unwrap_or_default(),
        }),
        code => Err(ClientError::from_status(code, envelope.meta.message)),
    }
}

impl PublicDeckClient {
    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request, tolerating a `null` data payload
    pub async fn execute_optional<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        let response = request.send().await?;
        unwrap_envelope(read_envelope(response).await?)
    }

    /// Execute a request that must return a data payload
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        self.execute_optional(request).await?.ok_or_else(|| {
            ClientError::Configuration("response envelope carried no data".into())
        })
    }

    /// Upgrade to an authenticated client sharing this connection pool
    pub fn authenticate(self, tokens: Arc<dyn TokenStore>) -> AuthenticatedDeckClient {
        AuthenticatedDeckClient {
            client: self.client,
            base_url: self.base_url,
            tokens,
            refresh: Arc::new(RefreshCoordinator::new()),
        }
    }
}

impl AuthenticatedDeckClient {
    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store this client reads its credential from
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Create a request builder; the bearer header is attached at send
    /// time, not here
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Create a public client (useful for calling public endpoints)
    pub fn to_public(&self) -> PublicDeckClient {
        PublicDeckClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }
    }

    /// Execute a request through the authorization pipeline, tolerating
    /// a `null` data payload.
    ///
    /// On an authorization failure this coordinates a single renewal
    /// across all concurrent failing calls and replays the original
    /// request once with the fresh credential. A second failure after
    /// the replay, or a failed renewal, surfaces as
    /// [`ClientError::SessionExpired`].
    pub async fn execute_optional<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        let retry = request.try_clone();

        match self.send_with_bearer(request).await {
            Err(error) if error.is_auth_failure() => {
                let retry = retry.ok_or_else(|| {
                    ClientError::Configuration("request with a streaming body cannot be replayed".into())
                })?;

                match self.renew_credential().await {
                    RefreshOutcome::Renewed => {
                        // A logout may have raced the renewal; a cleared
                        // store means there is no session to replay into.
                        if self.tokens.get().is_none() {
                            return Err(ClientError::SessionExpired);
                        }
                        match self.send_with_bearer(retry).await {
                            Err(error) if error.is_auth_failure() => {
                                tracing::warn!("replayed request was rejected again; session expired");
                                self.tokens.clear();
                                Err(ClientError::SessionExpired)
                            }
                            other => other,
                        }
                    }
                    RefreshOutcome::Expired => Err(ClientError::SessionExpired),
                }
            }
            other => other,
        }
    }

    /// Execute a request that must return a data payload
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        self.execute_optional(request).await?.ok_or_else(|| {
            ClientError::Configuration("response envelope carried no data".into())
        })
    }

    async fn send_with_bearer<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        let request = match self.tokens.get() {
            Some(credential) => request.header(
                header::AUTHORIZATION,
                format!("Bearer {}", credential.access_token),
            ),
            None => request,
        };
        let response = request.send().await?;
        unwrap_envelope(read_envelope(response).await?)
    }

    /// Join (or start) the single renewal for the current expiry event
    async fn renew_credential(&self) -> RefreshOutcome {
        match self.refresh.begin() {
            RefreshTicket::Leader => {
                let outcome = self.run_renewal().await;
                self.refresh.finish(outcome);
                outcome
            }
            // A dropped sender means the leader went away; treat the
            // session as gone rather than stalling forever.
            RefreshTicket::Follower(rx) => rx.await.unwrap_or(RefreshOutcome::Expired),
        }
    }

    async fn run_renewal(&self) -> RefreshOutcome {
        let Some(refresh_token) = self.tokens.get().and_then(|c| c.refresh_token) else {
            tracing::debug!("no refresh credential available; expiry is terminal");
            self.tokens.clear();
            return RefreshOutcome::Expired;
        };

        match self.to_public().refresh_token(&refresh_token).await {
            Ok(tokens) => {
                // Logout while the renewal was in flight: discard the
                // new credential instead of resurrecting the session.
                if self.tokens.get().is_none() {
                    return RefreshOutcome::Expired;
                }
                self.tokens.set(&Credential {
                    access_token: tokens.access_token,
                    refresh_token: Some(tokens.refresh_token),
                });
                tracing::debug!("credential renewed");
                RefreshOutcome::Renewed
            }
            Err(error) => {
                tracing::warn!(%error, "credential renewal failed; session expired");
                self.tokens.clear();
                RefreshOutcome::Expired
            }
        }
    }
}

/// Type-safe builder that creates the appropriate client type
pub struct TypedClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl TypedClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
        }
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a public client
    pub fn build_public(self) -> Result<PublicDeckClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?
            .trim_end_matches('/')
            .to_string();

        Ok(PublicDeckClient {
            client: build_http_client(self.timeout)?,
            base_url,
        })
    }

    /// Build an authenticated client reading its credential from `tokens`
    pub fn build_authenticated(
        self,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<AuthenticatedDeckClient, ClientError> {
        Ok(self.build_public()?.authenticate(tokens))
    }
}

impl Default for TypedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
