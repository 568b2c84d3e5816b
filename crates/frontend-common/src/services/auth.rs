//! Authentication API service

use crate::client::create_public_client;
use postdeck_http::client::ClientError;
use postdeck_http::types::{AuthTokens, LoginRequest, OAuthInitResponse, RegisterRequest};

/// Authentication API service
#[derive(Clone)]
pub struct AuthApiService;

impl AuthApiService {
    /// Create a new auth API service
    pub fn new() -> Self {
        Self
    }
}

impl Default for AuthApiService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthApiService {
    /// Log in with email and password
    pub async fn login(&self, email: String, password: String) -> Result<AuthTokens, ClientError> {
        let client = create_public_client()?;
        client.login(LoginRequest { email, password }).await
    }

    /// Register a new account; validation failures carry field-level
    /// errors for the form
    pub async fn register(
        &self,
        email: String,
        fullname: String,
        password: String,
    ) -> Result<(), ClientError> {
        let client = create_public_client()?;
        client
            .register(RegisterRequest {
                email,
                fullname,
                password,
            })
            .await
    }

    /// Start the Google OAuth flow
    pub async fn oauth_init(&self) -> Result<OAuthInitResponse, ClientError> {
        let client = create_public_client()?;
        client.oauth_init().await
    }

    /// Complete the Google OAuth flow with the provider's redirect
    /// parameters
    pub async fn oauth_callback(&self, code: String, state: String) -> Result<AuthTokens, ClientError> {
        let client = create_public_client()?;
        client.oauth_callback(&code, &state).await
    }
}
