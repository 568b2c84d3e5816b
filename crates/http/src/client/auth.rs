//! Authentication API client methods

use super::typed::{AuthenticatedDeckClient, PublicDeckClient};
use super::ClientError;
use crate::types::{
    AuthTokens, LoginRequest, LogoutRequest, OAuthInitResponse, RefreshTokenRequest,
    RegisterRequest, User,
};

impl PublicDeckClient {
    /// Log in with email and password
    pub async fn login(&self, request: LoginRequest) -> Result<AuthTokens, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/v1/auth/login")
            .json(&request);
        self.execute(req).await
    }

    /// Register a new account. Validation failures surface as
    /// [`ClientError::Validation`] with field-level errors.
    pub async fn register(&self, request: RegisterRequest) -> Result<(), ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/v1/auth/register")
            .json(&request);
        self.execute_optional::<serde_json::Value>(req).await?;
        Ok(())
    }

    /// Exchange a refresh credential for a new token pair
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AuthTokens, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/v1/auth/refresh-token")
            .json(&RefreshTokenRequest {
                refresh_token: refresh_token.to_string(),
            });
        self.execute(req).await
    }

    /// Start the Google OAuth flow; the caller navigates to the
    /// returned URL
    pub async fn oauth_init(&self) -> Result<OAuthInitResponse, ClientError> {
        let req = self.request(reqwest::Method::GET, "/v1/oauth/google");
        self.execute(req).await
    }

    /// Complete the Google OAuth flow with the provider's redirect
    /// parameters
    pub async fn oauth_callback(
        &self,
        code: &str,
        state: &str,
    ) -> Result<AuthTokens, ClientError> {
        let req = self
            .request(reqwest::Method::GET, "/v1/oauth/google/callback")
            .query(&[("code", code), ("state", state)]);
        self.execute(req).await
    }
}

impl AuthenticatedDeckClient {
    /// Fetch the current user record
    pub async fn current_user(&self) -> Result<User, ClientError> {
        let req = self.request(reqwest::Method::GET, "/v1/me");
        self.execute(req).await
    }

    /// Invalidate the credential server-side.
    ///
    /// Self-authorized with the token being invalidated rather than
    /// whatever the store currently holds: local logout clears the
    /// store first, and an invalidation call must never trigger a
    /// renewal.
    pub async fn logout(&self, access_token: &str) -> Result<(), ClientError> {
        let public = self.to_public();
        let req = public
            .request(reqwest::Method::POST, "/v1/me/logout")
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {access_token}"))
            .json(&LogoutRequest {
                access_token: access_token.to_string(),
            });
        public.execute_optional::<serde_json::Value>(req).await?;
        Ok(())
    }
}
