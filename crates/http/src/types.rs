//! Wire types shared by every Postdeck API call

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard response envelope wrapping every Postdeck API payload.
///
/// The backend reports its own status in `meta.code`; a `401` there is
/// an authorization failure even when the transport status says
/// otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub meta: ResponseMeta,
    pub data: Option<T>,
    /// Field-level validation errors, keyed by field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, String>>,
}

/// Status portion of the response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub code: u16,
    pub message: String,
}

/// Identity record returned by `GET /v1/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub fullname: String,
    pub status: String,
    pub provider: String,
    pub avatar_url: Option<String>,
    pub org_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<UserSubscription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_claim_trial: Option<bool>,
}

/// Subscription summary embedded in the `/v1/me` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSubscription {
    pub id: String,
    pub plan_id: String,
    pub plan_name: String,
    pub plan_code: String,
    pub plan_type: String,
    pub status: String,
    pub is_active: bool,
    pub current_period_start: String,
    pub current_period_end: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub fullname: String,
    pub password: String,
}

/// Server-side logout request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub access_token: String,
}

/// Renewal request body for `POST /v1/auth/refresh-token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Token issuance payload shared by login, renewal and OAuth callback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
}

/// OAuth initiation response: the URL to redirect the browser to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthInitResponse {
    pub auth_url: String,
}
