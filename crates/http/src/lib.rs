//! Postdeck HTTP module: the typed API client and the authorization
//! request pipeline shared by every frontend surface.
//!
//! All outbound calls to the Postdeck API go through the clients in
//! [`client`]; the authenticated client owns the credential-renewal
//! protocol (single in-flight refresh, queued concurrent failures,
//! one replay per request).

pub mod client;
pub mod types;

pub use client::{
    AuthenticatedDeckClient, ClientError, Credential, MemoryTokenStore, PublicDeckClient,
    TokenStore, TypedClientBuilder,
};
pub use types::ApiResponse;
