//! Client configuration and initialization

use crate::storage::BrowserTokenStore;
pub use postdeck_http::client::ClientError;
use postdeck_http::client::{AuthenticatedDeckClient, PublicDeckClient, TypedClientBuilder};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};
use web_sys::window;

/// Global client instances
static PUBLIC_CLIENT: Lazy<Mutex<Option<PublicDeckClient>>> = Lazy::new(|| Mutex::new(None));
static SESSION_CLIENT: Lazy<Mutex<Option<AuthenticatedDeckClient>>> =
    Lazy::new(|| Mutex::new(None));

/// Get the base URL for API calls
fn get_base_url() -> String {
    // Try to get from window location
    if let Some(window) = window() {
        if let Ok(location) = window.location().origin() {
            return location;
        }
    }

    // Default to relative URLs
    String::new()
}

/// Get the public client instance (for unauthenticated endpoints)
pub fn create_public_client() -> Result<PublicDeckClient, ClientError> {
    let mut client_lock = PUBLIC_CLIENT
        .lock()
        .unwrap_or_else(|e| e.into_inner());

    if let Some(client) = client_lock.as_ref() {
        return Ok(client.clone());
    }

    let client = TypedClientBuilder::new()
        .base_url(get_base_url())
        .build_public()?;
    *client_lock = Some(client.clone());
    Ok(client)
}

/// Get the session client instance.
///
/// Built once over the browser token store; the credential is read
/// from the store per request, so token changes never require a
/// rebuild.
pub fn create_session_client() -> Result<AuthenticatedDeckClient, ClientError> {
    let mut client_lock = SESSION_CLIENT
        .lock()
        .unwrap_or_else(|e| e.into_inner());

    if let Some(client) = client_lock.as_ref() {
        return Ok(client.clone());
    }

    let client = TypedClientBuilder::new()
        .base_url(get_base_url())
        .build_authenticated(Arc::new(BrowserTokenStore::new()))?;
    *client_lock = Some(client.clone());
    Ok(client)
}
