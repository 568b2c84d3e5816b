//! Browser-backed token store.
//!
//! The durable half of the session: a [`Credential`] persisted to
//! localStorage under the `access_token` / `refresh_token` keys, so it
//! survives reloads and is shared across tabs of the same origin.

use crate::config::SessionConfig;
use gloo::storage::{LocalStorage, Storage};
use postdeck_http::client::{Credential, TokenStore};

/// [`TokenStore`] over the page's localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

impl BrowserTokenStore {
    pub fn new() -> Self {
        Self
    }
}

impl TokenStore for BrowserTokenStore {
    fn get(&self) -> Option<Credential> {
        let access_token: String = LocalStorage::get(SessionConfig::ACCESS_TOKEN_KEY).ok()?;
        let refresh_token: Option<String> =
            LocalStorage::get(SessionConfig::REFRESH_TOKEN_KEY).ok();
        Some(Credential {
            access_token,
            refresh_token,
        })
    }

    fn set(&self, credential: &Credential) {
        let _ = LocalStorage::set(SessionConfig::ACCESS_TOKEN_KEY, &credential.access_token);
        match &credential.refresh_token {
            Some(refresh_token) => {
                let _ = LocalStorage::set(SessionConfig::REFRESH_TOKEN_KEY, refresh_token);
            }
            // Full replacement: a credential without a renewal half
            // must not leave a stale one behind
            None => LocalStorage::delete(SessionConfig::REFRESH_TOKEN_KEY),
        }
    }

    fn clear(&self) {
        LocalStorage::delete(SessionConfig::ACCESS_TOKEN_KEY);
        LocalStorage::delete(SessionConfig::REFRESH_TOKEN_KEY);
    }
}
