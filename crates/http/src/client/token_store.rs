//! Durable credential storage behind a narrow trait.
//!
//! The browser frontend backs this with localStorage; native callers
//! and tests use [`MemoryTokenStore`]. Only the authorization pipeline
//! and the session container are allowed to write through it.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// The bearer credential identifying an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl Credential {
    /// Credential with only an access token (no renewal possible)
    pub fn access_only(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
        }
    }
}

/// Durable store holding at most one [`Credential`].
///
/// `set` always replaces the whole credential; there are no partial
/// updates. Implementations never panic on absence - `get` simply
/// returns `None`.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<Credential>;
    fn set(&self, credential: &Credential);
    fn clear(&self);
}

/// In-memory store for native embeddings and tests
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a credential
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            inner: Mutex::new(Some(credential)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<Credential> {
        self.inner.lock().ok().and_then(|guard| guard.clone())
    }

    fn set(&self, credential: &Credential) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(credential.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = None;
        }
    }
}
