//! Session state container and provider.
//!
//! The single reactive source of truth for `{ user, credential,
//! loading }`. The credential is mirrored from the token store at
//! initialization; whenever one is present the provider fetches the
//! current user through the authorization pipeline. Every reduction
//! publishes a fresh snapshot to the guard bridge.

use crate::client::create_session_client;
use crate::config::SessionConfig;
use crate::session::bridge::{SessionBridge, SessionSnapshot};
use crate::storage::BrowserTokenStore;
use postdeck_http::client::{Credential, TokenStore};
use postdeck_http::types::User;
use std::rc::Rc;
use std::sync::Arc;
use yew::prelude::*;

/// Milliseconds since the epoch, from the platform clock
fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }
}

/// Session state
pub struct SessionState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub is_loading: bool,
    /// Fetch generation; settlement actions carrying an older epoch
    /// are ignored so a slow fetch cannot overwrite a later state
    pub(crate) epoch: u64,
    /// When the current user record was fetched, for the staleness
    /// window
    pub(crate) fetched_at: Option<f64>,
    tokens: Arc<dyn TokenStore>,
    bridge: SessionBridge,
}

impl Clone for SessionState {
    fn clone(&self) -> Self {
        Self {
            user: self.user.clone(),
            access_token: self.access_token.clone(),
            is_loading: self.is_loading,
            epoch: self.epoch,
            fetched_at: self.fetched_at,
            tokens: Arc::clone(&self.tokens),
            bridge: self.bridge.clone(),
        }
    }
}

impl PartialEq for SessionState {
    fn eq(&self, other: &Self) -> bool {
        self.user == other.user
            && self.access_token == other.access_token
            && self.is_loading == other.is_loading
            && self.epoch == other.epoch
            && self.fetched_at == other.fetched_at
            && Arc::ptr_eq(&self.tokens, &other.tokens)
            && self.bridge == other.bridge
    }
}

impl SessionState {
    /// Mirror the persisted credential and publish the initial
    /// snapshot to the bridge
    pub fn new(tokens: Arc<dyn TokenStore>, bridge: SessionBridge) -> Self {
        let access_token = tokens.get().map(|c| c.access_token);
        let state = Self {
            user: None,
            is_loading: access_token.is_some(),
            access_token,
            epoch: 0,
            fetched_at: None,
            tokens,
            bridge,
        };
        state.bridge.publish(state.snapshot());
        state
    }

    /// `true` iff a user has been resolved and a credential is present
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }

    /// The session value the bridge publishes
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: self.is_authenticated(),
            is_loading: self.is_loading,
        }
    }

    /// Whether the cached user record is past the staleness window
    pub fn user_is_stale(&self, now: f64) -> bool {
        self.fetched_at
            .map_or(true, |at| now - at >= SessionConfig::USER_STALENESS_MS)
    }

    /// The anonymous state after the credential is gone
    fn to_anonymous(&self) -> Self {
        Self {
            user: None,
            access_token: None,
            is_loading: false,
            epoch: self.epoch + 1,
            fetched_at: None,
            tokens: Arc::clone(&self.tokens),
            bridge: self.bridge.clone(),
        }
    }
}

/// Session mutations
pub enum SessionAction {
    /// Replace the credential (login, OAuth callback) or drop it.
    /// Writes through to the token store.
    SetCredential(Option<Credential>),
    /// The user fetch settled; `None` on a retryable failure that
    /// leaves the credential intact
    UserLoaded {
        epoch: u64,
        user: Option<User>,
        fetched_at: f64,
    },
    /// The user fetch confirmed the session invalid (authorization
    /// failure that survived renewal)
    SessionInvalid { epoch: u64 },
    /// Clear the session; safe to dispatch with no credential present
    Logout,
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            SessionAction::SetCredential(Some(credential)) => {
                self.tokens.set(&credential);
                Self {
                    user: None,
                    access_token: Some(credential.access_token),
                    is_loading: true,
                    epoch: self.epoch + 1,
                    fetched_at: None,
                    tokens: Arc::clone(&self.tokens),
                    bridge: self.bridge.clone(),
                }
            }
            SessionAction::SetCredential(None) | SessionAction::Logout => {
                self.tokens.clear();
                self.to_anonymous()
            }
            SessionAction::UserLoaded {
                epoch,
                user,
                fetched_at,
            } => {
                if epoch != self.epoch {
                    // Settled against a credential that is no longer
                    // current; drop the result
                    return self;
                }
                Self {
                    user,
                    is_loading: false,
                    fetched_at: Some(fetched_at),
                    ..(*self).clone()
                }
            }
            SessionAction::SessionInvalid { epoch } => {
                if epoch != self.epoch {
                    return self;
                }
                tracing::debug!("credential confirmed invalid; collapsing to anonymous");
                self.tokens.clear();
                self.to_anonymous()
            }
        };

        next.bridge.publish(next.snapshot());
        Rc::new(next)
    }
}

/// Session context handle
pub type SessionContext = UseReducerHandle<SessionState>;

/// Fetch the current user and settle the session at `epoch`
fn spawn_user_fetch(session: SessionContext, epoch: u64) {
    wasm_bindgen_futures::spawn_local(async move {
        let client = match create_session_client() {
            Ok(client) => client,
            Err(error) => {
                tracing::warn!(%error, "session client unavailable");
                session.dispatch(SessionAction::UserLoaded {
                    epoch,
                    user: None,
                    fetched_at: now_ms(),
                });
                return;
            }
        };

        match client.current_user().await {
            Ok(user) => session.dispatch(SessionAction::UserLoaded {
                epoch,
                user: Some(user),
                fetched_at: now_ms(),
            }),
            Err(error) if error.is_session_expired() => {
                session.dispatch(SessionAction::SessionInvalid { epoch });
            }
            Err(error) => {
                // Transient or server-side failure: keep the credential
                // so the caller may retry
                tracing::warn!(%error, "user fetch failed");
                session.dispatch(SessionAction::UserLoaded {
                    epoch,
                    user: None,
                    fetched_at: now_ms(),
                });
            }
        }
    });
}

/// Session provider props
#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    /// The snapshot service route guards read; constructed by the app
    /// root and shared with the router
    pub bridge: SessionBridge,
    pub children: Children,
}

/// Session provider component
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let bridge = props.bridge.clone();
    let session =
        use_reducer(move || SessionState::new(Arc::new(BrowserTokenStore::new()), bridge));

    // Fetch the user whenever a credential becomes available
    {
        let session = session.clone();
        use_effect_with(session.access_token.clone(), move |token| {
            if token.is_some() {
                let epoch = session.epoch;
                spawn_user_fetch(session, epoch);
            }
            || ()
        });
    }

    html! {
        <ContextProvider<SessionContext> context={session}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found. Make sure to wrap your component with SessionProvider")
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    use_session().is_authenticated()
}

/// Hook returning a logout callback.
///
/// Clears local state immediately, then attempts the server-side
/// invalidation best-effort with the credential it captured.
#[hook]
pub fn use_logout() -> Callback<()> {
    let session = use_session();
    Callback::from(move |()| {
        let access_token = session.access_token.clone();
        session.dispatch(SessionAction::Logout);

        if let Some(token) = access_token {
            wasm_bindgen_futures::spawn_local(async move {
                match create_session_client() {
                    Ok(client) => {
                        if let Err(error) = client.logout(&token).await {
                            tracing::warn!(%error, "server-side logout failed; session already cleared locally");
                        }
                    }
                    Err(error) => tracing::warn!(%error, "session client unavailable for logout"),
                }
            });
        }
    })
}

/// Hook returning a manual user refetch callback.
///
/// The `force` argument bypasses the staleness window (used after
/// profile mutations).
#[hook]
pub fn use_refetch_user() -> Callback<bool> {
    let session = use_session();
    Callback::from(move |force: bool| {
        if session.access_token.is_none() {
            return;
        }
        if !force && !session.user_is_stale(now_ms()) {
            return;
        }
        let epoch = session.epoch;
        spawn_user_fetch(session.clone(), epoch);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use postdeck_http::client::MemoryTokenStore;

    fn fresh_state(store: Arc<MemoryTokenStore>, bridge: &SessionBridge) -> Rc<SessionState> {
        Rc::new(SessionState::new(store, bridge.clone()))
    }

    fn sample_user() -> User {
        User {
            id: "u1".into(),
            email: "sam@example.com".into(),
            fullname: "Sam Example".into(),
            status: "active".into(),
            provider: "email".into(),
            avatar_url: None,
            org_name: None,
            subscription: None,
            has_claim_trial: None,
        }
    }

    #[test]
    fn initial_state_mirrors_the_persisted_credential() {
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::access_only(
            "A1",
        )));
        let bridge = SessionBridge::new();
        let state = fresh_state(store, &bridge);

        assert_eq!(state.access_token.as_deref(), Some("A1"));
        assert!(state.is_loading);
        assert!(!state.is_authenticated());
        // Initialization publishes the loading snapshot
        assert_eq!(
            bridge.read(),
            Some(SessionSnapshot {
                is_authenticated: false,
                is_loading: true,
            })
        );
    }

    #[test]
    fn credential_then_user_load_authenticates() {
        let store = Arc::new(MemoryTokenStore::new());
        let bridge = SessionBridge::new();
        let state = fresh_state(store.clone(), &bridge);

        let state = state.reduce(SessionAction::SetCredential(Some(Credential {
            access_token: "A1".into(),
            refresh_token: Some("R1".into()),
        })));
        assert_eq!(store.get().unwrap().access_token, "A1");
        assert!(bridge.read().unwrap().is_loading);

        let epoch = state.epoch;
        let state = state.reduce(SessionAction::UserLoaded {
            epoch,
            user: Some(sample_user()),
            fetched_at: 1_000.0,
        });
        assert!(state.is_authenticated());
        assert!(bridge.read().unwrap().is_authenticated);
    }

    #[test]
    fn logout_is_idempotent() {
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::access_only(
            "A1",
        )));
        let bridge = SessionBridge::new();
        let state = fresh_state(store.clone(), &bridge);

        let state = state.reduce(SessionAction::Logout);
        assert_eq!(store.get(), None);
        assert_eq!(bridge.read(), Some(SessionSnapshot::ANONYMOUS));

        // Second logout with nothing left produces the same end state
        let state = state.reduce(SessionAction::Logout);
        assert!(!state.is_authenticated());
        assert_eq!(store.get(), None);
        assert_eq!(bridge.read(), Some(SessionSnapshot::ANONYMOUS));
    }

    #[test]
    fn late_user_load_cannot_resurrect_a_logged_out_session() {
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::access_only(
            "A1",
        )));
        let bridge = SessionBridge::new();
        let state = fresh_state(store, &bridge);

        let stale_epoch = state.epoch;
        let state = state.reduce(SessionAction::Logout);

        // The fetch started before logout resolves afterwards
        let state = state.reduce(SessionAction::UserLoaded {
            epoch: stale_epoch,
            user: Some(sample_user()),
            fetched_at: 1_000.0,
        });
        assert!(!state.is_authenticated());
        assert_eq!(bridge.read(), Some(SessionSnapshot::ANONYMOUS));
    }

    #[test]
    fn confirmed_invalid_session_collapses_and_clears_the_store() {
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::access_only(
            "A1",
        )));
        let bridge = SessionBridge::new();
        let state = fresh_state(store.clone(), &bridge);

        let epoch = state.epoch;
        let state = state.reduce(SessionAction::SessionInvalid { epoch });
        assert!(!state.is_authenticated());
        assert_eq!(state.access_token, None);
        assert_eq!(store.get(), None);
        assert_eq!(bridge.read(), Some(SessionSnapshot::ANONYMOUS));
    }

    #[test]
    fn stale_expiry_cannot_collapse_a_newer_session() {
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::access_only(
            "A1",
        )));
        let bridge = SessionBridge::new();
        let state = fresh_state(store.clone(), &bridge);

        // A fetch against A1 is still in flight when the user signs in
        // again with a fresh credential
        let stale_epoch = state.epoch;
        let state = state.reduce(SessionAction::SetCredential(Some(Credential::access_only(
            "A2",
        ))));
        let epoch = state.epoch;

        // The old fetch settles as expired; only its own epoch may
        // collapse the session
        let state = state.reduce(SessionAction::SessionInvalid { epoch: stale_epoch });
        assert_eq!(state.access_token.as_deref(), Some("A2"));
        assert!(store.get().is_some());

        let state = state.reduce(SessionAction::UserLoaded {
            epoch,
            user: Some(sample_user()),
            fetched_at: 1_000.0,
        });
        assert!(state.is_authenticated());
    }

    #[test]
    fn benign_fetch_failure_keeps_the_credential() {
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::access_only(
            "A1",
        )));
        let bridge = SessionBridge::new();
        let state = fresh_state(store.clone(), &bridge);

        let epoch = state.epoch;
        let state = state.reduce(SessionAction::UserLoaded {
            epoch,
            user: None,
            fetched_at: 1_000.0,
        });
        assert!(!state.is_authenticated());
        assert!(!state.is_loading);
        assert_eq!(state.access_token.as_deref(), Some("A1"));
        assert!(store.get().is_some());
        // Distinguished from confirmed-invalid: not loading, not
        // authenticated, credential still present
        assert_eq!(bridge.read(), Some(SessionSnapshot::ANONYMOUS));
    }

    #[test]
    fn user_staleness_window() {
        let store = Arc::new(MemoryTokenStore::with_credential(Credential::access_only(
            "A1",
        )));
        let state = fresh_state(store, &SessionBridge::new());
        assert!(state.user_is_stale(0.0));

        let epoch = state.epoch;
        let state = state.reduce(SessionAction::UserLoaded {
            epoch,
            user: Some(sample_user()),
            fetched_at: 1_000.0,
        });
        assert!(!state.user_is_stale(2_000.0));
        assert!(state.user_is_stale(1_000.0 + SessionConfig::USER_STALENESS_MS));
    }
}
