//! Shared frontend plumbing for the Postdeck control panel: the
//! session state container, the guard bridge consulted by route
//! resolution, browser-backed credential storage and the auth API
//! services.

pub mod client;
pub mod components;
pub mod config;
pub mod services;
pub mod session;
pub mod storage;

pub use client::{create_public_client, create_session_client};
pub use components::LoadingSpinner;
pub use config::SessionConfig;
pub use session::{
    evaluate_guard, use_session, GuardDecision, SessionAction, SessionBridge, SessionContext,
    SessionProvider, SessionSnapshot,
};
pub use storage::BrowserTokenStore;
