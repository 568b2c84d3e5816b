//! Session state: the reactive container, the guard bridge and the
//! decision table consulted at route-resolution time.

pub mod bridge;
pub mod context;
pub mod guard;

pub use bridge::{SessionBridge, SessionSnapshot};
pub use context::{
    use_is_authenticated, use_logout, use_refetch_user, use_session, SessionAction,
    SessionContext, SessionProvider, SessionState,
};
pub use guard::{evaluate_guard, GuardDecision};
