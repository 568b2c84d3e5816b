//! Postdeck API clients.
//!
//! Split by authentication requirement, so "no-auth" endpoints (login,
//! register, the renewal call itself) are a different type from the
//! bearer-authenticated surface and can never recurse into the refresh
//! protocol.

pub mod auth;
pub mod error;
mod refresh;
pub mod token_store;
pub mod typed;

pub use error::ClientError;
pub use token_store::{Credential, MemoryTokenStore, TokenStore};
pub use typed::{AuthenticatedDeckClient, PublicDeckClient, TypedClientBuilder};
