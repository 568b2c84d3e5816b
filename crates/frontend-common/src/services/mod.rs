//! API services for the application

pub mod auth;

pub use auth::AuthApiService;
