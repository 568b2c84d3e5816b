//! Frontend configuration

/// Session configuration
pub struct SessionConfig;

impl SessionConfig {
    /// localStorage key for the access credential
    pub const ACCESS_TOKEN_KEY: &'static str = "access_token";

    /// localStorage key for the renewal credential
    pub const REFRESH_TOKEN_KEY: &'static str = "refresh_token";

    /// How long a fetched user record stays fresh before a manual
    /// refetch actually hits the network
    pub const USER_STALENESS_MS: f64 = 5.0 * 60.0 * 1000.0;
}
