//! Rate limiting configuration for API endpoints.
//!
//! Quotas follow the token bucket model used by the `governor` crate:
//!
//! - Tokens are added at the configured rate (per second)
//! - Each request consumes one token
//! - Burst size defines the maximum tokens that can accumulate
//! - Requests are rejected when no tokens are available
//!
//! # Configuration
//!
//! - `RATE_LIMIT_GENERAL_PER_SECOND`: Requests per second for general endpoints (default: 20)
//! - `RATE_LIMIT_GENERAL_BURST_SIZE`: Burst size for general endpoints (default: 60)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: Requests per second for teacher login (default: 1)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: Burst size for teacher login (default: 5)
//!
//! Teacher PINs are four characters, so the login quota is the only thing
//! standing between a client and an exhaustive search of the PIN space.
//!
//! Clients are keyed by the peer address of the TCP connection
//! ([`PeerIpKeyExtractor`]), never by forwarding headers the client controls.
//! The server must be run with `into_make_service_with_connect_info`.

use std::time::Duration;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

use crate::env_or;

/// Governor configuration keyed by peer IP.
pub type PeerGovernorConfig =
    GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware>;

/// Rate limit configuration for the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests per second for general endpoints.
    pub general_per_second: u32,

    /// Burst size for general endpoints.
    pub general_burst_size: u32,

    /// Requests per second for the teacher login endpoint.
    pub auth_per_second: u32,

    /// Burst size for the teacher login endpoint.
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_per_second: 20,
            general_burst_size: 60,
            auth_per_second: 1,
            auth_burst_size: 5,
        }
    }
}

/// Replenish interval for `per_second` tokens a second. Zero is raised to one.
fn replenish_period(per_second: u32) -> Duration {
    Duration::from_secs(1) / per_second.max(1)
}

fn peer_governor_config(per_second: u32, burst_size: u32) -> PeerGovernorConfig {
    GovernorConfigBuilder::default()
        .period(replenish_period(per_second))
        .burst_size(burst_size.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("period and burst size are clamped to non-zero")
}

impl RateLimitConfig {
    /// Creates a new `RateLimitConfig` from environment variables.
    ///
    /// Falls back to default values if environment variables are not set
    /// or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            general_per_second: env_or("RATE_LIMIT_GENERAL_PER_SECOND", defaults.general_per_second),
            general_burst_size: env_or("RATE_LIMIT_GENERAL_BURST_SIZE", defaults.general_burst_size),
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    /// Limiter applied to every API request, keyed per peer IP.
    ///
    /// Zero values are raised to one; a quota can never block everything.
    #[must_use]
    pub fn general_governor_config(&self) -> PeerGovernorConfig {
        peer_governor_config(self.general_per_second, self.general_burst_size)
    }

    /// Stricter limiter for teacher login attempts.
    #[must_use]
    pub fn auth_governor_config(&self) -> PeerGovernorConfig {
        peer_governor_config(self.auth_per_second, self.auth_burst_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.general_per_second, 20);
        assert_eq!(config.general_burst_size, 60);
        assert_eq!(config.auth_per_second, 1);
        assert_eq!(config.auth_burst_size, 5);
    }

    fn accepted(config: &PeerGovernorConfig, ip: IpAddr, attempts: usize) -> usize {
        (0..attempts)
            .filter(|_| config.limiter().check_key(&ip).is_ok())
            .count()
    }

    #[test]
    fn test_auth_burst_is_enforced_per_peer() {
        let config = RateLimitConfig {
            auth_burst_size: 3,
            ..RateLimitConfig::default()
        }
        .auth_governor_config();

        assert_eq!(accepted(&config, IpAddr::from([10, 0, 0, 1]), 10), 3);
        assert_eq!(accepted(&config, IpAddr::from([10, 0, 0, 2]), 1), 1);
    }

    #[test]
    fn test_zero_values_are_clamped() {
        let config = RateLimitConfig {
            general_per_second: 0,
            general_burst_size: 0,
            auth_per_second: 0,
            auth_burst_size: 0,
        };
        let ip = IpAddr::from([127, 0, 0, 1]);
        assert_eq!(accepted(&config.general_governor_config(), ip, 5), 1);
        assert_eq!(accepted(&config.auth_governor_config(), ip, 5), 1);
    }

    #[test]
    fn test_replenish_period() {
        assert_eq!(replenish_period(20), Duration::from_millis(50));
        assert_eq!(replenish_period(0), Duration::from_secs(1));
    }
}
