//! # Pickup Config
//!
//! Configuration types for the pickup service, loaded from environment
//! variables (a `.env` file is read by the binaries through `dotenvy`).
//!
//! - [`cors`]: CORS allowed origins
//! - [`dismissal`]: Dismissal core settings (enrollment, numbering, directory source)
//! - [`rate_limit`]: Per-peer request quotas
//! - [`server`]: Listener addresses
//! - [`session`]: Teacher session lifetime and per-teacher cap
//!
//! # Example
//!
//! ```ignore
//! use pickup_config::{CorsConfig, DismissalConfig, RateLimitConfig, ServerConfig};
//!
//! let dismissal = DismissalConfig::from_env();
//! let server = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod dismissal;
pub mod rate_limit;
pub mod server;
pub mod session;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use dismissal::{DEFAULT_TOTAL_ENROLLMENT, DismissalConfig, QueueNumbering};
pub use rate_limit::{PeerGovernorConfig, RateLimitConfig};
pub use server::ServerConfig;
pub use session::SessionConfig;

/// Reads `key` and parses it, falling back to `default` when unset or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
