//! # Pickup Core
//!
//! Foundational types shared by every crate in the pickup workspace:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`clock`]: Injectable time source used by the dismissal core
//!
//! # Example
//!
//! ```ignore
//! use pickup_core::{AppError, Clock, ManualClock};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Queue position 4 not found"));
//!
//! let clock = ManualClock::default();
//! clock.advance_minutes(3);
//! ```

pub mod clock;
pub mod errors;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use errors::AppError;
