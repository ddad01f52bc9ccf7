//! Request extractors and middleware.
//!
//! - [`auth`]: Teacher session extractor backed by bearer tokens
//! - [`rate_limit`]: Per-peer request quotas and their rejections
//!
//! # Authentication Flow
//!
//! 1. A teacher posts their PIN to `/api/teachers/login` and receives a token
//! 2. The client sends `Authorization: Bearer <token>` on later requests
//! 3. [`auth::AuthTeacher`] looks the token up in the session table
//! 4. Logout removes the token; it is rejected from then on

pub mod auth;
pub mod rate_limit;
