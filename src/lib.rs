//! # Pickup API
//!
//! An axum service that coordinates end-of-day student pickup: parents check
//! in, each request is routed to the right teacher, and teachers release
//! students from their own portal view.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Teacher session extractor, rate limiting
//! ├── modules/          # Feature modules
//! │   ├── health/       # Service status
//! │   ├── pickups/      # Check-in, queue listing, release
//! │   ├── teachers/     # Portal login/logout and per-class views
//! │   ├── students/     # Student roster
//! │   ├── activity/     # Activity feed
//! │   └── stats/        # Dashboard counts
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Application router
//! ├── state.rs          # Shared state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! Queue semantics live in `pickup-dismissal`; this crate only serializes
//! access to it and maps its outcomes to HTTP.
//!
//! ## Environment Variables
//!
//! ```bash
//! SERVER_PORT=3000
//! TOTAL_ENROLLMENT=44
//! QUEUE_NUMBERING=monotonic     # or queue_length
//! DIRECTORY_PATH=./directory.json
//! SEED_DEMO_QUEUE=false
//! ALLOWED_ORIGINS=http://localhost:5173
//! RATE_LIMIT_AUTH_BURST_SIZE=5
//! OBSERVABILITY_ENABLED=true
//! ```
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use pickup_config;
pub use pickup_core;
pub use pickup_dismissal;
pub use pickup_models;
