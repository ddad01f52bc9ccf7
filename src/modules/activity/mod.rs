pub mod controller;
pub mod router;

pub use controller::ActivityParams;
pub use router::init_activity_router;
