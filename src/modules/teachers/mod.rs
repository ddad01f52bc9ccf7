pub mod controller;
pub mod router;
pub mod service;

pub use router::{init_teacher_login_router, init_teachers_router};
