pub mod activity;
pub mod health;
pub mod pickups;
pub mod stats;
pub mod students;
pub mod teachers;
