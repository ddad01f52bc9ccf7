//! # Pickup CLI
//!
//! Offline tools around the dismissal core: printing the directory, running
//! a simulated dismissal with generated parents, and rendering the results
//! as plain-text tables.
//!
//! ```ignore
//! use pickup_cli::simulation::{SimulationConfig, run};
//! use pickup_dismissal::Directory;
//!
//! let report = run(Directory::sample(), &SimulationConfig::new(12));
//! println!("{}", pickup_cli::render::stats(&report.stats));
//! ```

pub mod render;
pub mod simulation;

#[cfg(test)]
mod tests {
    const WORKSPACE_MANIFEST: &str = include_str!("../../../Cargo.toml");

    /// Members inheriting a workspace dependency cannot turn its defaults off.
    #[test]
    fn test_observability_defaults_are_off_at_workspace_level() {
        let entry = WORKSPACE_MANIFEST
            .lines()
            .find(|line| line.starts_with("pickup-observability = {"))
            .unwrap();
        assert!(entry.contains("default-features = false"), "{entry}");
    }
}
