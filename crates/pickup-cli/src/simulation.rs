//! Simulated dismissal afternoons.
//!
//! Arrivals are generated up front (in parallel, one seeded RNG per arrival)
//! and then replayed in order against a [`Dismissal`] driven by a
//! [`ManualClock`], followed by a number of teacher releases.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use pickup_core::ManualClock;
use pickup_dismissal::{CheckIn, Directory, Dismissal, RandomTicketIssuer};
use pickup_models::{ActivityEntry, DismissalStats, PickupMethod, PickupRequest};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// Knobs for a simulated afternoon.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub pickups: usize,
    pub releases: usize,
    pub seed: u64,
    /// Chance that a roster includes a student missing from the directory.
    pub unknown_student_rate: f64,
}

impl SimulationConfig {
    /// `pickups` arrivals, about two thirds of them released.
    pub fn new(pickups: usize) -> Self {
        Self {
            pickups,
            releases: pickups * 2 / 3,
            ..Self::default()
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            pickups: 10,
            releases: 6,
            seed: 42,
            unknown_student_rate: 0.1,
        }
    }
}

/// A parent who will arrive, generated before the simulation runs.
#[derive(Debug, Clone)]
pub struct PlannedArrival {
    pub requester_name: String,
    pub student_names: Vec<String>,
    pub pickup_method: PickupMethod,
    /// Seconds after the previous arrival.
    pub gap_seconds: i64,
}

#[derive(Debug)]
pub struct SimulationReport {
    pub arrivals: usize,
    pub released: Vec<PickupRequest>,
    pub queue: Vec<PickupRequest>,
    pub activity: Vec<ActivityEntry>,
    pub stats: DismissalStats,
}

/// Builds `config.pickups` arrivals with rosters drawn from `directory`.
pub fn generate_arrivals(directory: &Directory, config: &SimulationConfig) -> Vec<PlannedArrival> {
    let known: Vec<String> = directory.students().into_iter().map(|s| s.name).collect();

    (0..config.pickups)
        .into_par_iter()
        .map(|idx| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(idx as u64));
            generate_arrival(&mut rng, &known, config.unknown_student_rate)
        })
        .collect()
}

fn generate_arrival(rng: &mut StdRng, known: &[String], unknown_rate: f64) -> PlannedArrival {
    let count = rng.gen_range(1..=3).min(known.len().max(1));
    let mut student_names: Vec<String> = known.choose_multiple(rng, count).cloned().collect();

    if known.is_empty() || rng.gen_bool(unknown_rate.clamp(0.0, 1.0)) {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        student_names.push(format!("{first} {last}"));
    }

    // Parents usually share the first child's surname.
    let surname = student_names
        .first()
        .and_then(|s| s.rsplit(' ').next())
        .map(str::to_string)
        .unwrap_or_else(|| LastName().fake());
    let first: String = FirstName().fake();

    PlannedArrival {
        requester_name: format!("{first} {surname}"),
        student_names,
        pickup_method: if rng.gen_bool(0.5) {
            PickupMethod::CarLine
        } else {
            PickupMethod::WalkUp
        },
        gap_seconds: rng.gen_range(15..=90),
    }
}

/// Replays generated arrivals against a fresh dismissal and then releases up
/// to `config.releases` random pickups.
pub fn run(directory: Directory, config: &SimulationConfig) -> SimulationReport {
    let start_time = Instant::now();
    let arrivals = generate_arrivals(&directory, config);
    println!(
        "🚗 Generated {} arrivals in {:?}",
        arrivals.len(),
        start_time.elapsed()
    );

    let clock = ManualClock::default();
    let mut dismissal = Dismissal::builder(directory)
        .clock(Arc::new(clock.clone()))
        .ticket_issuer(RandomTicketIssuer::seeded(config.seed))
        .build();

    for arrival in &arrivals {
        clock.advance_seconds(arrival.gap_seconds);
        match CheckIn::new(
            &arrival.requester_name,
            &arrival.student_names,
            arrival.pickup_method,
        ) {
            Ok(check_in) => {
                dismissal.check_in(check_in);
            }
            Err(e) => eprintln!("⚠️  Skipping arrival for {}: {e}", arrival.requester_name),
        }
    }

    let mut rng = StdRng::seed_from_u64(config.seed.rotate_left(17));
    let mut released = Vec::new();
    for _ in 0..config.releases {
        let Some(position) = dismissal
            .queue()
            .choose(&mut rng)
            .map(|r| r.queue_position)
        else {
            break;
        };
        clock.advance_seconds(rng.gen_range(30..=240));
        released.extend(dismissal.release(position));
    }

    SimulationReport {
        arrivals: arrivals.len(),
        released,
        queue: dismissal.queue(),
        activity: dismissal.activity(),
        stats: dismissal.close(),
    }
}
