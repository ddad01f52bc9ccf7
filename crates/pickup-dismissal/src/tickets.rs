//! Short pickup tickets handed to parents at check-in.
//!
//! A ticket is `A-NNN` before local noon and `P-NNN` afterwards, with `NNN`
//! drawn from 100..=999. Tickets are for display only and may repeat; the
//! queue position remains the key for lookups and releases.

use chrono::{DateTime, Local, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait TicketIssuer: Send {
    fn issue(&mut self, at: DateTime<Utc>) -> String;
}

#[derive(Debug, Clone)]
pub struct RandomTicketIssuer {
    rng: StdRng,
}

impl RandomTicketIssuer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic issuer for tests and simulations.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTicketIssuer {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketIssuer for RandomTicketIssuer {
    fn issue(&mut self, at: DateTime<Utc>) -> String {
        let half = if at.with_timezone(&Local).hour() >= 12 {
            'P'
        } else {
            'A'
        };
        let number: u16 = self.rng.gen_range(100..=999);
        format!("{half}-{number}")
    }
}
