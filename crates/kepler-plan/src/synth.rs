//! Synthetic LEO constellation plans
//!
//! A seeded generator for demos and live-loop runs without real plan
//! data: a ring of relay satellites with directed inter-satellite links,
//! a ground-station source with two uplink windows, and two overlapping
//! downlink windows to the destination ground station. Window starts,
//! durations, rates and residuals are jittered within plausible LEO
//! ranges, so every seed yields a different but routable constellation.

use kepler_core::Contact;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Source ground station node label.
pub const SRC_NODE: u32 = 100;
/// Destination ground station node label.
pub const DST_NODE: u32 = 200;

const ORBIT_PERIOD_S: f64 = 5_400.0;
const OWLT_S: f64 = 0.02;
const SETUP_S: f64 = 0.1;

/// Generator parameters.
#[derive(Debug, Clone, Copy)]
pub struct SynthConfig {
    /// Number of relay satellites in the ring
    pub sats: u32,
    /// Random seed; 0 draws one from entropy
    pub seed: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self { sats: 8, seed: 0 }
    }
}

/// A generated plan plus the endpoints and orbital period it was built
/// around.
#[derive(Debug, Clone)]
pub struct SyntheticPlan {
    pub contacts: Vec<Contact>,
    pub src: u32,
    pub dst: u32,
    pub period_s: f64,
}

/// Generate a ring-constellation plan.
pub fn generate(config: &SynthConfig) -> SyntheticPlan {
    let seed = if config.seed == 0 {
        rand::random()
    } else {
        config.seed
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let sats = config.sats.max(1);

    let mut contacts = Vec::new();
    let mut next_id = 0u32;
    let mut push = |contacts: &mut Vec<Contact>, from, to, t0: f64, dur: f64, rate: f64, residual: f64| {
        contacts.push(Contact {
            id: next_id,
            from,
            to,
            t_start: t0,
            t_end: t0 + dur,
            owlt: OWLT_S,
            rate_bps: rate,
            setup_s: SETUP_S,
            residual_bytes: residual,
        });
        next_id += 1;
    };

    // Two uplink windows from the source ground station
    for sat in 1..=2u32.min(sats) {
        let t0 = rng.gen_range(0.0..15.0);
        let dur = rng.gen_range(40.0..60.0);
        let rate = rng.gen_range(6.0..10.0) * 1e6;
        let residual = rng.gen_range(2.0..7.0) * 1e8;
        push(&mut contacts, SRC_NODE, sat, t0, dur, rate, residual);
    }

    // Directed ISLs around the ring: 1 -> 2 -> ... -> sats
    let mut t_cursor = 20.0;
    for sat in 1..sats {
        let t0 = t_cursor + rng.gen_range(0.0..10.0);
        let dur = rng.gen_range(35.0..60.0);
        let rate = rng.gen_range(5.0..11.0) * 1e6;
        let residual = rng.gen_range(2.0..9.0) * 1e8;
        push(&mut contacts, sat, sat + 1, t0, dur, rate, residual);
        t_cursor += 10.0;
    }

    // Two overlapping downlink windows from the last satellite
    for k in 0..2u32 {
        let t0 = 60.0 + (k as f64) * 15.0 + rng.gen_range(0.0..6.0);
        let dur = rng.gen_range(35.0..60.0);
        let rate = rng.gen_range(7.0..13.0) * 1e6;
        let residual = rng.gen_range(3.0..11.0) * 1e8;
        push(&mut contacts, sats, DST_NODE, t0, dur, rate, residual);
    }

    debug!(seed, sats, contacts = contacts.len(), "generated synthetic plan");

    SyntheticPlan {
        contacts,
        src: SRC_NODE,
        dst: DST_NODE,
        period_s: ORBIT_PERIOD_S,
    }
}
