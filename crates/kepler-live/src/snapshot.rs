//! Per-cycle planning snapshots

use chrono::{DateTime, Utc};
use kepler_core::Route;
use serde::Serialize;

/// Everything one live cycle learned, ready for display or export.
#[derive(Debug, Clone, Serialize)]
pub struct CycleSnapshot {
    /// Cycle counter, starting at 1
    pub cycle: u64,
    /// Simulated clock at planning time (seconds)
    pub sim_time: f64,
    /// Wall-clock time the snapshot was taken
    pub taken_at: DateTime<Utc>,
    /// Contacts whose window is open at `sim_time` in the working plan
    pub active_contacts: usize,
    /// Position within the orbital period, in `[0, 1)`; absent without
    /// periodization
    pub orbital_phase: Option<f64>,
    /// Best route this cycle (`found = false` when none)
    pub best: Route,
    /// Wait before the first hop's transmission can start (seconds)
    pub first_hop_wait: Option<f64>,
    /// Diversified alternatives, best first, including the base route
    pub alternatives: Vec<Route>,
}

impl CycleSnapshot {
    /// End-to-end latency of the best route, if one was found.
    pub fn latency(&self) -> Option<f64> {
        self.best.found.then(|| self.best.latency(self.sim_time))
    }
}
