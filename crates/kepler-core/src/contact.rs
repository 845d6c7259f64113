//! The contact: one scheduled transmission window
//!
//! A [`Contact`] is a directed opportunity to transmit from one node to
//! another during a bounded time window, at a known rate, with a per-contact
//! setup overhead and a propagation delay (one-way light time). Contacts are
//! the vertices of the temporal graph the router searches; node identifiers
//! are dense small integers assigned by the plan author.

use serde::{Deserialize, Serialize};

/// A directed, time-bounded transmission opportunity between two nodes.
///
/// Invariants expected by the router:
/// - `t_end > t_start`
/// - `residual_bytes >= 0`
/// - `id` unique within a plan (periodized plans repeat ids by design)
///
/// A contact can only ever carry data if its window outlasts its setup
/// overhead; [`Contact::is_ever_usable`] checks that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Stable identifier, used to report routes
    pub id: u32,
    /// Origin node
    pub from: u32,
    /// Destination node
    pub to: u32,
    /// Window start (seconds)
    pub t_start: f64,
    /// Window end (seconds)
    pub t_end: f64,
    /// One-way light time (seconds)
    pub owlt: f64,
    /// Link throughput (bits per second)
    pub rate_bps: f64,
    /// Per-contact setup overhead before payload (seconds)
    pub setup_s: f64,
    /// Remaining unreserved capacity (bytes)
    pub residual_bytes: f64,
}

impl Contact {
    /// Window duration in seconds.
    pub fn duration(&self) -> f64 {
        self.t_end - self.t_start
    }

    /// Whether the window outlasts the setup overhead at all.
    ///
    /// A contact failing this can never carry a single byte, no matter when
    /// the bundle arrives.
    pub fn is_ever_usable(&self) -> bool {
        self.duration() > self.setup_s
    }

    /// Whether the window is open at simulated time `t`.
    pub fn is_active_at(&self, t: f64) -> bool {
        t >= self.t_start && t < self.t_end
    }

    /// Return a copy of this contact with its window shifted by `offset`
    /// seconds. The id is kept; periodized plans carry repeated ids.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            t_start: self.t_start + offset,
            t_end: self.t_end + offset,
            ..*self
        }
    }
}
