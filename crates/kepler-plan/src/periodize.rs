//! Orbital periodization
//!
//! Contact plans for cyclic schedules often cover a single orbit, while a
//! simulation runs for many. [`periodize`] replicates such a plan around
//! the current clock: for clock `now` and period `P`, the base windows
//! are emitted twice, shifted by `floor(now / P) * P` and one period
//! further. That guarantees the search always sees a non-empty set of
//! windows surrounding `now`, including the wrap into the next cycle.
//!
//! The copies inherit their contact ids; the search works on indices and
//! treats them as distinct contacts. Consumers aggregating periodized
//! output by id must expect repeats.

use kepler_core::Contact;
use tracing::debug;

/// Replicate `base` around `now` for a cyclic schedule with period
/// `period_s`. A non-positive period disables periodization and returns a
/// plain copy.
pub fn periodize(base: &[Contact], now: f64, period_s: f64) -> Vec<Contact> {
    if period_s <= 0.0 {
        return base.to_vec();
    }

    let cycle = (now / period_s).floor();
    let offset = cycle * period_s;

    let mut plan = Vec::with_capacity(base.len() * 2);
    plan.extend(base.iter().map(|c| c.shifted(offset)));
    plan.extend(base.iter().map(|c| c.shifted(offset + period_s)));

    debug!(
        cycle = cycle as i64,
        contacts = plan.len(),
        "periodized plan"
    );
    plan
}

/// Infer a period from the observed span of the base plan:
/// `max(t_end) - min(t_start)`. Returns `None` when the span is not
/// positive (empty or degenerate plans).
pub fn auto_period(base: &[Contact]) -> Option<f64> {
    let t_min = base.iter().map(|c| c.t_start).fold(f64::INFINITY, f64::min);
    let t_max = base.iter().map(|c| c.t_end).fold(f64::NEG_INFINITY, f64::max);
    let span = t_max - t_min;
    if span > 0.0 {
        Some(span)
    } else {
        None
    }
}
