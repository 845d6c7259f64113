//! Single-hop feasibility and ETA arithmetic
//!
//! Given the arrival time of a bundle at a contact's origin node, these
//! routines decide whether the contact can carry the bundle at all and, if
//! so, when the bundle finishes arriving at the far end.
//!
//! The arithmetic, for arrival time `t_in` and bundle size `B`:
//!
//! ```text
//! start_tx  = max(t_in, t_start)
//! window    = t_end - start_tx - setup_s          (must be > 0)
//! capacity  = min(residual_bytes, window * rate)  (must cover B)
//! finish    = start_tx + setup_s + B / rate       (must be <= t_end)
//! eta       = finish + owlt                       (must meet any deadline)
//! ```
//!
//! A floor of 1 bps on the rate guards against degenerate plan data. The
//! `EPS_TIME` / `EPS_BYTES` tolerances absorb floating-point drift so that
//! boundary-touching contacts stay usable; they are part of the engine's
//! observable contract.

use kepler_core::{Contact, EPS_BYTES, EPS_TIME};

#[inline]
fn effective_rate(contact: &Contact) -> f64 {
    contact.rate_bps.max(1.0)
}

/// Bytes the window can still carry for a bundle arriving at `t_in`,
/// ignoring residual capacity.
pub fn window_bytes(contact: &Contact, t_in: f64) -> f64 {
    if t_in > contact.t_end + EPS_TIME {
        return 0.0;
    }
    let start_tx = t_in.max(contact.t_start);
    let window = contact.t_end - start_tx - contact.setup_s;
    if window <= EPS_TIME {
        return 0.0;
    }
    window * effective_rate(contact)
}

/// Quick viability pre-check: mirrors [`earliest_arrival`] without
/// computing the arrival time. Used to cheaply prune relaxations.
pub fn is_viable(contact: &Contact, t_in: f64, bundle_bytes: f64) -> bool {
    if t_in > contact.t_end + EPS_TIME {
        return false;
    }

    let start_tx = t_in.max(contact.t_start);
    let window = contact.t_end - start_tx - contact.setup_s;
    if window <= EPS_TIME {
        return false;
    }

    let rate = effective_rate(contact);
    let capacity = contact.residual_bytes.min(window * rate);
    if capacity + EPS_BYTES < bundle_bytes {
        return false;
    }

    let finish = start_tx + contact.setup_s + bundle_bytes / rate;
    finish <= contact.t_end + EPS_TIME
}

/// Earliest time the bundle finishes arriving at the contact's far end,
/// or `None` if the contact cannot carry it.
///
/// `expiry_abs` is an optional absolute arrival deadline; an arrival past
/// it makes the hop infeasible.
pub fn earliest_arrival(
    contact: &Contact,
    t_in: f64,
    bundle_bytes: f64,
    expiry_abs: Option<f64>,
) -> Option<f64> {
    if t_in > contact.t_end + EPS_TIME {
        return None;
    }

    let capacity = contact.residual_bytes.min(window_bytes(contact, t_in));
    if capacity + EPS_BYTES < bundle_bytes {
        return None;
    }

    let start_tx = t_in.max(contact.t_start);
    let rate = effective_rate(contact);
    let finish = start_tx + contact.setup_s + bundle_bytes / rate;
    if finish > contact.t_end + EPS_TIME {
        return None;
    }

    let eta = finish + contact.owlt;
    if let Some(deadline) = expiry_abs {
        if eta > deadline + EPS_TIME {
            return None;
        }
    }
    Some(eta)
}

/// Transmission start time for a bundle arriving at `t_in`.
pub fn start_tx(contact: &Contact, t_in: f64) -> f64 {
    t_in.max(contact.t_start)
}
