//! Route requests and results

use serde::{Deserialize, Serialize};

/// Parameters of a single planning call: deliver one bundle from a source
/// node to a destination node, dispatched at `t0`.
///
/// Immutable for the duration of the call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Source node
    pub src_node: u32,
    /// Destination node
    pub dst_node: u32,
    /// Dispatch time (seconds)
    pub t0: f64,
    /// Bundle size in bytes (must be > 0)
    pub bundle_bytes: f64,
    /// Relative time-to-live in seconds; 0 means no deadline
    pub expiry_rel: f64,
}

impl RouteRequest {
    /// Create a request with no expiry.
    pub fn new(src_node: u32, dst_node: u32, t0: f64, bundle_bytes: f64) -> Self {
        Self {
            src_node,
            dst_node,
            t0,
            bundle_bytes,
            expiry_rel: 0.0,
        }
    }

    /// Set a relative time-to-live. The bundle must arrive by `t0 + expiry`.
    pub fn with_expiry(mut self, expiry_rel: f64) -> Self {
        self.expiry_rel = expiry_rel;
        self
    }

    /// Absolute arrival deadline, if any.
    pub fn expiry_abs(&self) -> Option<f64> {
        if self.expiry_rel > 0.0 {
            Some(self.t0 + self.expiry_rel)
        } else {
            None
        }
    }
}

/// The result of one route search: the ordered contact ids from source to
/// destination, the final earliest time of arrival, and whether a route was
/// found at all.
///
/// "No route" is a normal outcome, not an error; it is reported as
/// `found = false` with an empty sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Whether a route was found
    pub found: bool,
    /// Earliest time of arrival at the destination node (seconds)
    pub eta: f64,
    /// Contact ids in root-first order
    pub contact_ids: Vec<u32>,
}

impl Route {
    /// A "not found" result.
    pub fn not_found() -> Self {
        Self {
            found: false,
            eta: f64::INFINITY,
            contact_ids: Vec::new(),
        }
    }

    /// A found route with the given id sequence and arrival time.
    pub fn found(contact_ids: Vec<u32>, eta: f64) -> Self {
        Self {
            found: true,
            eta,
            contact_ids,
        }
    }

    /// Number of hops (contacts) on the route.
    pub fn hops(&self) -> usize {
        self.contact_ids.len()
    }

    /// End-to-end latency relative to a dispatch time.
    pub fn latency(&self, t0: f64) -> f64 {
        self.eta - t0
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_abs() {
        let req = RouteRequest::new(100, 200, 50.0, 5e7);
        assert_eq!(req.expiry_abs(), None);

        let req = req.with_expiry(30.0);
        assert_eq!(req.expiry_abs(), Some(80.0));
    }

    #[test]
    fn test_zero_expiry_means_unbounded() {
        let req = RouteRequest::new(1, 2, 10.0, 1.0).with_expiry(0.0);
        assert_eq!(req.expiry_abs(), None);
    }

    #[test]
    fn test_route_not_found() {
        let r = Route::not_found();
        assert!(!r.found);
        assert_eq!(r.hops(), 0);
        assert!(r.contact_ids.is_empty());
    }

    #[test]
    fn test_route_latency() {
        let r = Route::found(vec![3, 7], 12.5);
        assert_eq!(r.hops(), 2);
        assert!((r.latency(2.5) - 10.0).abs() < 1e-12);
    }
}
