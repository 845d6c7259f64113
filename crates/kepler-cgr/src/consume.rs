//! K routes by capacity consumption
//!
//! Runs the base search repeatedly on a working copy of the plan,
//! decrementing the residual capacity of every contact a found route uses
//! before the next iteration. Routes may share hops; the sequence reflects
//! contention on premium links, where the same downlink window is not
//! infinitely reusable. The caller's plan is never modified.

use kepler_core::{Contact, PlanResult, Route, RouteRequest};
use tracing::debug;

use crate::index::NeighborIndex;
use crate::search::best_route;

/// Up to `k` routes, consuming `bundle_bytes` of residual capacity on each
/// used contact between iterations (saturating at zero).
///
/// The returned list is shorter than `k` when capacity runs out; that is a
/// normal outcome, not an error. The index is reused across iterations:
/// consumption changes residuals only, never plan membership.
pub fn k_routes_by_consumption(
    plan: &[Contact],
    index: &NeighborIndex,
    request: &RouteRequest,
    k: usize,
) -> PlanResult<Vec<Route>> {
    let mut working: Vec<Contact> = plan.to_vec();
    let mut routes = Vec::with_capacity(k);

    for round in 0..k {
        let route = best_route(&working, index, request)?;
        if !route.found {
            debug!(round, found = routes.len(), "capacity exhausted");
            break;
        }
        consume_capacity(&mut working, &route, request.bundle_bytes);
        routes.push(route);
    }

    Ok(routes)
}

/// Subtract `bytes` from the residual of every contact on `route`,
/// saturating at zero. Matches by id, first occurrence.
fn consume_capacity(plan: &mut [Contact], route: &Route, bytes: f64) {
    for &id in &route.contact_ids {
        if let Some(contact) = plan.iter_mut().find(|c| c.id == id) {
            contact.residual_bytes = (contact.residual_bytes - bytes).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: u32, from: u32, to: u32, t_start: f64, t_end: f64, residual: f64) -> Contact {
        Contact {
            id,
            from,
            to,
            t_start,
            t_end,
            owlt: 0.02,
            rate_bps: 1e7,
            setup_s: 0.1,
            residual_bytes: residual,
        }
    }

    /// Two disjoint paths 100 -> 200; the left one is faster.
    fn two_path_plan() -> Vec<Contact> {
        vec![
            contact(0, 100, 1, 0.0, 40.0, 5e7),
            contact(1, 1, 200, 5.0, 50.0, 5e7),
            contact(2, 100, 2, 0.0, 40.0, 1e9),
            contact(3, 2, 200, 6.0, 60.0, 1e9),
        ]
    }

    #[test]
    fn test_consumption_forces_detour() {
        let plan = two_path_plan();
        let index = NeighborIndex::build(&plan);
        let request = RouteRequest::new(100, 200, 0.0, 5e7);

        let routes = k_routes_by_consumption(&plan, &index, &request, 2).unwrap();
        assert_eq!(routes.len(), 2);
        // First route drains the fast path entirely; second detours
        assert_eq!(routes[0].contact_ids, vec![0, 1]);
        assert_eq!(routes[1].contact_ids, vec![2, 3]);
    }

    #[test]
    fn test_caller_plan_untouched() {
        let plan = two_path_plan();
        let before = plan.clone();
        let index = NeighborIndex::build(&plan);
        let request = RouteRequest::new(100, 200, 0.0, 5e7);

        let _ = k_routes_by_consumption(&plan, &index, &request, 3).unwrap();
        assert_eq!(plan, before);
    }

    #[test]
    fn test_list_shorter_when_capacity_runs_out() {
        let plan = two_path_plan();
        let index = NeighborIndex::build(&plan);
        let request = RouteRequest::new(100, 200, 0.0, 5e7);

        // Both paths drained after two rounds of 5e7... the wide path has
        // 1e9, so ask for more rounds than the narrow path survives
        let routes = k_routes_by_consumption(&plan, &index, &request, 50).unwrap();
        assert!(routes.len() < 50);
        assert!(routes.len() >= 2);
    }

    #[test]
    fn test_saturating_consumption() {
        let mut plan = two_path_plan();
        plan[0].residual_bytes = 3e7; // less than one bundle
        let route = Route::found(vec![0], 1.0);
        consume_capacity(&mut plan, &route, 5e7);
        assert_eq!(plan[0].residual_bytes, 0.0);
    }

    #[test]
    fn test_zero_k_returns_empty() {
        let plan = two_path_plan();
        let index = NeighborIndex::build(&plan);
        let request = RouteRequest::new(100, 200, 0.0, 5e7);
        let routes = k_routes_by_consumption(&plan, &index, &request, 0).unwrap();
        assert!(routes.is_empty());
    }
}
