//! K routes by Yen-style diversification
//!
//! Spur-and-ban exploration: starting from the base best route, every
//! route already in the result is re-searched at every position with its
//! prefix up to that position forced and the contact at that position
//! banned. The cheapest candidate not yet in the result joins it. Unlike
//! the consumption variant this preserves residual capacity and expresses
//! topological diversity.
//!
//! Duplicate suppression is by ordered id sequence, kept in a hash set so
//! membership checks stay O(1) across rounds.

use std::collections::HashSet;

use kepler_core::{Contact, FilterSet, PlanResult, Route, RouteRequest};
use tracing::debug;

use crate::index::NeighborIndex;
use crate::search::best_route_filtered;

/// Spur attempts are capped at this multiple of `k` to bound worst-case
/// cost on adversarial plans.
const ATTEMPTS_PER_ROUTE: usize = 20;

/// Up to `k` mutually distinct routes, cheapest first discovery order,
/// without consuming capacity.
pub fn k_routes_by_diversification(
    plan: &[Contact],
    index: &NeighborIndex,
    request: &RouteRequest,
    k: usize,
) -> PlanResult<Vec<Route>> {
    if k == 0 {
        return Ok(Vec::new());
    }

    let base = best_route_filtered(plan, index, request, &FilterSet::none())?;
    if !base.found {
        return Ok(Vec::new());
    }

    let mut seen: HashSet<Vec<u32>> = HashSet::new();
    seen.insert(base.contact_ids.clone());
    let mut routes = vec![base];

    let max_attempts = ATTEMPTS_PER_ROUTE * k;
    let mut attempts = 0;

    while routes.len() < k && attempts < max_attempts {
        attempts += 1;

        let mut best_candidate: Option<Route> = None;

        // Try a diversion at every position of every route found so far
        for route_idx in 0..routes.len() {
            let reference = routes[route_idx].clone();
            for spur in 0..reference.contact_ids.len() {
                let filters = FilterSet::none()
                    .with_forced_prefix(reference.contact_ids[..spur].to_vec())
                    .with_ban(reference.contact_ids[spur]);

                let candidate = best_route_filtered(plan, index, request, &filters)?;
                if !candidate.found || seen.contains(&candidate.contact_ids) {
                    continue;
                }

                let improves = best_candidate
                    .as_ref()
                    .map(|best| candidate.eta < best.eta)
                    .unwrap_or(true);
                if improves {
                    best_candidate = Some(candidate);
                }
            }
        }

        match best_candidate {
            Some(route) => {
                debug!(
                    rank = routes.len(),
                    eta = route.eta,
                    hops = route.hops(),
                    "alternative found"
                );
                seen.insert(route.contact_ids.clone());
                routes.push(route);
            }
            None => {
                debug!(attempts, found = routes.len(), "no further alternatives");
                break;
            }
        }
    }

    Ok(routes)
}
