//! Time-dependent shortest path over contacts, with filters
//!
//! A Dijkstra variant where vertices are contacts and edges are
//! time-respecting successions: contact `b` follows contact `a` when
//! `a.to == b.from` and `b` is still feasible at the bundle's arrival
//! time after `a`. The first time a contact pops with a label no worse
//! than its stored best, that label is globally optimal, so the search
//! exits as soon as the destination pops, with the extra condition that
//! any forced prefix has been fully consumed on the path ending there.

use kepler_core::{Contact, FilterSet, PlanError, PlanResult, Route, RouteRequest, EPS_TIME};
use tracing::{debug, instrument, trace};

use crate::feasibility;
use crate::frontier::Frontier;
use crate::index::NeighborIndex;

/// Cap on back-pointer walks. Valid paths cannot cycle (the graph is
/// time-monotone and each contact appears at most once per path); the cap
/// only defends against corrupted plan data.
const BACKTRACK_CAP: usize = 10_000;

/// Per-contact Dijkstra state, reset on every search.
#[derive(Debug, Clone, Copy)]
struct Label {
    /// Tentative earliest arrival at the end of this contact
    eta: f64,
    /// Index of the predecessor contact on the best known path, if any
    prev: Option<usize>,
}

impl Label {
    fn unreached() -> Self {
        Self {
            eta: f64::INFINITY,
            prev: None,
        }
    }
}

/// Best route without filters. See [`best_route_filtered`].
pub fn best_route(
    plan: &[Contact],
    index: &NeighborIndex,
    request: &RouteRequest,
) -> PlanResult<Route> {
    best_route_filtered(plan, index, request, &FilterSet::none())
}

/// Earliest-arrival route under banned-contact and forced-prefix
/// constraints.
///
/// Out-of-range endpoints and empty plans are hard errors; every other
/// failure (no viable successor, expired deadline, contradictory filters)
/// is the normal `found = false` outcome.
#[instrument(
    level = "debug",
    skip_all,
    fields(
        src = request.src_node,
        dst = request.dst_node,
        t0 = request.t0,
        bytes = request.bundle_bytes,
    )
)]
pub fn best_route_filtered(
    plan: &[Contact],
    index: &NeighborIndex,
    request: &RouteRequest,
    filters: &FilterSet,
) -> PlanResult<Route> {
    if plan.is_empty() {
        return Err(PlanError::EmptyPlan);
    }
    if !index.contains_node(request.src_node) {
        return Err(PlanError::SourceOutOfRange {
            node: request.src_node,
            node_count: index.node_count(),
        });
    }
    if !index.contains_node(request.dst_node) {
        return Err(PlanError::DestinationOutOfRange {
            node: request.dst_node,
            node_count: index.node_count(),
        });
    }

    let mut labels = vec![Label::unreached(); plan.len()];
    let mut frontier = Frontier::with_capacity(64);
    let expiry_abs = request.expiry_abs();

    seed(plan, index, request, filters, expiry_abs, &mut labels, &mut frontier);

    let mut best_end = None;
    let mut best_eta = f64::INFINITY;
    let mut expansions = 0u64;

    while let Some((ci, eta_here)) = frontier.pop() {
        expansions += 1;

        // Stale label: this contact was already settled with a better eta
        if eta_here > labels[ci].eta + EPS_TIME {
            continue;
        }

        let prefix_done = prefix_progress(ci, &labels, plan, filters);

        if plan[ci].to == request.dst_node
            && (!filters.has_forced_prefix() || prefix_done >= filters.forced_prefix.len())
        {
            best_end = Some(ci);
            best_eta = eta_here;
            debug!(
                contact = plan[ci].id,
                eta = eta_here,
                expansions,
                "destination reached"
            );
            break;
        }

        let next_node = plan[ci].to;

        // While the prefix is still owed, only its next id may follow
        let owed = if prefix_done < filters.forced_prefix.len() {
            filters.forced_at(prefix_done)
        } else {
            None
        };

        for &nj in index.departing(next_node) {
            let candidate = &plan[nj];
            if let Some(required) = owed {
                if candidate.id != required {
                    continue;
                }
            }
            if filters.is_banned(candidate.id) {
                continue;
            }
            if !feasibility::is_viable(candidate, eta_here, request.bundle_bytes) {
                continue;
            }
            let Some(eta_next) =
                feasibility::earliest_arrival(candidate, eta_here, request.bundle_bytes, expiry_abs)
            else {
                continue;
            };

            if eta_next + EPS_TIME < labels[nj].eta {
                trace!(
                    contact = candidate.id,
                    eta = eta_next,
                    via = plan[ci].id,
                    "label relaxed"
                );
                labels[nj] = Label {
                    eta: eta_next,
                    prev: Some(ci),
                };
                frontier.push(nj, eta_next);
            }
        }
    }

    match best_end {
        Some(end) => Ok(reconstruct(end, &labels, plan, best_eta)),
        None => {
            debug!(expansions, "frontier exhausted without reaching destination");
            Ok(Route::not_found())
        }
    }
}

/// Initialize the frontier from the source node at dispatch time.
fn seed(
    plan: &[Contact],
    index: &NeighborIndex,
    request: &RouteRequest,
    filters: &FilterSet,
    expiry_abs: Option<f64>,
    labels: &mut [Label],
    frontier: &mut Frontier,
) {
    if let Some(first_id) = filters.forced_at(0) {
        // Forced-prefix mode: seed exactly one contact, the first viable
        // occurrence of the forced id departing the source
        for (ci, contact) in plan.iter().enumerate() {
            if contact.id != first_id || contact.from != request.src_node {
                continue;
            }
            if filters.is_banned(contact.id) {
                continue;
            }
            if !feasibility::is_viable(contact, request.t0, request.bundle_bytes) {
                continue;
            }
            let Some(eta) =
                feasibility::earliest_arrival(contact, request.t0, request.bundle_bytes, expiry_abs)
            else {
                continue;
            };
            labels[ci] = Label { eta, prev: None };
            frontier.push(ci, eta);
            trace!(contact = contact.id, eta, "seeded forced prefix head");
            break;
        }
    } else {
        for &ci in index.departing(request.src_node) {
            let contact = &plan[ci];
            if filters.is_banned(contact.id) {
                continue;
            }
            if !feasibility::is_viable(contact, request.t0, request.bundle_bytes) {
                continue;
            }
            let Some(eta) =
                feasibility::earliest_arrival(contact, request.t0, request.bundle_bytes, expiry_abs)
            else {
                continue;
            };
            if eta < labels[ci].eta {
                labels[ci] = Label { eta, prev: None };
                frontier.push(ci, eta);
                trace!(contact = contact.id, eta, "seeded");
            }
        }
    }
}

/// How many forced-prefix positions the path ending at `ci` has already
/// satisfied: the longest run of the prefix matching the path's ids read
/// from the root.
fn prefix_progress(ci: usize, labels: &[Label], plan: &[Contact], filters: &FilterSet) -> usize {
    if !filters.has_forced_prefix() {
        return 0;
    }

    let mut ids = Vec::new();
    let mut cursor = Some(ci);
    while let Some(i) = cursor {
        ids.push(plan[i].id);
        cursor = labels[i].prev;
        if ids.len() > BACKTRACK_CAP {
            break;
        }
    }
    ids.reverse();

    ids.iter()
        .zip(&filters.forced_prefix)
        .take_while(|(path_id, forced_id)| path_id == forced_id)
        .count()
}

/// Walk back-pointers from the terminal contact and map indices to ids in
/// root-first order.
fn reconstruct(end: usize, labels: &[Label], plan: &[Contact], eta: f64) -> Route {
    let mut rev = Vec::with_capacity(16);
    let mut cursor = Some(end);
    while let Some(ci) = cursor {
        rev.push(ci);
        cursor = labels[ci].prev;
        if rev.len() > BACKTRACK_CAP {
            break;
        }
    }

    let contact_ids = rev.iter().rev().map(|&ci| plan[ci].id).collect();
    Route::found(contact_ids, eta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: u32, from: u32, to: u32, t_start: f64, t_end: f64) -> Contact {
        Contact {
            id,
            from,
            to,
            t_start,
            t_end,
            owlt: 0.02,
            rate_bps: 1e7,
            setup_s: 0.1,
            residual_bytes: 1e8,
        }
    }

    fn two_hop_plan() -> Vec<Contact> {
        vec![
            contact(0, 100, 1, 0.0, 40.0),
            contact(1, 1, 200, 5.0, 50.0),
        ]
    }

    fn request() -> RouteRequest {
        RouteRequest::new(100, 200, 0.0, 5e7)
    }

    #[test]
    fn test_two_hop_route() {
        let plan = two_hop_plan();
        let index = NeighborIndex::build(&plan);
        let route = best_route(&plan, &index, &request()).unwrap();

        assert!(route.found);
        assert_eq!(route.contact_ids, vec![0, 1]);
        // 0.1 + 5 + 0.02, then relay: 0.1 + 5 + 0.02 again from 5.12
        assert!((route.eta - 10.24).abs() < 1e-9);
    }

    #[test]
    fn test_source_out_of_range() {
        let plan = two_hop_plan();
        let index = NeighborIndex::build(&plan);
        let req = RouteRequest::new(999, 200, 0.0, 5e7);
        assert!(matches!(
            best_route(&plan, &index, &req),
            Err(PlanError::SourceOutOfRange { node: 999, .. })
        ));
    }

    #[test]
    fn test_destination_out_of_range() {
        let plan = two_hop_plan();
        let index = NeighborIndex::build(&plan);
        let req = RouteRequest::new(100, 999, 0.0, 5e7);
        assert!(matches!(
            best_route(&plan, &index, &req),
            Err(PlanError::DestinationOutOfRange { node: 999, .. })
        ));
    }

    #[test]
    fn test_empty_plan_is_error() {
        let index = NeighborIndex::build(&[]);
        assert_eq!(
            best_route(&[], &index, &request()),
            Err(PlanError::EmptyPlan)
        );
    }

    #[test]
    fn test_unreachable_destination_not_found() {
        // No contact reaches node 200
        let plan = vec![contact(0, 100, 1, 0.0, 40.0), contact(1, 1, 2, 5.0, 50.0)];
        let index = NeighborIndex::build(&plan);
        let route = best_route(&plan, &index, &request()).unwrap();
        assert!(!route.found);
        assert!(route.contact_ids.is_empty());
    }

    #[test]
    fn test_picks_faster_of_two_paths() {
        let mut plan = two_hop_plan();
        // A slower parallel branch through node 2
        plan.push(contact(2, 100, 2, 20.0, 60.0));
        plan.push(contact(3, 2, 200, 30.0, 80.0));
        let index = NeighborIndex::build(&plan);

        let route = best_route(&plan, &index, &request()).unwrap();
        assert_eq!(route.contact_ids, vec![0, 1]);
    }

    #[test]
    fn test_banned_contact_forces_detour() {
        let mut plan = two_hop_plan();
        plan.push(contact(2, 100, 2, 0.0, 60.0));
        plan.push(contact(3, 2, 200, 6.0, 80.0));
        let index = NeighborIndex::build(&plan);

        let filters = FilterSet::none().with_ban(0);
        let route = best_route_filtered(&plan, &index, &request(), &filters).unwrap();
        assert!(route.found);
        assert_eq!(route.contact_ids, vec![2, 3]);
    }

    #[test]
    fn test_forced_prefix_steers_route() {
        let mut plan = two_hop_plan();
        // Faster branch the prefix must override
        plan.push(contact(2, 100, 2, 0.0, 60.0));
        plan.push(contact(3, 2, 200, 0.0, 80.0));
        let index = NeighborIndex::build(&plan);

        let filters = FilterSet::none().with_forced_prefix(vec![0]);
        let route = best_route_filtered(&plan, &index, &request(), &filters).unwrap();
        assert!(route.found);
        assert_eq!(route.contact_ids, vec![0, 1]);
    }

    #[test]
    fn test_forced_prefix_of_banned_id_yields_nothing() {
        let plan = two_hop_plan();
        let index = NeighborIndex::build(&plan);

        let filters = FilterSet::none().with_ban(0).with_forced_prefix(vec![0]);
        let route = best_route_filtered(&plan, &index, &request(), &filters).unwrap();
        assert!(!route.found);
    }

    #[test]
    fn test_forced_prefix_not_from_source_yields_nothing() {
        let plan = two_hop_plan();
        let index = NeighborIndex::build(&plan);

        // Contact 1 departs node 1, not the source
        let filters = FilterSet::none().with_forced_prefix(vec![1]);
        let route = best_route_filtered(&plan, &index, &request(), &filters).unwrap();
        assert!(!route.found);
    }

    #[test]
    fn test_expiry_prunes_route() {
        let mut plan = two_hop_plan();
        plan[1].owlt = 30.0;
        let index = NeighborIndex::build(&plan);

        let req = request().with_expiry(20.0);
        let route = best_route(&plan, &index, &req).unwrap();
        assert!(!route.found);

        let req = request().with_expiry(60.0);
        let route = best_route(&plan, &index, &req).unwrap();
        assert!(route.found);
    }

    #[test]
    fn test_search_does_not_mutate_plan() {
        let plan = two_hop_plan();
        let before = plan.clone();
        let index = NeighborIndex::build(&plan);
        let _ = best_route(&plan, &index, &request()).unwrap();
        assert_eq!(plan, before);
    }

    #[test]
    fn test_repeat_search_is_idempotent() {
        let plan = two_hop_plan();
        let index = NeighborIndex::build(&plan);
        let a = best_route(&plan, &index, &request()).unwrap();
        let b = best_route(&plan, &index, &request()).unwrap();
        assert_eq!(a, b);
    }
}
