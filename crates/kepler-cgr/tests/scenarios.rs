//! Regression scenarios for the routing kernel
//!
//! Small hand-built contact plans with arithmetic worked out by hand:
//! linear chains, capacity starvation, disjoint-path diversification,
//! consumption-forced detours, expiry pruning, and filter combinations.

use kepler_cgr::{
    best_route, best_route_filtered, k_routes_by_consumption, k_routes_by_diversification,
    NeighborIndex,
};
use kepler_core::{Contact, FilterSet, RouteRequest};

fn contact(
    id: u32,
    from: u32,
    to: u32,
    t_start: f64,
    t_end: f64,
    setup_s: f64,
    residual: f64,
) -> Contact {
    Contact {
        id,
        from,
        to,
        t_start,
        t_end,
        owlt: 0.02,
        rate_bps: 1e7,
        setup_s,
        residual_bytes: residual,
    }
}

/// C0: 100 -> 1 over [0, 40], C1: 1 -> 200 over [5, 50].
fn linear_chain() -> Vec<Contact> {
    vec![
        contact(0, 100, 1, 0.0, 40.0, 0.2, 1e8),
        contact(1, 1, 200, 5.0, 50.0, 0.1, 1e8),
    ]
}

/// The linear chain plus a second disjoint path through node 2.
fn two_path_plan() -> Vec<Contact> {
    let mut plan = linear_chain();
    plan.push(contact(2, 100, 2, 0.0, 40.0, 0.2, 1e8));
    plan.push(contact(3, 2, 200, 6.0, 60.0, 0.1, 1e8));
    plan
}

#[test]
fn linear_chain_eta() {
    let plan = linear_chain();
    let index = NeighborIndex::build(&plan);
    let request = RouteRequest::new(100, 200, 0.0, 5e7);

    let route = best_route(&plan, &index, &request).unwrap();
    assert!(route.found);
    assert_eq!(route.hops(), 2);
    assert_eq!(route.contact_ids, vec![0, 1]);
    // 0.2 + 5 + 0.02 on the first hop, then 0.1 + 5 + 0.02 from t=5.22
    assert!((route.eta - 10.34).abs() < 1e-9, "eta = {}", route.eta);
}

#[test]
fn first_hop_capacity_starves_route() {
    let mut plan = linear_chain();
    plan[0].residual_bytes = 1e7;
    let index = NeighborIndex::build(&plan);
    let request = RouteRequest::new(100, 200, 0.0, 5e7);

    let route = best_route(&plan, &index, &request).unwrap();
    assert!(!route.found);
    assert!(route.contact_ids.is_empty());
}

#[test]
fn diversification_finds_both_disjoint_paths() {
    let plan = two_path_plan();
    let index = NeighborIndex::build(&plan);
    let request = RouteRequest::new(100, 200, 0.0, 5e7);

    let routes = k_routes_by_diversification(&plan, &index, &request, 2).unwrap();
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].contact_ids, vec![0, 1]);
    assert_eq!(routes[1].contact_ids, vec![2, 3]);
    assert!(routes[0].eta <= routes[1].eta);
}

#[test]
fn consumption_forces_detour_to_second_path() {
    // Bundle size equals the first path's residual: one pass drains it
    let plan = two_path_plan();
    let index = NeighborIndex::build(&plan);
    let request = RouteRequest::new(100, 200, 0.0, 1e8);

    let routes = k_routes_by_consumption(&plan, &index, &request, 2).unwrap();
    assert_eq!(routes.len(), 2);

    // With the bundle this large both paths tie on eta, so only the shape
    // is asserted: two disjoint paths, each used once
    let mut sequences = vec![routes[0].contact_ids.clone(), routes[1].contact_ids.clone()];
    sequences.sort();
    assert_eq!(sequences, vec![vec![0, 1], vec![2, 3]]);
}

#[test]
fn expiry_shorter_than_latency_prunes_all_routes() {
    let mut plan = linear_chain();
    plan[1].owlt = 25.0; // long downlink propagation
    let index = NeighborIndex::build(&plan);

    // Route latency is 35.32 s; a 30 s TTL cannot be met
    let request = RouteRequest::new(100, 200, 0.0, 5e7).with_expiry(30.0);
    let route = best_route(&plan, &index, &request).unwrap();
    assert!(!route.found);

    // Relaxing the TTL restores the route
    let request = RouteRequest::new(100, 200, 0.0, 5e7).with_expiry(40.0);
    let route = best_route(&plan, &index, &request).unwrap();
    assert!(route.found);
}

#[test]
fn forced_prefix_and_ban_combine() {
    // Three parallel options from the source: A through node 1, B through
    // node 2, C through node 3
    let plan = vec![
        contact(0, 100, 1, 0.0, 40.0, 0.2, 1e8),
        contact(1, 1, 200, 5.0, 50.0, 0.1, 1e8),
        contact(2, 100, 2, 0.0, 40.0, 0.2, 1e8),
        contact(3, 2, 200, 5.0, 50.0, 0.1, 1e8),
        contact(4, 100, 3, 0.0, 40.0, 0.2, 1e8),
        contact(5, 3, 200, 5.0, 50.0, 0.1, 1e8),
    ];
    let index = NeighborIndex::build(&plan);
    let request = RouteRequest::new(100, 200, 0.0, 5e7);

    // Force option A's first contact and ban option B's relay
    let filters = FilterSet::none().with_forced_prefix(vec![0]).with_ban(3);
    let route = best_route_filtered(&plan, &index, &request, &filters).unwrap();

    assert!(route.found);
    assert_eq!(route.contact_ids, vec![0, 1]);
    assert!(!route.contact_ids.contains(&2));
    assert!(!route.contact_ids.contains(&3));
}

#[test]
fn consumption_reuses_path_until_drained() {
    // First path carries exactly two bundles before running dry
    let plan = two_path_plan();
    let index = NeighborIndex::build(&plan);
    let request = RouteRequest::new(100, 200, 0.0, 5e7);

    let routes = k_routes_by_consumption(&plan, &index, &request, 3).unwrap();
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0].contact_ids, vec![0, 1]);
    assert_eq!(routes[1].contact_ids, vec![0, 1]);
    assert_eq!(routes[2].contact_ids, vec![2, 3]);
}
