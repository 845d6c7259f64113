//! # Kepler CGR
//!
//! The Contact Graph Routing kernel.
//!
//! Given a contact plan and a [`RouteRequest`], the kernel computes the
//! earliest-arrival route and sets of diversified alternatives, honoring
//! per-contact time windows, setup latency, propagation delay, throughput
//! and residual byte capacity.
//!
//! ## Core Components
//!
//! - [`NeighborIndex`]: by-origin-node adjacency over a flat contact array
//! - [`feasibility`]: single-hop viability and earliest-finish arithmetic
//! - [`best_route`] / [`best_route_filtered`]: time-dependent Dijkstra over
//!   contacts, with banned-id and forced-prefix filters
//! - [`k_routes_by_consumption`]: K routes, decrementing residual capacity
//!   on a working copy between iterations
//! - [`k_routes_by_diversification`]: K distinct routes by Yen-style
//!   spur-and-ban exploration, capacity preserved
//! - [`WaitPenalty`]: EWMA smoothing of observed first-hop wait, applied as
//!   a setup-time hint on planning copies
//!
//! ## Search model
//!
//! Vertices of the search graph are *contacts*, not nodes; an edge exists
//! from contact `a` to contact `b` when `a.to == b.from` and `b` is still
//! feasible at the time the bundle finishes traversing `a`. Labels are
//! monotone decreasing per contact and the frontier pops non-decreasing
//! arrival times, so the first time the destination is popped the route is
//! globally optimal.
//!
//! The caller owns the plan. Searches never mutate it; the consumption
//! variant works on its own copy. Labels, frontier and reconstruction
//! buffers are scoped to a single call.

pub mod feasibility;
pub mod frontier;
pub mod index;
pub mod penalty;
mod consume;
mod search;
mod yen;

pub use consume::k_routes_by_consumption;
pub use frontier::Frontier;
pub use index::NeighborIndex;
pub use kepler_core::{PlanError, PlanResult};
pub use penalty::{PenaltyConfig, PenaltyWarning, WaitPenalty};
pub use search::{best_route, best_route_filtered};
pub use yen::k_routes_by_diversification;
