//! # Kepler Core
//!
//! Contact plan model for the Kepler Contact Graph Routing engine.
//!
//! A *contact plan* is a schedule of directed, time-bounded transmission
//! opportunities between nodes of a space network (satellites and ground
//! stations). This crate defines the plan vocabulary shared by every other
//! Kepler crate:
//!
//! - [`Contact`]: one scheduled transmission window between two nodes
//! - [`RouteRequest`]: an immutable description of a bundle to deliver
//! - [`Route`]: an ordered sequence of contacts from source to destination
//! - [`FilterSet`]: banned-contact and forced-prefix constraints for search
//! - [`leo`]: link-type heuristics for LEO constellations
//! - [`error`]: the shared error taxonomy
//!
//! The routing algorithms themselves live in `kepler-cgr`; plan ingestion
//! and generation live in `kepler-plan`.
//!
//! ## Numerical tolerances
//!
//! Feasibility arithmetic near contact window boundaries is subject to
//! floating-point drift. Two tolerance constants absorb it and are part of
//! the engine's observable contract: [`EPS_TIME`] and [`EPS_BYTES`].
//! Boundary-touching contacts are considered usable.

pub mod contact;
pub mod error;
pub mod filter;
pub mod leo;
pub mod route;

pub use contact::Contact;
pub use error::{PlanError, PlanResult};
pub use filter::FilterSet;
pub use leo::{LeoMetrics, LinkType};
pub use route::{Route, RouteRequest};

/// Temporal tolerance (seconds) for window-boundary comparisons.
pub const EPS_TIME: f64 = 1e-12;

/// Capacity tolerance (bytes) for residual-volume comparisons.
pub const EPS_BYTES: f64 = 1e-9;
