//! # Kepler Live
//!
//! Cyclic re-planning over a simulated clock.
//!
//! The [`LiveDriver`] owns a base contact plan and repeatedly plans a
//! bundle across it while the clock advances: each cycle periodizes the
//! plan around the current time, rebuilds the neighbor index, computes
//! the best route plus diversified alternatives, and emits a
//! [`CycleSnapshot`]. Between cycles it can consume capacity along the
//! chosen route and fold the observed first-hop wait into the EWMA
//! penalty state.
//!
//! The loop is a single cooperative task: compute, emit, sleep, advance.
//! Ctrl-C sets a stop request consulted between cycles; a planning call
//! in progress always runs to completion.

pub mod config;
pub mod driver;
pub mod snapshot;

pub use config::{LiveConfig, LiveConfigWarning};
pub use driver::LiveDriver;
pub use snapshot::CycleSnapshot;
