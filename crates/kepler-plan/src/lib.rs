//! # Kepler Plan
//!
//! Contact plan sources and transformations.
//!
//! Everything that produces or reshapes a contact plan before the routing
//! kernel sees it lives here:
//!
//! - [`csv`]: tolerant CSV ingestion (the primary interchange format)
//! - [`periodize`]: replicate a short cyclic plan around the current clock
//! - [`synth`]: seeded synthetic LEO constellation plans for demos
//! - [`fetch`]: HTTP retrieval of remotely hosted plans (SODA-style CSV
//!   endpoints) with local fallback left to the caller
//!
//! The routing kernel itself never performs I/O; these collaborators hand
//! it plain `Vec<Contact>` values.

pub mod csv;
pub mod error;
pub mod fetch;
pub mod periodize;
pub mod synth;

pub use csv::{load_contacts_csv, parse_contacts};
pub use error::{PlanSourceError, SourceResult};
pub use fetch::{fetch_contacts, FetchConfig};
pub use periodize::{auto_period, periodize};
pub use synth::{generate, SynthConfig, SyntheticPlan};
