//! Shared error taxonomy
//!
//! Failures that are normal routing outcomes (no viable route, exhausted
//! capacity on a later K iteration, contradictory filters) are *not* errors:
//! they surface as `found = false` in the returned [`Route`](crate::Route).
//! Only structurally invalid requests are typed errors.

use thiserror::Error;

/// Errors for structurally invalid planning requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Source node outside the neighbor index table
    #[error("source node {node} out of range (plan references nodes 0..{node_count})")]
    SourceOutOfRange { node: u32, node_count: usize },

    /// Destination node outside the neighbor index table
    #[error("destination node {node} out of range (plan references nodes 0..{node_count})")]
    DestinationOutOfRange { node: u32, node_count: usize },

    /// The plan has no contacts
    #[error("contact plan is empty")]
    EmptyPlan,
}

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;
