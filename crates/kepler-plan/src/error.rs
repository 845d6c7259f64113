//! Plan source error types

use thiserror::Error;

/// Errors raised while loading a contact plan from an external source.
///
/// Malformed rows inside an otherwise readable source are not errors:
/// they are skipped during parsing. These variants cover the source
/// itself failing.
#[derive(Debug, Error)]
pub enum PlanSourceError {
    /// Local file could not be read
    #[error("failed to read contact plan: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport failure
    #[error("plan fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote endpoint answered outside 2xx
    #[error("plan endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// The source was readable but yielded zero usable contacts
    #[error("plan source '{source_name}' contained no usable contacts")]
    EmptyPlan { source_name: String },
}

/// Result type for plan source operations.
pub type SourceResult<T> = Result<T, PlanSourceError>;
