//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so registry and geometry failures propagate with `?`.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `cs-core` and the agent registry.
///
/// `AgentNotFound`, `AgentRemoved` and `InvalidVolume` are logic errors: a
/// caller referenced an agent that the registry never allocated or has
/// already retired, or shrank one to nothing.  `InvalidAxis` and `Config`
/// are configuration errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent {0} has already been removed from the simulation")]
    AgentRemoved(AgentId),

    #[error("agent {agent}: volume would become {volume}, must stay positive")]
    InvalidVolume { agent: AgentId, volume: f64 },

    #[error("non-existing axis: {0}")]
    InvalidAxis(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `cs-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
