use cs_behavior::BehaviorError;
use cs_core::{AgentId, CoreError};
use cs_field::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("agent registry error: {0}")]
    Agent(#[from] CoreError),

    #[error("field error: {0}")]
    Field(#[from] FieldError),

    #[error("behavior module of {agent} failed: {source}")]
    Behavior {
        agent:  AgentId,
        #[source]
        source: BehaviorError,
    },
}

pub type SimResult<T> = Result<T, SimError>;
