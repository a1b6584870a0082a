use cs_field::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("field query failed: {0}")]
    Field(#[from] FieldError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
