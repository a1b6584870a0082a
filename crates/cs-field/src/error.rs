use cs_core::{CoreError, SubstanceId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("field configuration error: {0}")]
    Config(String),

    #[error("substance {0} is not defined")]
    UndefinedSubstance(SubstanceId),

    #[error("substance {id} is defined as {defined:?}, not {requested:?}")]
    NameMismatch {
        id:        SubstanceId,
        defined:   String,
        requested: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type FieldResult<T> = Result<T, FieldError>;
