//! Error types for query construction

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("query needs at least one field")]
    EmptyFields,

    #[error("query limit must be positive")]
    InvalidLimit,
}
