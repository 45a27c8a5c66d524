use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

impl From<infection_subset_sum::Error> for SelectionError {
    fn from(e: infection_subset_sum::Error) -> Self {
        match e {
            infection_subset_sum::Error::InvalidArgument(msg) => SelectionError::InvalidArgument(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, SelectionError>;
