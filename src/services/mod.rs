use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::fetch::FetchError;

pub mod orders;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
