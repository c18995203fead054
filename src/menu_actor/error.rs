use thiserror::Error;

use crate::session::AuthError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("Food not found: {0}")]
    NotFound(String),
    #[error("Invalid food: {0}")]
    Invalid(String),
    #[error("Menu database error: {0}")]
    DatabaseError(String),
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
}
