use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;
use validator::ValidationErrors;

/// MongoDB server code for a unique index violation
pub(crate) const DUPLICATE_KEY_CODE: i32 = 11000;

/// Failure kinds reported by a [`ProductRepository`](crate::ProductRepository)
/// and by request parsing.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,

    /// The identifier is not a well-formed product id
    #[error("Invalid product id format: {0}")]
    InvalidFormat(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A unique field (the product `code`) collides with a stored product
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// HTTP status for this failure kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProductError::NotFound => StatusCode::NOT_FOUND,
            ProductError::InvalidFormat(_)
            | ProductError::Validation(_)
            | ProductError::DuplicateKey(_) => StatusCode::BAD_REQUEST,
            ProductError::Unexpected(_) | ProductError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            ProductError::DuplicateKey(err.to_string())
        } else {
            ProductError::Database(err.to_string())
        }
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Unexpected(err.to_string())
    }
}

impl From<ValidationErrors> for ProductError {
    fn from(err: ValidationErrors) -> Self {
        ProductError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ProductError {
    fn from(rejection: JsonRejection) -> Self {
        ProductError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ProductError {
    fn from(rejection: PathRejection) -> Self {
        ProductError::InvalidFormat(rejection.body_text())
    }
}
