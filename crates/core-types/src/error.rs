use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Rating must be between 1 and 10 inclusive, got {0}")]
    InvalidRating(i64),
}
