use crate::enums::BoughtFlag;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// The user who referred this one, if any. Not an ownership relation.
    pub master: Option<i64>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User #{} {}", self.id, self.name)
    }
}

/// A row of the `products` table, owned by the user `user_id`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub bought: BoughtFlag,
    pub user_id: i64,
    /// Kept raw: rows written by other tools may hold out-of-range values.
    pub rating: i64,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Product #{} {}", self.id, self.name)
    }
}

/// A product score in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rating(i64);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;

    pub fn new(score: i64) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&score) {
            Ok(Self(score))
        } else {
            Err(CoreError::InvalidRating(score))
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = CoreError;

    fn try_from(score: i64) -> Result<Self, Self::Error> {
        Rating::new(score)
    }
}
