use serde::{Deserialize, Serialize};

/// The purchase state of a product, stored as `0`/`1` in the `bought` column.
///
/// The only transition is `Unbought -> Bought`; there is no way back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i64)]
pub enum BoughtFlag {
    #[default]
    Unbought = 0,
    Bought = 1,
}

impl BoughtFlag {
    pub fn is_bought(&self) -> bool {
        matches!(self, BoughtFlag::Bought)
    }
}

impl From<bool> for BoughtFlag {
    fn from(bought: bool) -> Self {
        if bought {
            BoughtFlag::Bought
        } else {
            BoughtFlag::Unbought
        }
    }
}

/// Which slice of the product table a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductFilter {
    /// Every product in the store, regardless of owner.
    All,
    Unbought,
    Bought,
}

impl From<Option<bool>> for ProductFilter {
    fn from(bought: Option<bool>) -> Self {
        match bought {
            None => ProductFilter::All,
            Some(false) => ProductFilter::Unbought,
            Some(true) => ProductFilter::Bought,
        }
    }
}

impl ProductFilter {
    /// The flag value to match in the store, or `None` for an unfiltered listing.
    pub fn flag(&self) -> Option<BoughtFlag> {
        match self {
            ProductFilter::All => None,
            ProductFilter::Unbought => Some(BoughtFlag::Unbought),
            ProductFilter::Bought => Some(BoughtFlag::Bought),
        }
    }
}
