//! Catalog item model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Item categories handled by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Book,
    Dvd,
    Magazine,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Book => "book",
            Category::Dvd => "dvd",
            Category::Magazine => "magazine",
        }
    }

    /// Prefix used when generating item ids (e.g. "B4821")
    pub fn id_prefix(&self) -> char {
        match self {
            Category::Book => 'B',
            Category::Dvd => 'D',
            Category::Magazine => 'G',
        }
    }

    /// Late fee charged per day past the due date
    pub fn daily_fee_rate(&self) -> Decimal {
        match self {
            Category::Book => Decimal::new(50, 2),
            Category::Dvd => Decimal::new(100, 2),
            Category::Magazine => Decimal::new(25, 2),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" => Ok(Category::Book),
            "dvd" => Ok(Category::Dvd),
            "magazine" => Ok(Category::Magazine),
            _ => Err(format!("Unknown item category: {}", s)),
        }
    }
}

/// Category-specific item fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ItemDetails {
    Book {
        author: String,
        isbn: String,
        pages: u32,
    },
    Dvd {
        director: String,
        duration_minutes: u32,
        genre: String,
    },
    Magazine {
        issue_number: u32,
        publisher: String,
    },
}

impl ItemDetails {
    pub fn category(&self) -> Category {
        match self {
            ItemDetails::Book { .. } => Category::Book,
            ItemDetails::Dvd { .. } => Category::Dvd,
            ItemDetails::Magazine { .. } => Category::Magazine,
        }
    }
}

/// A catalog item. The id is unique and immutable; availability toggles as
/// the item moves through borrow/return cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LibraryItem {
    pub id: String,
    pub title: String,
    pub available: bool,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl LibraryItem {
    /// Create a new, available item
    pub fn new(id: impl Into<String>, title: impl Into<String>, details: ItemDetails) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            available: true,
            details,
        }
    }

    pub fn category(&self) -> Category {
        self.details.category()
    }

    /// Author name, for books only
    pub fn author(&self) -> Option<&str> {
        match &self.details {
            ItemDetails::Book { author, .. } => Some(author),
            _ => None,
        }
    }

}
