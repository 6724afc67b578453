//! Loan (borrow) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Due-date association for one outstanding loan. Exists exactly while the
/// item is borrowed: created on borrow, removed on the matching return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BorrowRecord {
    pub item_id: String,
    pub member_id: String,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    /// Number of renewals granted so far
    pub renewals: u32,
}

impl BorrowRecord {
    /// Whole days past the due date, never negative
    pub fn days_late(&self, now: DateTime<Utc>) -> i64 {
        (now - self.due_date).num_days().max(0)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now
    }
}

/// Loan with item and member context for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanDetails {
    pub item_id: String,
    pub title: String,
    pub member_id: String,
    pub member_name: String,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub renewals: u32,
    pub is_overdue: bool,
}

/// An overdue loan as reported by the overdue sweep
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OverdueLoan {
    pub item_id: String,
    pub title: String,
    pub member_id: String,
    pub member_name: String,
    pub due_date: DateTime<Utc>,
    pub days_late: i64,
}
