//! Transaction ledger entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of circulation transaction, with per-kind payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransactionKind {
    Borrow,
    Return,
    Renew { new_due_date: DateTime<Utc> },
}

/// Immutable ledger entry recording one circulation event. Entries are
/// append-only and kept in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub transaction_id: u64,
    pub member_id: String,
    pub item_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: TransactionKind,
}
