//! Loan ledger: outstanding borrow records and the transaction log

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use snowflaked::Generator;

use crate::models::{
    loan::BorrowRecord,
    transaction::{Transaction, TransactionKind},
};

/// Outstanding loans keyed by item id (an unavailable item has exactly one
/// record), plus the append-only transaction log. Transaction ids come from
/// a generator owned by this ledger.
pub struct LoanLedger {
    active: IndexMap<String, BorrowRecord>,
    transactions: Vec<Transaction>,
    ids: Generator,
}

impl LoanLedger {
    pub fn new() -> Self {
        Self::with_instance(0)
    }

    /// Build a ledger whose transaction-id generator carries the given
    /// instance id, for callers that run several ledgers side by side.
    pub fn with_instance(instance: u16) -> Self {
        Self {
            active: IndexMap::new(),
            transactions: Vec::new(),
            ids: Generator::new(instance),
        }
    }

    /// Open a loan for (member, item)
    pub fn open(
        &mut self,
        member_id: &str,
        item_id: &str,
        borrowed_at: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) {
        self.active.insert(
            item_id.to_string(),
            BorrowRecord {
                item_id: item_id.to_string(),
                member_id: member_id.to_string(),
                borrowed_at,
                due_date,
                renewals: 0,
            },
        );
    }

    /// The outstanding record for an item, if any
    pub fn get(&self, item_id: &str) -> Option<&BorrowRecord> {
        self.active.get(item_id)
    }

    /// Close the loan for (member, item). Returns the removed record, or
    /// None when there is no record or it belongs to another member.
    pub fn close(&mut self, member_id: &str, item_id: &str) -> Option<BorrowRecord> {
        match self.active.get(item_id) {
            Some(record) if record.member_id == member_id => self.active.shift_remove(item_id),
            _ => None,
        }
    }

    /// Push the due date of an outstanding loan and bump its renewal count.
    /// Returns the updated record, or None when (member, item) has no loan.
    pub fn renew(
        &mut self,
        member_id: &str,
        item_id: &str,
        new_due_date: DateTime<Utc>,
    ) -> Option<&BorrowRecord> {
        match self.active.get_mut(item_id) {
            Some(record) if record.member_id == member_id => {
                record.due_date = new_due_date;
                record.renewals += 1;
                Some(record)
            }
            _ => None,
        }
    }

    /// Append a transaction to the log and return its generated id
    pub fn record(&mut self, member_id: &str, item_id: &str, kind: TransactionKind) -> u64 {
        let transaction_id: u64 = self.ids.generate();
        self.transactions.push(Transaction {
            transaction_id,
            member_id: member_id.to_string(),
            item_id: item_id.to_string(),
            timestamp: Utc::now(),
            kind,
        });
        transaction_id
    }

    /// The full transaction log, in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn active_loans(&self) -> impl Iterator<Item = &BorrowRecord> {
        self.active.values()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn overdue_count(&self, now: DateTime<Utc>) -> usize {
        self.active.values().filter(|r| r.days_late(now) > 0).count()
    }
}

impl Default for LoanLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn close_requires_matching_member() {
        let mut ledger = LoanLedger::new();
        let now = Utc::now();
        ledger.open("M001", "B001", now, now + Duration::days(14));

        assert!(ledger.close("M002", "B001").is_none());
        assert!(ledger.get("B001").is_some());

        let record = ledger.close("M001", "B001").expect("loan should close");
        assert_eq!(record.member_id, "M001");
        assert!(ledger.get("B001").is_none());
    }

    #[test]
    fn transaction_log_keeps_insertion_order() {
        let mut ledger = LoanLedger::new();
        ledger.record("M001", "B001", TransactionKind::Borrow);
        ledger.record("M001", "B002", TransactionKind::Borrow);
        ledger.record("M001", "B001", TransactionKind::Return);

        let items: Vec<&str> = ledger
            .transactions()
            .iter()
            .map(|t| t.item_id.as_str())
            .collect();
        assert_eq!(items, ["B001", "B002", "B001"]);

        let mut ids: Vec<u64> = ledger
            .transactions()
            .iter()
            .map(|t| t.transaction_id)
            .collect();
        let original = ids.clone();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), original.len(), "transaction ids must be unique");
    }

    #[test]
    fn overdue_count_ignores_future_due_dates() {
        let mut ledger = LoanLedger::new();
        let now = Utc::now();
        ledger.open("M001", "B001", now, now - Duration::days(2));
        ledger.open("M001", "B002", now, now + Duration::days(2));

        assert_eq!(ledger.overdue_count(now), 1);
        assert_eq!(ledger.active_count(), 2);
    }

    #[test]
    fn renew_updates_due_date_and_count() {
        let mut ledger = LoanLedger::new();
        let now = Utc::now();
        ledger.open("M001", "B001", now, now + Duration::days(14));

        let new_due = now + Duration::days(28);
        let record = ledger.renew("M001", "B001", new_due).expect("renewable");
        assert_eq!(record.due_date, new_due);
        assert_eq!(record.renewals, 1);

        assert!(ledger.renew("M002", "B001", new_due).is_none());
    }
}
