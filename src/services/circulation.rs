//! Circulation service: the borrow/return/renew state machine

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    config::CirculationConfig,
    error::{AppError, AppResult},
    models::{
        loan::{LoanDetails, OverdueLoan},
        member::Member,
        item::LibraryItem,
        transaction::TransactionKind,
    },
    repository::Repository,
    services::notifier::EventNotifier,
};

/// Outcome of a successful borrow
#[derive(Debug, Clone)]
pub struct BorrowOutcome {
    pub item_id: String,
    pub member_id: String,
    pub due_date: DateTime<Utc>,
}

/// Outcome of a successful return
#[derive(Debug, Clone)]
pub struct ReturnOutcome {
    pub item_id: String,
    pub member_id: String,
    pub days_late: i64,
    pub fee: Decimal,
}

/// Outcome of a successful renewal
#[derive(Debug, Clone)]
pub struct RenewOutcome {
    pub item_id: String,
    pub member_id: String,
    pub due_date: DateTime<Utc>,
    pub renewals: u32,
}

/// Orchestrates borrow/return/renew transitions across the catalog, the
/// member registry and the loan ledger. Each transition runs under one
/// write lock, so no partial state is observable to other callers, and
/// every attempt (success or failure) publishes an event.
#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
    notifier: EventNotifier,
    config: CirculationConfig,
}

impl CirculationService {
    pub fn new(repository: Repository, notifier: EventNotifier, config: CirculationConfig) -> Self {
        Self {
            repository,
            notifier,
            config,
        }
    }

    /// Borrow an item for a member.
    ///
    /// Fails, in order, with `MemberNotFound` / `ItemNotFound`,
    /// `ItemUnavailable`, then `BorrowLimitExceeded`; a failed attempt
    /// changes nothing. On success the item is marked unavailable, the id
    /// joins the member's borrow set, a borrow record with due date
    /// `now + borrow_days` is opened and a transaction is appended, all
    /// within the same lock scope.
    pub async fn borrow(&self, member_id: &str, item_id: &str) -> AppResult<BorrowOutcome> {
        let mut state = self.repository.write().await;

        if !state.members.contains(member_id) {
            drop(state);
            return Err(self.reject(
                AppError::MemberNotFound(format!("Member with id {} not found", member_id)),
                &format!("Borrow rejected: member '{}' not found", member_id),
            ));
        }
        let (title, available) = match state.catalog.get(item_id) {
            Ok(item) => (item.title.clone(), item.available),
            Err(err) => {
                drop(state);
                return Err(self.reject(
                    err,
                    &format!("Borrow rejected: item '{}' not found", item_id),
                ));
            }
        };
        if !available {
            drop(state);
            return Err(self.reject(
                AppError::ItemUnavailable(format!("Item '{}' is not available", title)),
                &format!("Borrow rejected: '{}' is not available", title),
            ));
        }
        if !state.members.record_borrow(member_id, item_id) {
            let limit = state.members.max_borrows();
            drop(state);
            return Err(self.reject(
                AppError::BorrowLimitExceeded(format!(
                    "Member {} has reached the borrow limit ({})",
                    member_id, limit
                )),
                &format!(
                    "Borrow rejected: member '{}' has reached the borrow limit ({})",
                    member_id, limit
                ),
            ));
        }

        let now = Utc::now();
        let due_date = now + Duration::days(self.config.borrow_days);
        state.catalog.set_available(item_id, false)?;
        state.loans.open(member_id, item_id, now, due_date);
        state.loans.record(member_id, item_id, TransactionKind::Borrow);
        let member_name = state.members.get(member_id)?.name.clone();
        drop(state);

        tracing::info!("item {} borrowed by member {}", item_id, member_id);
        self.notifier.notify(&format!(
            "'{}' borrowed by {}, due on {}",
            title,
            member_name,
            due_date.format("%Y-%m-%d")
        ));

        Ok(BorrowOutcome {
            item_id: item_id.to_string(),
            member_id: member_id.to_string(),
            due_date,
        })
    }

    /// Return an item held by a member.
    ///
    /// Fails with `NotBorrowed` when the item does not exist or is not
    /// currently on loan to this member, changing nothing. On success the
    /// item becomes available again, the borrow record is closed, the late
    /// fee is computed from the configured strategy and a transaction is
    /// appended.
    pub async fn return_item(&self, member_id: &str, item_id: &str) -> AppResult<ReturnOutcome> {
        let mut state = self.repository.write().await;

        if !state.members.contains(member_id) {
            drop(state);
            return Err(self.reject(
                AppError::MemberNotFound(format!("Member with id {} not found", member_id)),
                &format!("Return rejected: member '{}' not found", member_id),
            ));
        }
        let holds_loan = state
            .loans
            .get(item_id)
            .is_some_and(|record| record.member_id == member_id);
        if !holds_loan {
            drop(state);
            return Err(self.reject(
                AppError::NotBorrowed(format!(
                    "Item {} is not borrowed by member {}",
                    item_id, member_id
                )),
                &format!(
                    "Return rejected: item '{}' is not borrowed by member '{}'",
                    item_id, member_id
                ),
            ));
        }

        let record = match state.loans.close(member_id, item_id) {
            Some(record) => record,
            None => {
                drop(state);
                return Err(AppError::Internal(format!(
                    "Loan bookkeeping lost the record for item {}",
                    item_id
                )));
            }
        };
        if !state.members.record_return(member_id, item_id) {
            drop(state);
            return Err(AppError::Internal(format!(
                "Borrow set out of sync with the ledger for member {}",
                member_id
            )));
        }
        state.catalog.set_available(item_id, true)?;

        let now = Utc::now();
        let days_late = record.days_late(now);
        let category = state.catalog.get(item_id)?.category();
        let fee = self.config.fee_model.late_fee(category, days_late);
        state.loans.record(member_id, item_id, TransactionKind::Return);

        let title = state.catalog.get(item_id)?.title.clone();
        let member_name = state.members.get(member_id)?.name.clone();
        drop(state);

        tracing::info!(
            "item {} returned by member {} ({} day(s) late, fee {})",
            item_id,
            member_id,
            days_late,
            fee
        );
        self.notifier.notify(&format!(
            "'{}' returned by {}, {} day(s) late, fee {}",
            title, member_name, days_late, fee
        ));

        Ok(ReturnOutcome {
            item_id: item_id.to_string(),
            member_id: member_id.to_string(),
            days_late,
            fee,
        })
    }

    /// Extend a loan by the configured term, counted from now.
    ///
    /// Fails with `NotBorrowed` when (member, item) has no outstanding
    /// loan and with `RenewalLimitExceeded` once the per-loan renewal cap
    /// is reached.
    pub async fn renew(&self, member_id: &str, item_id: &str) -> AppResult<RenewOutcome> {
        let mut state = self.repository.write().await;

        let record = match state.loans.get(item_id) {
            Some(record) if record.member_id == member_id => record,
            _ => {
                drop(state);
                let message = format!(
                    "Renewal rejected: item '{}' is not borrowed by member '{}'",
                    item_id, member_id
                );
                self.notifier.notify(&message);
                return Err(AppError::NotBorrowed(format!(
                    "Item {} is not borrowed by member {}",
                    item_id, member_id
                )));
            }
        };
        if record.renewals >= self.config.max_renewals {
            let renewals = record.renewals;
            drop(state);
            let message = format!(
                "Renewal rejected: loan of '{}' already renewed {} time(s)",
                item_id, renewals
            );
            self.notifier.notify(&message);
            return Err(AppError::RenewalLimitExceeded(format!(
                "Maximum renewals reached ({}/{})",
                renewals, self.config.max_renewals
            )));
        }

        let new_due_date = Utc::now() + Duration::days(self.config.borrow_days);
        let renewals = match state.loans.renew(member_id, item_id, new_due_date) {
            Some(record) => record.renewals,
            None => {
                drop(state);
                return Err(AppError::Internal(format!(
                    "Loan bookkeeping lost the record for item {}",
                    item_id
                )));
            }
        };
        state
            .loans
            .record(member_id, item_id, TransactionKind::Renew { new_due_date });
        let title = state.catalog.get(item_id)?.title.clone();
        let member_name = state.members.get(member_id)?.name.clone();
        drop(state);

        tracing::info!("loan of item {} renewed by member {}", item_id, member_id);
        self.notifier.notify(&format!(
            "'{}' renewed by {}, now due on {} ({} renewal(s))",
            title,
            member_name,
            new_due_date.format("%Y-%m-%d"),
            renewals
        ));

        Ok(RenewOutcome {
            item_id: item_id.to_string(),
            member_id: member_id.to_string(),
            due_date: new_due_date,
            renewals,
        })
    }

    /// Visit every currently-overdue loan exactly once. Read-only; the
    /// callback receives the item, the member and the days past due.
    pub async fn process_overdue<F>(&self, mut action: F)
    where
        F: FnMut(&LibraryItem, &Member, i64),
    {
        let state = self.repository.read().await;
        let now = Utc::now();
        for record in state.loans.active_loans() {
            let days_late = record.days_late(now);
            if days_late <= 0 {
                continue;
            }
            if let (Ok(item), Ok(member)) = (
                state.catalog.get(&record.item_id),
                state.members.get(&record.member_id),
            ) {
                action(item, member, days_late);
            }
        }
    }

    /// Snapshot of all overdue loans, for reporting
    pub async fn overdue_loans(&self) -> Vec<OverdueLoan> {
        let state = self.repository.read().await;
        let now = Utc::now();
        let mut overdue = Vec::new();
        for record in state.loans.active_loans() {
            let days_late = record.days_late(now);
            if days_late <= 0 {
                continue;
            }
            if let (Ok(item), Ok(member)) = (
                state.catalog.get(&record.item_id),
                state.members.get(&record.member_id),
            ) {
                overdue.push(OverdueLoan {
                    item_id: item.id.clone(),
                    title: item.title.clone(),
                    member_id: member.member_id.clone(),
                    member_name: member.name.clone(),
                    due_date: record.due_date,
                    days_late,
                });
            }
        }
        overdue
    }

    /// Active loans of one member, in borrow order
    pub async fn member_loans(&self, member_id: &str) -> AppResult<Vec<LoanDetails>> {
        let state = self.repository.read().await;
        let member = state.members.get(member_id)?;
        let now = Utc::now();

        let mut loans = Vec::with_capacity(member.borrowed.len());
        for item_id in &member.borrowed {
            let item = state.catalog.get(item_id)?;
            let record = state.loans.get(item_id).ok_or_else(|| {
                AppError::Internal(format!(
                    "Borrow set out of sync with the ledger for item {}",
                    item_id
                ))
            })?;
            loans.push(LoanDetails {
                item_id: item.id.clone(),
                title: item.title.clone(),
                member_id: member.member_id.clone(),
                member_name: member.name.clone(),
                borrowed_at: record.borrowed_at,
                due_date: record.due_date,
                renewals: record.renewals,
                is_overdue: record.is_overdue(now),
            });
        }
        Ok(loans)
    }

    /// Publish a failure event and hand the error back to the caller
    fn reject(&self, error: AppError, message: &str) -> AppError {
        tracing::warn!("{}", message);
        self.notifier.notify(message);
        error
    }
}
