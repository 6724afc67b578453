//! Repository layer: in-memory stores for catalog, members and loans

pub mod catalog;
pub mod loans;
pub mod members;

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use catalog::ItemCatalog;
use loans::LoanLedger;
use members::MemberRegistry;

/// The complete library state. Guarded by a single lock so that a
/// circulation transition can update catalog, registry and ledger as one
/// atomic unit.
pub struct LibraryState {
    pub catalog: ItemCatalog,
    pub members: MemberRegistry,
    pub loans: LoanLedger,
}

/// Shared handle to the library state
#[derive(Clone)]
pub struct Repository {
    state: Arc<RwLock<LibraryState>>,
}

impl Repository {
    /// Create an empty repository with the given per-member borrow limit
    pub fn new(max_borrows: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(LibraryState {
                catalog: ItemCatalog::new(),
                members: MemberRegistry::new(max_borrows),
                loans: LoanLedger::new(),
            })),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, LibraryState> {
        self.state.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, LibraryState> {
        self.state.write().await
    }
}
