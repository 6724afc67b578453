//! Data models for Biblion

pub mod item;
pub mod loan;
pub mod member;
pub mod transaction;

// Re-export commonly used types
pub use item::{Category, ItemDetails, LibraryItem};
pub use loan::{BorrowRecord, LoanDetails, OverdueLoan};
pub use member::Member;
pub use transaction::{Transaction, TransactionKind};
