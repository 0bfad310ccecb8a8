//! Roster, running balances, and the history of committed expenses.

pub mod expense_log;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use expense_log::{ExpenseLog, ExpenseRecord};
pub use ledger::{Ledger, LedgerEntry};
