#![doc(test(attr(deny(warnings))))]

//! Split Core divides shared expenses among a small group and keeps each
//! participant's running balance: who owes money and who is owed.
//!
//! ```
//! use split_core::{split::PendingUpdate, SplitSession};
//!
//! let mut session = SplitSession::new();
//! let alex = session.add_participant("Alex");
//! let blair = session.add_participant("Blair");
//!
//! session.update_pending(PendingUpdate::SetName("Lunch".into())).unwrap();
//! session.update_pending(PendingUpdate::SetAmountText("9,000".into())).unwrap();
//! session
//!     .update_pending(PendingUpdate::SetPayer { participant: alex, is_payer: true })
//!     .unwrap();
//! session.commit_expense().unwrap();
//!
//! assert_eq!(session.ledger().balance_of(blair).unwrap().value(), 4_500);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod money;
pub mod split;
pub mod utils;

pub use crate::core::{CommitOutcome, SharedSession, SplitSession};
pub use errors::{SplitError, ValidationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Split Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
