use thiserror::Error;
use uuid::Uuid;

use crate::money::Amount;

/// Reasons a pending expense cannot be committed.
///
/// Variants are listed in the order the checks run; the first failing check
/// is the one reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a name for the expense")]
    MissingName,
    #[error("Enter an amount for the expense")]
    MissingAmount,
    #[error("Select who paid for the expense")]
    NoPayerSelected,
    #[error("No participant is left to split the remaining amount")]
    NoEqualSplitTargets,
}

/// Error type covering roster, pending-expense, and configuration failures.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Participant not found: {0}")]
    ParticipantNotFound(Uuid),
    #[error("Participant `{0}` appears in recorded expenses and cannot be removed")]
    ParticipantReferenced(String),
    #[error("Amount {amount} exceeds the maximum of {max}")]
    AmountRejected { amount: Amount, max: Amount },
    #[error("Amount {0} is negative")]
    NegativeAmount(Amount),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Session state is unavailable")]
    SessionUnavailable,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
