//! Computes how one expense changes each participant's balance.
//!
//! Everything here is a pure function of the pending expense. The session
//! folds the resulting [`Division`] into the ledger only after it has been
//! computed in full, so a rejected expense never leaves partial updates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{ParticipantId, SplitStrategy};
use crate::errors::ValidationError;
use crate::money::Amount;
use crate::split::participation::ParticipationEntry;
use crate::split::pending::PendingExpense;

/// Balance change for one participant caused by one expense.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareDelta {
    pub participant_id: ParticipantId,
    pub amount: Amount,
}

/// Outcome of dividing one expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    /// One delta per affected participant, in roster order.
    pub deltas: Vec<ShareDelta>,
    /// Negated sum of `deltas`: the part of the total lost to integer division.
    pub rounding_residue: Amount,
}

impl Division {
    fn from_deltas(deltas: Vec<ShareDelta>) -> Self {
        let allocated: Amount = deltas.iter().map(|delta| delta.amount).sum();
        Self {
            deltas,
            rounding_residue: -allocated,
        }
    }

    pub fn delta_for(&self, id: ParticipantId) -> Option<Amount> {
        self.deltas
            .iter()
            .find(|delta| delta.participant_id == id)
            .map(|delta| delta.amount)
    }
}

/// Entry points for validating and dividing expenses.
pub struct DivisionEngine;

impl DivisionEngine {
    /// Checks the pending expense in reporting order: name, amount, payer.
    pub fn validate(pending: &PendingExpense) -> Result<(), ValidationError> {
        if pending.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !pending.amount.is_positive() {
            return Err(ValidationError::MissingAmount);
        }
        if pending.participation.payer_count() != 1 {
            return Err(ValidationError::NoPayerSelected);
        }
        Ok(())
    }

    /// Validates and divides the pending expense.
    pub fn divide(pending: &PendingExpense) -> Result<Division, ValidationError> {
        Self::validate(pending)?;
        Self::divide_entries(
            pending.amount,
            pending.strategy,
            pending.participation.entries(),
        )
    }

    /// Divides `total` across `entries`, which must contain exactly one payer.
    pub fn divide_entries(
        total: Amount,
        strategy: SplitStrategy,
        entries: &[ParticipationEntry],
    ) -> Result<Division, ValidationError> {
        let mut payers = entries.iter().filter(|entry| entry.is_payer);
        let payer = match (payers.next(), payers.next()) {
            (Some(payer), None) => payer,
            _ => return Err(ValidationError::NoPayerSelected),
        };

        let deltas = match strategy {
            SplitStrategy::Equal => divide_equally(total, payer, entries)?,
            SplitStrategy::Custom => divide_custom(total, entries)?,
        };
        let division = Division::from_deltas(deltas);
        debug!(
            %total,
            %strategy,
            affected = division.deltas.len(),
            residue = %division.rounding_residue,
            "expense divided"
        );
        Ok(division)
    }
}

fn divide_equally(
    total: Amount,
    payer: &ParticipationEntry,
    entries: &[ParticipationEntry],
) -> Result<Vec<ShareDelta>, ValidationError> {
    let others = entries
        .iter()
        .filter(|entry| entry.included && !entry.is_payer)
        .count();
    let divisor = others + usize::from(payer.included);
    let share = total
        .split_evenly(divisor)
        .ok_or(ValidationError::NoEqualSplitTargets)?;

    Ok(entries
        .iter()
        .filter_map(|entry| {
            let amount = if entry.is_payer {
                let own_share = if entry.included { share } else { Amount::ZERO };
                own_share - total
            } else if entry.included {
                share
            } else {
                return None;
            };
            Some(ShareDelta {
                participant_id: entry.participant_id,
                amount,
            })
        })
        .collect())
}

fn divide_custom(
    total: Amount,
    entries: &[ParticipationEntry],
) -> Result<Vec<ShareDelta>, ValidationError> {
    let has_custom =
        |entry: &ParticipationEntry| entry.included && entry.custom_amount.is_positive();

    let fixed: Amount = entries
        .iter()
        .filter(|entry| has_custom(entry))
        .map(|entry| entry.custom_amount)
        .sum();
    let remaining = total - fixed;
    let equal_group = entries
        .iter()
        .filter(|entry| !has_custom(entry) && entry.included)
        .count();
    let share = remaining
        .split_evenly(equal_group)
        .ok_or(ValidationError::NoEqualSplitTargets)?;

    Ok(entries
        .iter()
        .filter_map(|entry| {
            let amount = if has_custom(entry) {
                if entry.is_payer {
                    entry.custom_amount - total
                } else {
                    entry.custom_amount
                }
            } else {
                match (entry.is_payer, entry.included) {
                    (true, true) => share - total,
                    (true, false) => -total,
                    (false, true) => share,
                    (false, false) => return None,
                }
            };
            Some(ShareDelta {
                participant_id: entry.participant_id,
                amount,
            })
        })
        .collect())
}
