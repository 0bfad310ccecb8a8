use serde::{Deserialize, Serialize};

use crate::domain::{Expense, ParticipantId};
use crate::money::Amount;
use crate::split::{Division, ShareDelta};

/// A committed expense together with the balance changes it produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub expense: Expense,
    pub deltas: Vec<ShareDelta>,
    pub rounding_residue: Amount,
}

impl ExpenseRecord {
    pub fn new(expense: Expense, division: Division) -> Self {
        Self {
            expense,
            deltas: division.deltas,
            rounding_residue: division.rounding_residue,
        }
    }

    pub fn delta_for(&self, id: ParticipantId) -> Option<Amount> {
        self.deltas
            .iter()
            .find(|delta| delta.participant_id == id)
            .map(|delta| delta.amount)
    }
}

/// Append-only history of committed expenses, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseLog {
    records: Vec<ExpenseRecord>,
}

impl ExpenseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: ExpenseRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn expenses(&self) -> impl Iterator<Item = &Expense> + '_ {
        self.records.iter().map(|record| &record.expense)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when any recorded expense changed the participant's balance.
    pub fn references(&self, id: ParticipantId) -> bool {
        self.records
            .iter()
            .any(|record| record.delta_for(id).is_some())
    }

    pub fn total_spent(&self) -> Amount {
        self.records.iter().map(|record| record.expense.total).sum()
    }
}
