use serde::{Deserialize, Serialize};

use crate::domain::{Participant, ParticipantId};
use crate::errors::SplitError;
use crate::money::{clamp_to_max, Amount};

/// One participant's role in the expense being entered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipationEntry {
    pub participant_id: ParticipantId,
    /// Counted in the even split.
    pub included: bool,
    /// Fronted the money for this expense.
    pub is_payer: bool,
    /// Fixed contribution, only consulted by the custom strategy.
    pub custom_amount: Amount,
}

impl ParticipationEntry {
    /// Included, not paying, no custom amount.
    pub fn fresh(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            included: true,
            is_payer: false,
            custom_amount: Amount::ZERO,
        }
    }
}

/// Per-expense participation data, one entry per roster participant.
///
/// At most one entry is marked as payer at any time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participation {
    entries: Vec<ParticipationEntry>,
}

impl Participation {
    pub fn from_roster(participants: &[Participant]) -> Self {
        Self {
            entries: participants
                .iter()
                .map(|participant| ParticipationEntry::fresh(participant.id))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[ParticipationEntry] {
        &self.entries
    }

    pub fn entry(&self, id: ParticipantId) -> Option<&ParticipationEntry> {
        self.entries.iter().find(|entry| entry.participant_id == id)
    }

    pub fn payer(&self) -> Option<&ParticipationEntry> {
        self.entries.iter().find(|entry| entry.is_payer)
    }

    pub fn payer_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_payer).count()
    }

    pub fn set_included(&mut self, id: ParticipantId, included: bool) -> Result<(), SplitError> {
        self.entry_mut(id)?.included = included;
        Ok(())
    }

    /// Marks or unmarks the payer.
    ///
    /// A new payer clears the flag on every other entry and is always
    /// included. Unmarking leaves the expense without a payer.
    pub fn set_payer(&mut self, id: ParticipantId, is_payer: bool) -> Result<(), SplitError> {
        if !is_payer {
            self.entry_mut(id)?.is_payer = false;
            return Ok(());
        }
        self.ensure_known(id)?;
        for entry in &mut self.entries {
            if entry.participant_id == id {
                entry.is_payer = true;
                entry.included = true;
            } else {
                entry.is_payer = false;
            }
        }
        Ok(())
    }

    /// Stores a custom amount, leaving the entry untouched when it is negative
    /// or exceeds `max`.
    pub fn set_custom_amount(
        &mut self,
        id: ParticipantId,
        amount: Amount,
        max: Amount,
    ) -> Result<(), SplitError> {
        let entry = self.entry_mut(id)?;
        if amount.value() < 0 {
            return Err(SplitError::NegativeAmount(amount));
        }
        let accepted =
            clamp_to_max(amount, max).ok_or(SplitError::AmountRejected { amount, max })?;
        entry.custom_amount = accepted;
        Ok(())
    }

    /// Adds a default entry for a participant joining the roster.
    pub fn push(&mut self, id: ParticipantId) {
        if self.entry(id).is_none() {
            self.entries.push(ParticipationEntry::fresh(id));
        }
    }

    pub fn remove(&mut self, id: ParticipantId) {
        self.entries.retain(|entry| entry.participant_id != id);
    }

    fn ensure_known(&self, id: ParticipantId) -> Result<(), SplitError> {
        self.entry(id)
            .map(|_| ())
            .ok_or(SplitError::ParticipantNotFound(id))
    }

    fn entry_mut(&mut self, id: ParticipantId) -> Result<&mut ParticipationEntry, SplitError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.participant_id == id)
            .ok_or(SplitError::ParticipantNotFound(id))
    }
}
