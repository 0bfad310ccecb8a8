use serde::{Deserialize, Serialize};

use crate::domain::{Participant, ParticipantId};
use crate::errors::SplitError;
use crate::money::Amount;
use crate::split::Division;

/// Running balance of one participant.
///
/// Positive means the participant still has to pay that much into the group;
/// negative means the group owes it to them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    pub participant_id: ParticipantId,
    pub balance: Amount,
}

/// Participants and their accumulated balances.
///
/// Holds exactly one [`LedgerEntry`] per participant, in roster order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    participants: Vec<Participant>,
    entries: Vec<LedgerEntry>,
    /// Sum of the integer-division remainders no participant was charged.
    unallocated: Amount,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            entries: Vec::new(),
            unallocated: Amount::ZERO,
        }
    }

    /// Registers a participant with a zero balance and returns its id.
    pub fn add_participant(&mut self, name: impl Into<String>) -> ParticipantId {
        let participant = Participant::new(name);
        let id = participant.id;
        self.participants.push(participant);
        self.entries.push(LedgerEntry {
            participant_id: id,
            balance: Amount::ZERO,
        });
        id
    }

    /// Drops a participant together with its balance entry.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<Participant, SplitError> {
        let index = self
            .participants
            .iter()
            .position(|participant| participant.id == id)
            .ok_or(SplitError::ParticipantNotFound(id))?;
        self.entries.retain(|entry| entry.participant_id != id);
        let removed = self.participants.remove(index);
        Ok(removed)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|participant| participant.id == id)
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn balance_of(&self, id: ParticipantId) -> Option<Amount> {
        self.entries
            .iter()
            .find(|entry| entry.participant_id == id)
            .map(|entry| entry.balance)
    }

    /// Pairs every participant with its current balance, in roster order.
    pub fn balances(&self) -> impl Iterator<Item = (&Participant, Amount)> + '_ {
        self.participants
            .iter()
            .zip(self.entries.iter())
            .map(|(participant, entry)| {
                debug_assert_eq!(participant.id, entry.participant_id);
                (participant, entry.balance)
            })
    }

    /// Sum of all balances. Zero whenever every split so far divided exactly.
    pub fn total_balance(&self) -> Amount {
        self.entries.iter().map(|entry| entry.balance).sum()
    }

    pub fn unallocated(&self) -> Amount {
        self.unallocated
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Adds the deltas of one division on top of the existing balances.
    ///
    /// Deltas for ids missing from the roster are ignored; the session keeps
    /// the pending snapshot in step with the roster so none arise.
    pub fn apply(&mut self, division: &Division) {
        for entry in &mut self.entries {
            if let Some(delta) = division.delta_for(entry.participant_id) {
                entry.balance += delta;
            }
        }
        self.unallocated += division.rounding_residue;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::ShareDelta;

    #[test]
    fn new_participants_start_at_zero() {
        let mut ledger = Ledger::new();
        let alex = ledger.add_participant("Alex");
        let blair = ledger.add_participant("Alex");

        assert_ne!(alex, blair);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.balance_of(alex), Some(Amount::ZERO));
        assert_eq!(ledger.entries().len(), ledger.participants().len());
    }

    #[test]
    fn remove_drops_entry_and_rejects_unknown_ids() {
        let mut ledger = Ledger::new();
        let alex = ledger.add_participant("Alex");
        let blair = ledger.add_participant("Blair");

        let removed = ledger.remove_participant(alex).expect("remove alex");
        assert_eq!(removed.name, "Alex");
        assert_eq!(ledger.participants().len(), 1);
        assert_eq!(ledger.entries()[0].participant_id, blair);

        let err = ledger.remove_participant(alex).expect_err("already removed");
        assert!(matches!(err, SplitError::ParticipantNotFound(id) if id == alex));
    }

    #[test]
    fn apply_accumulates_deltas() {
        let mut ledger = Ledger::new();
        let alex = ledger.add_participant("Alex");
        let blair = ledger.add_participant("Blair");
        let division = Division {
            deltas: vec![
                ShareDelta {
                    participant_id: alex,
                    amount: Amount::new(-500),
                },
                ShareDelta {
                    participant_id: blair,
                    amount: Amount::new(500),
                },
            ],
            rounding_residue: Amount::ZERO,
        };

        ledger.apply(&division);
        ledger.apply(&division);

        assert_eq!(ledger.balance_of(alex), Some(Amount::new(-1_000)));
        assert_eq!(ledger.balance_of(blair), Some(Amount::new(1_000)));
        assert_eq!(ledger.total_balance(), Amount::ZERO);
    }
}
