use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::{Participant, ParticipantId, SplitStrategy};
use crate::errors::SplitError;
use crate::money::{clamp_to_max, parse_amount_with, Amount};
use crate::split::participation::Participation;

/// The expense currently being entered, before it is committed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingExpense {
    pub name: String,
    pub amount: Amount,
    pub strategy: SplitStrategy,
    pub participation: Participation,
}

/// A single edit to the pending expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingUpdate {
    SetName(String),
    /// Raw user text, parsed with the configured grouping separator.
    SetAmountText(String),
    /// Increments the current total, as quick-add buttons do.
    AddAmount(Amount),
    SetStrategy(SplitStrategy),
    SetIncluded {
        participant: ParticipantId,
        included: bool,
    },
    SetPayer {
        participant: ParticipantId,
        is_payer: bool,
    },
    SetCustomAmountText {
        participant: ParticipantId,
        text: String,
    },
    /// Discards every edit and starts over from the roster.
    Reset,
}

impl PendingExpense {
    /// Blank form: everyone included, nobody paying, no custom amounts.
    pub fn fresh(participants: &[Participant], strategy: SplitStrategy) -> Self {
        Self {
            name: String::new(),
            amount: Amount::ZERO,
            strategy,
            participation: Participation::from_roster(participants),
        }
    }

    /// Applies one edit. Rejected edits leave the form unchanged.
    pub fn apply(
        &mut self,
        update: PendingUpdate,
        participants: &[Participant],
        config: &Config,
    ) -> Result<(), SplitError> {
        debug!(?update, "pending expense update");
        let locale = config.locale();
        let result = match update {
            PendingUpdate::SetName(name) => {
                self.name = name;
                Ok(())
            }
            PendingUpdate::SetAmountText(text) => {
                let amount = parse_amount_with(&locale, &text);
                self.set_amount(amount, config.max_amount)
            }
            PendingUpdate::AddAmount(increment) => self.add_amount(increment, config.max_amount),
            PendingUpdate::SetStrategy(strategy) => {
                self.strategy = strategy;
                Ok(())
            }
            PendingUpdate::SetIncluded {
                participant,
                included,
            } => self.participation.set_included(participant, included),
            PendingUpdate::SetPayer {
                participant,
                is_payer,
            } => self.participation.set_payer(participant, is_payer),
            PendingUpdate::SetCustomAmountText { participant, text } => {
                let amount = parse_amount_with(&locale, &text);
                self.participation
                    .set_custom_amount(participant, amount, config.max_amount)
            }
            PendingUpdate::Reset => {
                *self = Self::fresh(participants, config.default_strategy);
                Ok(())
            }
        };
        if let Err(err) = &result {
            warn!(%err, "pending expense update rejected");
        }
        result
    }

    fn set_amount(&mut self, amount: Amount, max: Amount) -> Result<(), SplitError> {
        self.amount =
            clamp_to_max(amount, max).ok_or(SplitError::AmountRejected { amount, max })?;
        Ok(())
    }

    fn add_amount(&mut self, increment: Amount, max: Amount) -> Result<(), SplitError> {
        if increment.value() < 0 {
            return Err(SplitError::NegativeAmount(increment));
        }
        let total = self
            .amount
            .checked_add(increment)
            .ok_or(SplitError::AmountRejected {
                amount: increment,
                max,
            })?;
        self.set_amount(total, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Vec<Participant>, PendingExpense, Config) {
        let people = vec![Participant::new("Alex"), Participant::new("Blair")];
        let pending = PendingExpense::fresh(&people, SplitStrategy::Equal);
        (people, pending, Config::default())
    }

    #[test]
    fn amount_text_is_parsed_with_grouping() {
        let (people, mut pending, config) = setup();
        pending
            .apply(
                PendingUpdate::SetAmountText("12,000".into()),
                &people,
                &config,
            )
            .unwrap();
        assert_eq!(pending.amount, Amount::new(12_000));

        pending
            .apply(
                PendingUpdate::SetAmountText("oops".into()),
                &people,
                &config,
            )
            .unwrap();
        assert_eq!(pending.amount, Amount::ZERO);
    }

    #[test]
    fn amount_over_max_is_rejected() {
        let (people, mut pending, config) = setup();
        pending
            .apply(
                PendingUpdate::SetAmountText("5000".into()),
                &people,
                &config,
            )
            .unwrap();

        let err = pending
            .apply(
                PendingUpdate::SetAmountText("100,000,001".into()),
                &people,
                &config,
            )
            .expect_err("over max");

        assert!(matches!(err, SplitError::AmountRejected { .. }));
        assert_eq!(pending.amount, Amount::new(5_000));
    }

    #[test]
    fn add_amount_accumulates_up_to_max() {
        let (people, mut pending, mut config) = setup();
        config.max_amount = Amount::new(15_000);

        pending
            .apply(
                PendingUpdate::AddAmount(Amount::new(10_000)),
                &people,
                &config,
            )
            .unwrap();
        pending
            .apply(
                PendingUpdate::AddAmount(Amount::new(5_000)),
                &people,
                &config,
            )
            .unwrap();
        assert_eq!(pending.amount, Amount::new(15_000));

        assert!(pending
            .apply(PendingUpdate::AddAmount(Amount::new(1)), &people, &config)
            .is_err());
        assert_eq!(pending.amount, Amount::new(15_000));
    }

    #[test]
    fn add_amount_overflow_is_rejected() {
        let (people, mut pending, config) = setup();
        pending
            .apply(PendingUpdate::SetAmountText("1".into()), &people, &config)
            .unwrap();

        let huge = parse_amount_with(&config.locale(), "9223372036854775807");
        let err = pending
            .apply(PendingUpdate::AddAmount(huge), &people, &config)
            .expect_err("overflowing total");

        assert!(matches!(err, SplitError::AmountRejected { .. }));
        assert_eq!(pending.amount, Amount::new(1));
    }

    #[test]
    fn negative_increment_is_rejected() {
        let (people, mut pending, config) = setup();

        let err = pending
            .apply(
                PendingUpdate::AddAmount(Amount::new(-5_000)),
                &people,
                &config,
            )
            .expect_err("negative increment");

        assert!(matches!(err, SplitError::NegativeAmount(amount) if amount == Amount::new(-5_000)));
        assert_eq!(pending.amount, Amount::ZERO);
    }

    #[test]
    fn custom_amount_is_stored_independently_of_inclusion() {
        let (people, mut pending, config) = setup();
        let blair = people[1].id;

        pending
            .apply(
                PendingUpdate::SetIncluded {
                    participant: blair,
                    included: false,
                },
                &people,
                &config,
            )
            .unwrap();
        pending
            .apply(
                PendingUpdate::SetCustomAmountText {
                    participant: blair,
                    text: "1,500".into(),
                },
                &people,
                &config,
            )
            .unwrap();

        let entry = pending.participation.entry(blair).unwrap();
        assert!(!entry.included);
        assert_eq!(entry.custom_amount, Amount::new(1_500));
    }

    #[test]
    fn reset_restores_fresh_form() {
        let (people, mut pending, config) = setup();
        pending
            .apply(PendingUpdate::SetName("Taxi".into()), &people, &config)
            .unwrap();
        pending
            .apply(
                PendingUpdate::SetStrategy(SplitStrategy::Custom),
                &people,
                &config,
            )
            .unwrap();
        pending
            .apply(
                PendingUpdate::SetPayer {
                    participant: people[0].id,
                    is_payer: true,
                },
                &people,
                &config,
            )
            .unwrap();

        pending.apply(PendingUpdate::Reset, &people, &config).unwrap();

        assert_eq!(pending, PendingExpense::fresh(&people, SplitStrategy::Equal));
    }
}
