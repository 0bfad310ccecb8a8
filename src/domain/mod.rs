//! Participants and committed expenses.

pub mod expense;
pub mod participant;

pub use expense::{Expense, SplitStrategy};
pub use participant::{Participant, ParticipantId};
