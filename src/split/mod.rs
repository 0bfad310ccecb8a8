//! Expense division: the per-expense participation snapshot, the pending
//! expense form, and the engine that turns them into balance deltas.

pub mod engine;
pub mod participation;
pub mod pending;

pub use engine::{Division, DivisionEngine, ShareDelta};
pub use participation::{Participation, ParticipationEntry};
pub use pending::{PendingExpense, PendingUpdate};
