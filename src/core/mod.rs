//! Session state shared by every caller of the split engine.

pub mod session;
pub mod shared;

pub use session::{CommitOutcome, SessionSnapshot, SplitSession};
pub use shared::SharedSession;
