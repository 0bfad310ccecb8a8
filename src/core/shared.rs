use std::sync::{Arc, Mutex};

use crate::core::session::{CommitOutcome, SessionSnapshot, SplitSession};
use crate::domain::{Participant, ParticipantId};
use crate::errors::SplitError;
use crate::split::{PendingExpense, PendingUpdate};

/// Cloneable handle to a [`SplitSession`] for callers on other threads.
///
/// Every call holds the session lock for its whole duration, so commits are
/// serialized and observers only ever see fully applied expenses.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<SplitSession>>,
}

impl SharedSession {
    pub fn new(session: SplitSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn add_participant(&self, name: impl Into<String>) -> Result<ParticipantId, SplitError> {
        self.with(|session| session.add_participant(name))
    }

    pub fn remove_participant(&self, id: ParticipantId) -> Result<Participant, SplitError> {
        self.with(|session| session.remove_participant(id))?
    }

    pub fn update_pending(&self, update: PendingUpdate) -> Result<PendingExpense, SplitError> {
        self.with(|session| session.update_pending(update).cloned())?
    }

    pub fn commit_expense(&self) -> Result<CommitOutcome, SplitError> {
        Ok(self.with(SplitSession::commit_expense)??)
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, SplitError> {
        self.with(|session| session.snapshot())
    }

    fn with<R>(&self, f: impl FnOnce(&mut SplitSession) -> R) -> Result<R, SplitError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| SplitError::SessionUnavailable)?;
        Ok(f(&mut *guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;

    #[test]
    fn clones_share_the_same_session() {
        let shared = SharedSession::default();
        let other = shared.clone();

        let id = shared.add_participant("Alex").unwrap();
        let snapshot = other.snapshot().unwrap();

        assert_eq!(snapshot.roster.len(), 1);
        assert_eq!(snapshot.roster[0].id, id);
        assert!(snapshot.pending.participation.entry(id).is_some());
    }

    #[test]
    fn validation_errors_pass_through() {
        let shared = SharedSession::default();
        shared.add_participant("Alex").unwrap();

        let err = shared.commit_expense().expect_err("blank form");
        assert!(matches!(
            err,
            SplitError::Validation(ValidationError::MissingName)
        ));
    }
}
