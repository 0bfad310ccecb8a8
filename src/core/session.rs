use tracing::{info, warn};

use crate::config::Config;
use crate::domain::{Expense, Participant, ParticipantId};
use crate::errors::{SplitError, ValidationError};
use crate::ledger::{ExpenseLog, ExpenseRecord, Ledger, LedgerEntry};
use crate::split::{DivisionEngine, PendingExpense, PendingUpdate};

/// Result of a successful commit, ready for rendering.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    pub expense: Expense,
    pub ledger: Vec<LedgerEntry>,
    pub log: Vec<Expense>,
}

/// Owned copy of the whole session state.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub roster: Vec<Participant>,
    pub pending: PendingExpense,
    pub ledger: Ledger,
    pub log: ExpenseLog,
}

/// Facade that owns the roster, balances, expense history, and the expense
/// currently being entered.
#[derive(Debug, Clone)]
pub struct SplitSession {
    config: Config,
    ledger: Ledger,
    log: ExpenseLog,
    pending: PendingExpense,
}

impl Default for SplitSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitSession {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let pending = PendingExpense::fresh(&[], config.default_strategy);
        Self {
            config,
            ledger: Ledger::new(),
            log: ExpenseLog::new(),
            pending,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the configuration. Applies to later edits and form resets;
    /// values already in the pending form are kept.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Adds a participant with a zero balance. Pending edits for everyone
    /// else are kept.
    pub fn add_participant(&mut self, name: impl Into<String>) -> ParticipantId {
        let id = self.ledger.add_participant(name);
        self.pending.participation.push(id);
        info!(participant = %id, roster = self.ledger.len(), "participant added");
        id
    }

    /// Removes a participant that no recorded expense refers to.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<Participant, SplitError> {
        let participant = self
            .ledger
            .participant(id)
            .ok_or(SplitError::ParticipantNotFound(id))?;
        if self.log.references(id) {
            warn!(participant = %id, "refused to remove referenced participant");
            return Err(SplitError::ParticipantReferenced(participant.name.clone()));
        }
        let removed = self.ledger.remove_participant(id)?;
        self.pending.participation.remove(id);
        info!(participant = %id, roster = self.ledger.len(), "participant removed");
        Ok(removed)
    }

    pub fn update_pending(&mut self, update: PendingUpdate) -> Result<&PendingExpense, SplitError> {
        self.pending
            .apply(update, self.ledger.participants(), &self.config)?;
        Ok(&self.pending)
    }

    /// Divides the pending expense, folds it into the ledger, records it, and
    /// resets the form. Nothing changes when validation fails.
    pub fn commit_expense(&mut self) -> Result<CommitOutcome, ValidationError> {
        let division = DivisionEngine::divide(&self.pending).map_err(|err| {
            warn!(%err, "expense rejected");
            err
        })?;

        let expense = Expense::new(
            self.pending.name.trim(),
            self.pending.amount,
            self.pending.strategy,
        );
        self.ledger.apply(&division);
        info!(
            expense = %expense.name,
            total = %expense.total,
            strategy = %expense.strategy,
            residue = %division.rounding_residue,
            "expense committed"
        );
        self.log.append(ExpenseRecord::new(expense.clone(), division));
        self.pending =
            PendingExpense::fresh(self.ledger.participants(), self.config.default_strategy);

        Ok(CommitOutcome {
            expense,
            ledger: self.ledger.entries().to_vec(),
            log: self.log.expenses().cloned().collect(),
        })
    }

    pub fn roster(&self) -> &[Participant] {
        self.ledger.participants()
    }

    pub fn pending(&self) -> &PendingExpense {
        &self.pending
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn log(&self) -> &ExpenseLog {
        &self.log
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            roster: self.roster().to_vec(),
            pending: self.pending.clone(),
            ledger: self.ledger.clone(),
            log: self.log.clone(),
        }
    }
}
