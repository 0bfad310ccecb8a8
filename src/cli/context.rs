use std::io;

use strsim::levenshtein;
use thiserror::Error;

use crate::cli::commands;
use crate::cli::output;
use crate::cli::registry::CommandRegistry;
use crate::config::ConfigManager;
use crate::core::SplitSession;
use crate::domain::ParticipantId;
use crate::errors::{SplitError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] SplitError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Failures of a single command. Reported, then the shell carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Core(#[from] SplitError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// State shared by every command handler of one shell run.
pub struct ShellContext {
    pub(crate) running: bool,
    session: SplitSession,
    config_manager: ConfigManager,
    registry: CommandRegistry,
}

impl ShellContext {
    pub fn new() -> Result<Self, CliError> {
        Self::with_config_manager(ConfigManager::new()?)
    }

    pub fn with_config_manager(config_manager: ConfigManager) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        Ok(Self {
            running: true,
            session: SplitSession::with_config(config),
            config_manager,
            registry: commands::build_registry(),
        })
    }

    pub fn session(&self) -> &SplitSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SplitSession {
        &mut self.session
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    pub(crate) fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        let pending = self.session.pending();
        if pending.name.trim().is_empty() {
            format!("split({})> ", self.session.roster().len())
        } else {
            format!("split({}:{})> ", self.session.roster().len(), pending.name.trim())
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Validation(err) => {
                output::error(err);
                output::hint(validation_hint(err));
            }
            CommandError::Core(err) => output::error(err),
        }
    }

    /// Resolves a 1-based roster position, falling back to a case-insensitive
    /// name so participants named like numbers stay reachable.
    pub(crate) fn resolve_participant(&self, token: &str) -> Result<ParticipantId, CommandError> {
        let roster = self.session.roster();
        let by_position = token
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| roster.get(index));
        if let Some(participant) = by_position {
            return Ok(participant.id);
        }
        roster
            .iter()
            .find(|participant| participant.name.eq_ignore_ascii_case(token))
            .map(|participant| participant.id)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "no participant named `{}` or at that position (roster has {})",
                    token,
                    roster.len()
                ))
            })
    }
}

fn validation_hint(err: ValidationError) -> &'static str {
    match err {
        ValidationError::MissingName => "Try `name Lunch`.",
        ValidationError::MissingAmount => "Try `amount 12,000`.",
        ValidationError::NoPayerSelected => "Try `payer 1`.",
        ValidationError::NoEqualSplitTargets => {
            "Include someone without a custom amount, or switch to `strategy equal`."
        }
    }
}
