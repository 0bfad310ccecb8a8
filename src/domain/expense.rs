use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Amount;

/// How an expense total is divided among participants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitStrategy {
    /// Everyone included pays the same share.
    #[default]
    Equal,
    /// Fixed amounts for some, the rest split evenly among the others.
    Custom,
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SplitStrategy::Equal => "Equal",
            SplitStrategy::Custom => "Custom",
        };
        f.pad(label)
    }
}

impl FromStr for SplitStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "equal" | "even" => Ok(SplitStrategy::Equal),
            "custom" => Ok(SplitStrategy::Custom),
            other => Err(format!("unknown split strategy `{other}` (use equal or custom)")),
        }
    }
}

/// A committed expense. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub total: Amount,
    pub strategy: SplitStrategy,
    pub recorded_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(name: impl Into<String>, total: Amount, strategy: SplitStrategy) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            total,
            strategy,
            recorded_at: Utc::now(),
        }
    }
}
