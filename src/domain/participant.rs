use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier assigned to a participant when it is created.
pub type ParticipantId = Uuid;

/// A person taking part in shared expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    /// Creates a participant with a freshly generated identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
