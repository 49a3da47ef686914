use serde::{Deserialize, Serialize};

use crate::domain::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantOperation {
    Add,
    Remove,
}

impl ParticipantOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            ParticipantOperation::Add => "add",
            ParticipantOperation::Remove => "remove",
        }
    }
}

/// Body of `PATCH /update_participants/{event_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateParticipantsRequest {
    pub operation: ParticipantOperation,
    pub participant_ids: Vec<UserId>,
}

impl UpdateParticipantsRequest {
    pub fn single(operation: ParticipantOperation, user_id: UserId) -> Self {
        Self {
            operation,
            participant_ids: vec![user_id],
        }
    }
}
