use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(EventId);
id_newtype!(UserId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
}

/// An event as delivered by the listing API.
///
/// `participant_count` is a cached length that may arrive before the roster
/// itself; once `participants` is known the two are kept equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub event_title: String,
    #[serde(default)]
    pub event_description: String,
    #[serde(default)]
    pub event_location: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub event_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<Participant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<u64>,
}

impl Event {
    pub fn has_participant(&self, user_id: UserId) -> bool {
        self.participants
            .as_deref()
            .is_some_and(|list| list.iter().any(|p| p.id == user_id))
    }

    /// Count shown next to the roster heading. A non-zero cached count wins,
    /// then the roster length, then zero.
    pub fn displayed_participant_count(&self) -> u64 {
        match (self.participant_count, self.participants.as_ref()) {
            (Some(count), _) if count > 0 => count,
            (_, Some(list)) => list.len() as u64,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub user_name: String,
    pub user_surname: String,
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.user_name, self.user_surname)
    }

    pub fn as_participant(&self) -> Participant {
        Participant {
            id: self.id,
            name: Some(self.display_name()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }

    /// The user record, only when the session is actually authenticated.
    pub fn authenticated_user(&self) -> Option<&SessionUser> {
        if self.is_authenticated {
            self.user.as_ref()
        } else {
            None
        }
    }
}
