use shared::error::ApiException;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Event not found")]
    MissingEvent,
    #[error("only the event owner may do this")]
    NotOwner,
    #[error(transparent)]
    Rejected(#[from] ApiException),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Server-supplied message for a rejected request, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected(exc) => exc.message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Rejected(exc) => Some(exc.status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
