//! HTTP access to the events service.

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use shared::{
    domain::{EventId, UserId},
    error::{ApiError, ApiException},
    protocol::{ParticipantOperation, UpdateParticipantsRequest},
};

use crate::{config::ClientSettings, error::ClientError};

/// Remote mutations the event details view depends on.
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn update_participants(
        &self,
        event_id: EventId,
        operation: ParticipantOperation,
        participant_ids: Vec<UserId>,
    ) -> Result<(), ClientError>;

    async fn delete_event(&self, event_id: EventId) -> Result<(), ClientError>;
}

pub struct HttpEventsApi {
    http: Client,
    api_base_url: String,
}

impl HttpEventsApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        // Session cookies travel with every request, like a browser fetch
        // with credentials included.
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            api_base_url: settings.api_base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str, event_id: EventId) -> String {
        format!("{}/{path}/{event_id}", self.api_base_url)
    }
}

#[async_trait]
impl EventsApi for HttpEventsApi {
    async fn update_participants(
        &self,
        event_id: EventId,
        operation: ParticipantOperation,
        participant_ids: Vec<UserId>,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .patch(self.endpoint("update_participants", event_id))
            .json(&UpdateParticipantsRequest {
                operation,
                participant_ids,
            })
            .send()
            .await?;
        ensure_success(response).await
    }

    async fn delete_event(&self, event_id: EventId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.endpoint("delete_event", event_id))
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        ensure_success(response).await
    }
}

/// Maps a non-2xx status to `ClientError::Rejected`, keeping the server's
/// `message` when the body carries one.
async fn ensure_success(response: Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.bytes().await?;
    Err(ApiException::new(status.as_u16(), ApiError::from_body(&body)).into())
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
