//! Reqwest-backed Firestore provider.
//!
//! Each record becomes one document in the configured collection, named by
//! the record id. The write is a `PATCH` on the document path, which creates
//! or replaces it, so resending a record lands on the same document.

mod document;
mod settings;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use supportkit_core::{FeedbackRecord, GatewayError, SubmissionGateway};

pub use document::{Document, Value};
pub use settings::{ConfigError, FirestoreSettings};

use document::ErrorEnvelope;

pub struct FirestoreGateway {
    client: Client,
    settings: FirestoreSettings,
}

impl FirestoreGateway {
    /// Builds a gateway whose HTTP client times out after
    /// `settings.timeout_secs`.
    pub fn new(settings: FirestoreSettings) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| GatewayError::new(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &FirestoreSettings {
        &self.settings
    }
}

#[async_trait]
impl SubmissionGateway for FirestoreGateway {
    async fn submit(&self, record: FeedbackRecord) -> Result<(), GatewayError> {
        let url = self.settings.document_url(record.id());
        let mut request = self.client.patch(&url).json(&Document::from(&record));

        if let Some(key) = &self.settings.api_key {
            request = request.query(&[("key", key)]);
        }
        if let Some(token) = &self.settings.bearer_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(record_id = %record.id(), %url, "writing Firestore document");
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::new(format!("Firestore request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::new(format!("Firestore request failed: {e}")))?;
        Err(map_status_error(status, &body))
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            GatewayError::new(envelope.error.message)
        }
        Ok(ErrorEnvelope { error }) if error.status.is_some() => GatewayError::new(format!(
            "Firestore rejected the document: {}",
            error.status.unwrap_or_default()
        )),
        _ => GatewayError::new(format!("Firestore rejected the document: HTTP {status}")),
    }
}
