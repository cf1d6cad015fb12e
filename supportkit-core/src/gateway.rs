//! The capability used to hand a record to storage.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::FeedbackRecord;

/// Failure reported by a gateway.
///
/// Callers only ever show the message, so transport, encoding and backend
/// rejections all collapse into this one type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Sends one record to a backing store.
///
/// Implementations make exactly one write attempt per call and never retry.
/// The record arrives fully formed; gateways do not validate it.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, record: FeedbackRecord) -> Result<(), GatewayError>;
}

#[derive(Debug, Default)]
struct MemoryStore {
    documents: HashMap<Uuid, FeedbackRecord>,
    calls: usize,
    failure: Option<String>,
}

/// In-process gateway keyed by record id.
///
/// Writing a record whose id is already stored replaces the earlier copy,
/// the same way a document store treats a repeated document id.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    store: Mutex<MemoryStore>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let gateway = Self::default();
        gateway.set_failure(Some(message.into()));
        gateway
    }

    pub fn set_failure(&self, message: Option<String>) {
        self.lock().failure = message;
    }

    /// Number of `submit` calls received, successful or not.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    pub fn get(&self, id: Uuid) -> Option<FeedbackRecord> {
        self.lock().documents.get(&id).cloned()
    }

    pub fn records(&self) -> Vec<FeedbackRecord> {
        let mut records: Vec<_> = self.lock().documents.values().cloned().collect();
        records.sort_by_key(|record| record.created_at());
        records
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SubmissionGateway for MemoryGateway {
    async fn submit(&self, record: FeedbackRecord) -> Result<(), GatewayError> {
        let mut store = self.lock();
        store.calls += 1;

        if let Some(message) = &store.failure {
            tracing::debug!(record_id = %record.id(), "memory gateway rejecting record");
            return Err(GatewayError::new(message.clone()));
        }

        store.documents.insert(record.id(), record);
        Ok(())
    }
}
