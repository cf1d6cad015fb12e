//! Entry point an application holds on to.
//!
//! A `SupportKit` is built with its gateway and style configuration passed
//! in. Nothing is stored in process-wide state, so two kits with different
//! backends can live side by side.

use std::sync::Arc;

use supportkit_core::{
    validate, FeedbackKind, FeedbackRecord, SubmissionGateway, SupportConfiguration, SupportError,
};
use uuid::Uuid;

use crate::controller::SubmissionController;

#[derive(Clone, Default)]
pub struct SupportKit {
    gateway: Option<Arc<dyn SubmissionGateway>>,
    configuration: SupportConfiguration,
}

impl SupportKit {
    pub fn new(gateway: Arc<dyn SubmissionGateway>) -> Self {
        Self {
            gateway: Some(gateway),
            configuration: SupportConfiguration::default(),
        }
    }

    /// A kit without a gateway. Submissions report `NotConfigured`.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn with_configuration(mut self, configuration: SupportConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    pub fn configuration(&self) -> &SupportConfiguration {
        &self.configuration
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_some()
    }

    /// A fresh form controller sharing this kit's gateway and style.
    pub fn controller(&self) -> SubmissionController {
        SubmissionController::with_gateway(self.gateway.clone(), self.configuration.clone())
    }

    /// Sends one record without going through a form.
    ///
    /// Applies the same validation and trimming as the form path and makes a
    /// single gateway call. Returns the id of the stored record.
    pub async fn submit_feedback(
        &self,
        email: &str,
        kind: FeedbackKind,
        description: &str,
    ) -> Result<Uuid, SupportError> {
        let gateway = self.gateway.as_ref().ok_or(SupportError::NotConfigured)?;
        validate(email, description)?;

        let record = FeedbackRecord::new(email.trim(), kind, description.trim());
        let record_id = record.id();

        tracing::info!(%record_id, kind = kind.as_str(), "submitting feedback");
        gateway.submit(record).await.map_err(|e| {
            tracing::warn!(%record_id, error = %e, "feedback submission failed");
            SupportError::Submission(e)
        })?;

        Ok(record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supportkit_core::{MemoryGateway, ValidationError};

    #[tokio::test]
    async fn unconfigured_kit_reports_not_configured() {
        let kit = SupportKit::unconfigured();
        let err = kit
            .submit_feedback("a@b.com", FeedbackKind::Bug, "crash")
            .await
            .unwrap_err();

        assert!(!kit.is_configured());
        assert!(matches!(err, SupportError::NotConfigured));
    }

    #[tokio::test]
    async fn submits_trimmed_record() {
        let gateway = Arc::new(MemoryGateway::new());
        let kit = SupportKit::new(gateway.clone());

        let id = kit
            .submit_feedback(" a@b.com ", FeedbackKind::Suggestion, " more themes ")
            .await
            .unwrap();

        let stored = gateway.get(id).unwrap();
        assert_eq!(stored.email(), "a@b.com");
        assert_eq!(stored.description(), "more themes");
        assert_eq!(stored.kind(), FeedbackKind::Suggestion);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_gateway() {
        let gateway = Arc::new(MemoryGateway::new());
        let kit = SupportKit::new(gateway.clone());

        let err = kit
            .submit_feedback("not-an-email", FeedbackKind::Bug, "x")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SupportError::Validation(ValidationError::MalformedEmail)
        ));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn gateway_failure_is_passed_through() {
        let kit = SupportKit::new(Arc::new(MemoryGateway::failing("quota exceeded")));

        let err = kit
            .submit_feedback("a@b.com", FeedbackKind::Bug, "crash")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn controller_inherits_configuration() {
        let kit = SupportKit::unconfigured().with_configuration(SupportConfiguration::brand());
        let controller = kit.controller();

        assert_eq!(controller.style().title, "Contact Us");
    }
}
