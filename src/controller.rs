//! Tokio-driven owner of one feedback form.
//!
//! All state changes go through [`reduce`] inside the watch channel's
//! `send_if_modified`, so checking for an in-flight submission and moving to
//! `Submitting` happen under one lock. The gateway call runs on a spawned
//! task that only holds a weak reference to the state; once the controller
//! is dropped a late result is discarded instead of written.

use std::sync::{Arc, Weak};

use supportkit_core::{
    reduce, FeedbackKind, FeedbackRecord, FormEvent, FormState, GatewayError, SubmissionGateway,
    SubmissionStatus, SubmitBlocked, SupportConfiguration, SupportError, ValidationError,
};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// How a spawned submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded,
    Failed(GatewayError),
    /// The controller was gone by the time the gateway answered.
    Discarded,
}

/// Handle to a submission started by [`SubmissionController::request_submit`].
///
/// Dropping the ticket does not cancel anything.
#[derive(Debug)]
pub struct SubmissionTicket {
    record_id: Uuid,
    handle: JoinHandle<SubmissionOutcome>,
}

impl SubmissionTicket {
    pub fn record_id(&self) -> Uuid {
        self.record_id
    }

    /// Waits for the gateway call and the resulting state change.
    pub async fn finished(self) -> SubmissionOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => SubmissionOutcome::Failed(GatewayError::new(format!(
                "submission task ended unexpectedly: {e}"
            ))),
        }
    }
}

enum Begin {
    Started(Handle, Arc<dyn SubmissionGateway>, FeedbackRecord),
    InFlight,
    Invalid(ValidationError),
    Unavailable(SupportError),
}

pub struct SubmissionController {
    state: Arc<watch::Sender<FormState>>,
    gateway: Option<Arc<dyn SubmissionGateway>>,
    style: SupportConfiguration,
}

impl SubmissionController {
    pub fn new(gateway: Arc<dyn SubmissionGateway>, style: SupportConfiguration) -> Self {
        Self::with_gateway(Some(gateway), style)
    }

    /// A controller with nothing to submit to. Every valid submit request
    /// ends in `Failed` with the not-configured message.
    pub fn unconfigured(style: SupportConfiguration) -> Self {
        Self::with_gateway(None, style)
    }

    pub(crate) fn with_gateway(
        gateway: Option<Arc<dyn SubmissionGateway>>,
        style: SupportConfiguration,
    ) -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self {
            state: Arc::new(state),
            gateway,
            style,
        }
    }

    pub fn style(&self) -> &SupportConfiguration {
        &self.style
    }

    /// Snapshot of the whole form.
    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// Receives every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    pub fn email(&self) -> String {
        self.state.borrow().email.clone()
    }

    pub fn kind(&self) -> FeedbackKind {
        self.state.borrow().kind
    }

    pub fn description(&self) -> String {
        self.state.borrow().description.clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state.borrow().status.clone()
    }

    pub fn is_valid(&self) -> bool {
        self.state.borrow().is_valid()
    }

    pub fn set_email(&self, email: impl Into<String>) {
        apply(&self.state, FormEvent::EmailChanged(email.into()));
    }

    pub fn set_kind(&self, kind: FeedbackKind) {
        apply(&self.state, FormEvent::KindChanged(kind));
    }

    pub fn set_description(&self, description: impl Into<String>) {
        apply(&self.state, FormEvent::DescriptionChanged(description.into()));
    }

    /// Dismisses a `Failed` or `Succeeded` notice.
    pub fn acknowledge(&self) {
        apply(&self.state, FormEvent::Acknowledged);
    }

    /// Starts a submission of the current fields.
    ///
    /// Returns `Ok(None)` when a submission is already in flight. Invalid
    /// fields leave the state untouched and return the validation error.
    /// Without a gateway, or when called outside a Tokio runtime, the status
    /// moves straight to `Failed` and `NotConfigured` or `NoRuntime` is
    /// returned.
    pub fn request_submit(&self) -> Result<Option<SubmissionTicket>, SupportError> {
        let runtime = Handle::try_current().ok();
        let mut begin = Begin::InFlight;

        self.state.send_if_modified(|current| {
            begin = match (current.prepare_record(), &self.gateway, &runtime) {
                (Err(SubmitBlocked::Invalid(e)), _, _) => Begin::Invalid(e),
                (Err(SubmitBlocked::InFlight), _, _) => Begin::InFlight,
                (Ok(_), None, _) => Begin::Unavailable(SupportError::NotConfigured),
                (Ok(_), Some(_), None) => Begin::Unavailable(SupportError::NoRuntime),
                (Ok(record), Some(gateway), Some(runtime)) => {
                    Begin::Started(runtime.clone(), Arc::clone(gateway), record)
                }
            };

            match &begin {
                Begin::Started(..) => {
                    *current = reduce(current.clone(), FormEvent::SubmissionStarted);
                    true
                }
                Begin::Unavailable(e) => {
                    let started = reduce(current.clone(), FormEvent::SubmissionStarted);
                    *current = reduce(started, FormEvent::SubmissionFailed(e.to_string()));
                    true
                }
                Begin::InFlight | Begin::Invalid(_) => false,
            }
        });

        match begin {
            Begin::Started(runtime, gateway, record) => {
                Ok(Some(self.spawn_submission(&runtime, gateway, record)))
            }
            Begin::InFlight => {
                tracing::debug!("submit ignored, a submission is already in flight");
                Ok(None)
            }
            Begin::Invalid(e) => {
                tracing::debug!(error = %e, "submit rejected by validation");
                Err(e.into())
            }
            Begin::Unavailable(e) => {
                tracing::warn!(error = %e, "submission could not start");
                Err(e)
            }
        }
    }

    fn spawn_submission(
        &self,
        runtime: &Handle,
        gateway: Arc<dyn SubmissionGateway>,
        record: FeedbackRecord,
    ) -> SubmissionTicket {
        let record_id = record.id();
        let state = Arc::downgrade(&self.state);

        tracing::info!(%record_id, kind = record.kind().as_str(), "submitting feedback");

        // The gateway call gets its own task so a panicking provider still
        // resolves the form instead of leaving it in `Submitting`.
        let call = runtime.spawn(async move { gateway.submit(record).await });
        let handle = runtime.spawn(async move {
            let result = match call.await {
                Ok(result) => result,
                Err(e) => Err(GatewayError::new(format!("submission task failed: {e}"))),
            };
            resolve(&state, record_id, result)
        });

        SubmissionTicket { record_id, handle }
    }
}

fn resolve(
    state: &Weak<watch::Sender<FormState>>,
    record_id: Uuid,
    result: Result<(), GatewayError>,
) -> SubmissionOutcome {
    let Some(state) = state.upgrade() else {
        tracing::debug!(
            %record_id,
            "controller dropped before submission resolved, discarding result"
        );
        return SubmissionOutcome::Discarded;
    };

    match result {
        Ok(()) => {
            tracing::info!(%record_id, "feedback submitted");
            apply(&state, FormEvent::SubmissionSucceeded);
            SubmissionOutcome::Succeeded
        }
        Err(e) => {
            tracing::warn!(%record_id, error = %e, "feedback submission failed");
            apply(&state, FormEvent::SubmissionFailed(e.to_string()));
            SubmissionOutcome::Failed(e)
        }
    }
}

fn apply(state: &watch::Sender<FormState>, event: FormEvent) -> bool {
    state.send_if_modified(|current| {
        let next = reduce(current.clone(), event);
        if next == *current {
            return false;
        }
        if next.status != current.status {
            tracing::debug!(from = ?current.status, to = ?next.status, "form status changed");
        } else {
            tracing::debug!("form fields changed");
        }
        *current = next;
        true
    })
}
