//! Form state and the pure transition function that drives it.
//!
//! ```text
//!   Idle ──SubmissionStarted──▶ Submitting ──SubmissionSucceeded──▶ Succeeded
//!    ▲                              │                                   │
//!    │                              └──SubmissionFailed──▶ Failed       │
//!    └──────────────Acknowledged─────────────────────────────┴──────────┘
//! ```
//!
//! A new attempt may also start straight from `Failed` or `Succeeded`.
//! There is no cancelled state: once `Submitting`, only a resolution leaves it.

use crate::models::{FeedbackKind, FeedbackRecord};
use crate::validation::{validate, ValidationError};

/// Shown once the gateway has accepted a record.
pub const SUCCESS_MESSAGE: &str = "Thank you! Your feedback has been submitted.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Failed(String),
    Succeeded(String),
}

impl SubmissionStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Failed and Succeeded wait for an acknowledgement before going idle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Succeeded(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) | Self::Succeeded(message) => Some(message),
            Self::Idle | Self::Submitting => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub email: String,
    pub kind: FeedbackKind,
    pub description: String,
    pub status: SubmissionStatus,
}

/// Why a submit request did not produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    InFlight,
    Invalid(ValidationError),
}

impl FormState {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(&self.email, &self.description)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Whether a submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.status.is_submitting() && self.is_valid()
    }

    /// Builds the record a submit request would send, from trimmed fields.
    pub fn prepare_record(&self) -> Result<FeedbackRecord, SubmitBlocked> {
        self.validate().map_err(SubmitBlocked::Invalid)?;
        if self.status.is_submitting() {
            return Err(SubmitBlocked::InFlight);
        }

        Ok(FeedbackRecord::new(
            self.email.trim(),
            self.kind,
            self.description.trim(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    EmailChanged(String),
    KindChanged(FeedbackKind),
    DescriptionChanged(String),
    SubmissionStarted,
    SubmissionSucceeded,
    SubmissionFailed(String),
    Acknowledged,
}

/// Applies one event. Events that are not valid in the current state leave
/// it unchanged.
pub fn reduce(state: FormState, event: FormEvent) -> FormState {
    match event {
        FormEvent::EmailChanged(email) => FormState { email, ..state },
        FormEvent::KindChanged(kind) => FormState { kind, ..state },
        FormEvent::DescriptionChanged(description) => FormState {
            description,
            ..state
        },
        FormEvent::SubmissionStarted if state.can_submit() => FormState {
            status: SubmissionStatus::Submitting,
            ..state
        },
        FormEvent::SubmissionSucceeded if state.status.is_submitting() => FormState {
            status: SubmissionStatus::Succeeded(SUCCESS_MESSAGE.into()),
            ..FormState::default()
        },
        FormEvent::SubmissionFailed(message) if state.status.is_submitting() => FormState {
            status: SubmissionStatus::Failed(message),
            ..state
        },
        FormEvent::Acknowledged if state.status.is_terminal() => FormState {
            status: SubmissionStatus::Idle,
            ..state
        },
        FormEvent::SubmissionStarted
        | FormEvent::SubmissionSucceeded
        | FormEvent::SubmissionFailed(_)
        | FormEvent::Acknowledged => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(email: &str, description: &str, kind: FeedbackKind) -> FormState {
        [
            FormEvent::EmailChanged(email.into()),
            FormEvent::DescriptionChanged(description.into()),
            FormEvent::KindChanged(kind),
        ]
        .into_iter()
        .fold(FormState::default(), reduce)
    }

    fn submitting(state: FormState) -> FormState {
        reduce(state, FormEvent::SubmissionStarted)
    }

    #[test]
    fn starts_idle_with_default_kind() {
        let state = FormState::default();
        assert_eq!(state.status, SubmissionStatus::Idle);
        assert_eq!(state.kind, FeedbackKind::Feedback);
        assert!(!state.can_submit());
    }

    #[test]
    fn only_terminal_statuses_carry_a_message() {
        assert_eq!(SubmissionStatus::Idle.message(), None);
        assert_eq!(SubmissionStatus::Submitting.message(), None);
        assert_eq!(SubmissionStatus::Failed("boom".into()).message(), Some("boom"));
        assert_eq!(
            SubmissionStatus::Succeeded(SUCCESS_MESSAGE.into()).message(),
            Some(SUCCESS_MESSAGE)
        );
    }

    #[test]
    fn start_requires_valid_fields() {
        let state = filled("not-an-email", "x", FeedbackKind::Bug);
        let next = reduce(state.clone(), FormEvent::SubmissionStarted);
        assert_eq!(next, state);
    }

    #[test]
    fn start_is_ignored_while_submitting() {
        let state = submitting(filled("a@b.com", "hi", FeedbackKind::Bug));
        assert!(state.status.is_submitting());

        let again = reduce(state.clone(), FormEvent::SubmissionStarted);
        assert_eq!(again, state);
    }

    #[test]
    fn success_resets_fields() {
        let state = submitting(filled("a@b.com", "hi", FeedbackKind::Bug));
        let done = reduce(state, FormEvent::SubmissionSucceeded);

        assert_eq!(done.email, "");
        assert_eq!(done.description, "");
        assert_eq!(done.kind, FeedbackKind::Feedback);
        assert_eq!(done.status, SubmissionStatus::Succeeded(SUCCESS_MESSAGE.into()));
    }

    #[test]
    fn failure_keeps_fields() {
        let state = submitting(filled(" a@b.com ", "hi", FeedbackKind::Suggestion));
        let failed = reduce(state, FormEvent::SubmissionFailed("network down".into()));

        assert_eq!(failed.email, " a@b.com ");
        assert_eq!(failed.description, "hi");
        assert_eq!(failed.kind, FeedbackKind::Suggestion);
        assert_eq!(failed.status, SubmissionStatus::Failed("network down".into()));
    }

    #[test]
    fn resolutions_outside_submitting_are_ignored() {
        let state = filled("a@b.com", "hi", FeedbackKind::Bug);
        assert_eq!(reduce(state.clone(), FormEvent::SubmissionSucceeded), state);
        assert_eq!(reduce(state.clone(), FormEvent::SubmissionFailed("x".into())), state);
    }

    #[test]
    fn acknowledge_returns_terminal_states_to_idle() {
        let failed = FormState {
            status: SubmissionStatus::Failed("boom".into()),
            ..filled("a@b.com", "hi", FeedbackKind::Bug)
        };
        let idle = reduce(failed, FormEvent::Acknowledged);
        assert_eq!(idle.status, SubmissionStatus::Idle);
        assert_eq!(idle.email, "a@b.com");

        let submitting = FormState {
            status: SubmissionStatus::Submitting,
            ..FormState::default()
        };
        assert_eq!(reduce(submitting.clone(), FormEvent::Acknowledged), submitting);
    }

    #[test]
    fn retry_allowed_from_failed() {
        let failed = FormState {
            status: SubmissionStatus::Failed("boom".into()),
            ..filled("a@b.com", "hi", FeedbackKind::Bug)
        };
        let retry = reduce(failed, FormEvent::SubmissionStarted);
        assert!(retry.status.is_submitting());
    }

    #[test]
    fn prepared_record_is_trimmed() {
        let state = filled(" a@b.com ", " hi ", FeedbackKind::Bug);
        let record = state.prepare_record().unwrap();

        assert_eq!(record.email(), "a@b.com");
        assert_eq!(record.description(), "hi");
        assert_eq!(record.kind(), FeedbackKind::Bug);
    }

    #[test]
    fn prepare_reports_why_it_is_blocked() {
        let invalid = filled("", "hi", FeedbackKind::Bug);
        assert_eq!(
            invalid.prepare_record().unwrap_err(),
            SubmitBlocked::Invalid(ValidationError::MissingEmail)
        );

        let in_flight = submitting(filled("a@b.com", "hi", FeedbackKind::Bug));
        assert_eq!(in_flight.prepare_record().unwrap_err(), SubmitBlocked::InFlight);
    }
}
