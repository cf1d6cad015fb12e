use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Bug,
    #[default]
    Feedback,
    Suggestion,
}

impl FeedbackKind {
    /// Every kind, in the order a picker should list them.
    pub fn all() -> [Self; 3] {
        [Self::Bug, Self::Feedback, Self::Suggestion]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feedback => "feedback",
            Self::Suggestion => "suggestion",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bug" => Some(Self::Bug),
            "feedback" => Some(Self::Feedback),
            "suggestion" => Some(Self::Suggestion),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Bug => "Bug Report",
            Self::Feedback => "Feedback",
            Self::Suggestion => "Suggestion",
        }
    }
}

/// One feedback submission.
///
/// Fields are private and only readable, so a record cannot change after
/// construction. The id is generated here, before any network call, which
/// lets a storage backend treat a resend of the same record as the same
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    id: Uuid,
    email: String,
    #[serde(rename = "feedbackType")]
    kind: FeedbackKind,
    description: String,
    #[serde(rename = "timestamp")]
    created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn new(
        email: impl Into<String>,
        kind: FeedbackKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            kind,
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn kind(&self) -> FeedbackKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
