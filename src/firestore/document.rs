//! Firestore REST document encoding.

use std::collections::BTreeMap;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use supportkit_core::FeedbackRecord;

/// A typed Firestore value, e.g. `{"stringValue": "bug"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    StringValue(String),
    TimestampValue(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub fields: BTreeMap<&'static str, Value>,
}

impl From<&FeedbackRecord> for Document {
    fn from(record: &FeedbackRecord) -> Self {
        let fields = BTreeMap::from([
            ("id", Value::StringValue(record.id().to_string())),
            ("email", Value::StringValue(record.email().to_string())),
            ("feedbackType", Value::StringValue(record.kind().as_str().to_string())),
            ("description", Value::StringValue(record.description().to_string())),
            (
                "timestamp",
                Value::TimestampValue(
                    record
                        .created_at()
                        .to_rfc3339_opts(SecondsFormat::Micros, true),
                ),
            ),
        ]);
        Self { fields }
    }
}

/// Body of a non-2xx Firestore response.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use supportkit_core::FeedbackKind;

    #[test]
    fn encodes_typed_fields() {
        let record = FeedbackRecord::new("a@b.com", FeedbackKind::Bug, "crash on launch");
        let json = serde_json::to_value(Document::from(&record)).unwrap();
        let fields = &json["fields"];

        assert_eq!(fields["id"]["stringValue"], record.id().to_string());
        assert_eq!(fields["email"]["stringValue"], "a@b.com");
        assert_eq!(fields["feedbackType"]["stringValue"], "bug");
        assert_eq!(fields["description"]["stringValue"], "crash on launch");

        let timestamp = fields["timestamp"]["timestampValue"].as_str().unwrap();
        assert!(timestamp.ends_with('Z'));
        let parsed = chrono::DateTime::parse_from_rfc3339(timestamp).unwrap();
        assert_eq!(parsed.timestamp_micros(), record.created_at().timestamp_micros());
    }

    #[test]
    fn parses_error_envelope() {
        let body = r#"{"error": {"code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.error.message, "Missing or insufficient permissions.");
        assert_eq!(envelope.error.status.as_deref(), Some("PERMISSION_DENIED"));
    }
}
