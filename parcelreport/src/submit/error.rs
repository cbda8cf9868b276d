use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Key under which a form-wide (not field specific) message is stored.
pub const GLOBAL_ERROR_KEY: &str = "_error";
pub const GENERIC_SUBMIT_MESSAGE: &str = "Error submitting message";

const VALIDATION_ERROR_REASON: &str = "ValidationError";

/// Outcome of a failed submission: field name (or `_error`) to the message
/// that should be displayed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmissionError {
    errors: BTreeMap<String, String>,
}

impl SubmissionError {
    pub fn field<K: Into<String>, V: Into<String>>(field: K, message: V) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), message.into());
        Self { errors }
    }

    pub fn global<S: Into<String>>(message: S) -> Self {
        Self::field(GLOBAL_ERROR_KEY, message)
    }

    pub fn generic() -> Self {
        Self::global(GENERIC_SUBMIT_MESSAGE)
    }

    pub fn global_error(&self) -> Option<&str> {
        self.errors.get(GLOBAL_ERROR_KEY).map(String::as_str)
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        if field == GLOBAL_ERROR_KEY {
            return None;
        }
        self.errors.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|(key, message)| {
                if key == GLOBAL_ERROR_KEY {
                    message.clone()
                } else {
                    format!("{}: {}", key, message)
                }
            })
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for SubmissionError {}

/// Structured error body returned by the report API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerErrorPayload {
    pub reason: Option<String>,
    pub message: Option<String>,
    pub location: Option<String>,
}

impl ServerErrorPayload {
    /// Reads the payload from a decoded error body. Only a JSON object
    /// carries a payload; keys that are missing or not strings are `None`.
    pub fn from_json(body: &Value) -> Option<Self> {
        let object = body.as_object()?;
        Some(Self {
            reason: string_key(object, "reason"),
            message: string_key(object, "message"),
            location: string_key(object, "location"),
        })
    }
}

fn string_key(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Why a submission did not succeed, before it is reduced to a
/// [`SubmissionError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Server(ServerErrorPayload),
    Status { code: u16, message: String },
    Transport(String),
}

impl FailureReason {
    fn reason(&self) -> Option<&str> {
        match self {
            FailureReason::Server(payload) => payload.reason.as_deref(),
            FailureReason::Status { .. } | FailureReason::Transport(_) => None,
        }
    }

    pub fn into_submission_error(self) -> SubmissionError {
        if self.reason() != Some(VALIDATION_ERROR_REASON) {
            return SubmissionError::generic();
        }
        match self {
            FailureReason::Server(ServerErrorPayload {
                message: Some(message),
                location: Some(location),
                ..
            }) => SubmissionError::field(location, message),
            _ => SubmissionError::generic(),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Server(payload) => write!(
                f,
                "{}: {} (location: {})",
                payload.reason.as_deref().unwrap_or("UnknownReason"),
                payload.message.as_deref().unwrap_or(""),
                payload.location.as_deref().unwrap_or("-"),
            ),
            FailureReason::Status { code, message } => {
                write!(f, "{} {}", code, message)
            }
            FailureReason::Transport(e) => write!(f, "Transport: {}", e),
        }
    }
}
