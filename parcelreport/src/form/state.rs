use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::schema::FormSchema;
use super::values::FormValues;
use crate::http::Transport;
use crate::submit::{SubmissionError, Submitter};

/// Why a submit attempt did not end in success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// Form is pristine or a submission is already in flight.
    NotReady,
    /// Client-side validation failed, nothing was sent.
    Invalid {
        errors: BTreeMap<String, String>,
        focus: Option<String>,
    },
    /// Backend (or the way to it) rejected the submission.
    Rejected {
        error: SubmissionError,
        focus: Option<String>,
    },
}

impl SubmitFailure {
    pub fn focus(&self) -> Option<&str> {
        match self {
            SubmitFailure::NotReady => None,
            SubmitFailure::Invalid { focus, .. }
            | SubmitFailure::Rejected { focus, .. } => focus.as_deref(),
        }
    }
}

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitFailure::NotReady => write!(f, "Form is not ready to submit"),
            SubmitFailure::Invalid { errors, .. } => {
                let fields: Vec<String> = errors
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect();
                write!(f, "Validation failed: {}", fields.join("; "))
            }
            SubmitFailure::Rejected { error, .. } => write!(f, "{}", error),
        }
    }
}

/// Presentation state of one form instance: the values typed so far and
/// everything needed to decide what feedback to show.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    values: FormValues,
    touched: BTreeSet<String>,
    field_errors: BTreeMap<String, String>,
    submit_errors: BTreeMap<String, String>,
    global_error: Option<String>,
    pristine: bool,
    submitting: bool,
    submit_succeeded: bool,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Self {
        let values = FormValues::new();
        let field_errors = schema.validate(&values);
        Self {
            schema,
            values,
            touched: BTreeSet::new(),
            field_errors,
            submit_errors: BTreeMap::new(),
            global_error: None,
            pristine: true,
            submitting: false,
            submit_succeeded: false,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_succeeded(&self) -> bool {
        self.submit_succeeded
    }

    pub fn can_submit(&self) -> bool {
        !self.pristine && !self.submitting
    }

    pub fn change<S: Into<String>>(&mut self, field: &str, value: S) {
        let Some(schema) = self.schema.field(field) else {
            log::warn!(
                "Ignoring change to unknown field {} on form {}",
                field,
                self.schema.form_id()
            );
            return;
        };
        let value = value.into();
        match schema.validate(Some(&value)) {
            Ok(()) => self.field_errors.remove(field),
            Err(message) => self.field_errors.insert(field.to_string(), message),
        };
        self.values.set(field, value);
        self.submit_errors.remove(field);
        self.pristine = false;
    }

    pub fn blur(&mut self, field: &str) {
        if self.schema.field(field).is_some() {
            self.touched.insert(field.to_string());
        }
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Validates every field and, when all pass, marks the form as
    /// submitting and returns the values to send.
    pub fn begin_submit(&mut self) -> Result<FormValues, SubmitFailure> {
        if !self.can_submit() {
            return Err(SubmitFailure::NotReady);
        }
        self.touched = self
            .schema
            .fields()
            .iter()
            .map(|field| field.name().to_string())
            .collect();
        self.field_errors = self.schema.validate(&self.values);
        if !self.field_errors.is_empty() {
            let focus = self
                .schema
                .first_failing_field(&self.field_errors)
                .map(str::to_string);
            return Err(SubmitFailure::Invalid {
                errors: self.field_errors.clone(),
                focus,
            });
        }

        self.submitting = true;
        self.submit_succeeded = false;
        self.submit_errors.clear();
        self.global_error = None;
        Ok(self.values.clone())
    }

    /// Records the outcome of a submission started with
    /// [`FormState::begin_submit`].
    pub fn complete(
        &mut self,
        result: Result<(), SubmissionError>,
    ) -> Result<(), SubmitFailure> {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.submit_succeeded = true;
                Ok(())
            }
            Err(error) => {
                for field in error.errors().keys() {
                    if error.field_error(field).is_some()
                        && self.schema.field(field).is_none()
                    {
                        log::warn!(
                            "Server error for unknown field {} on form {} \
                             is not shown",
                            field,
                            self.schema.form_id()
                        );
                    }
                }
                self.global_error = error.global_error().map(str::to_string);
                self.submit_errors = self
                    .schema
                    .fields()
                    .iter()
                    .filter_map(|field| {
                        error.field_error(field.name()).map(|message| {
                            (field.name().to_string(), message.to_string())
                        })
                    })
                    .collect();
                let focus = self
                    .schema
                    .first_failing_field(&self.submit_errors)
                    .map(str::to_string);
                Err(SubmitFailure::Rejected { error, focus })
            }
        }
    }

    pub async fn handle_submit<T: Transport>(
        &mut self,
        submitter: &Submitter<T>,
    ) -> Result<(), SubmitFailure> {
        let values = self.begin_submit()?;
        let result = submitter.submit(&values).await;
        self.complete(result)
    }

    /// Error to render next to `field`. Hidden until the field is touched;
    /// a client-side validation error takes precedence over a server one.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if !self.is_touched(field) {
            return None;
        }
        self.field_errors
            .get(field)
            .or_else(|| self.submit_errors.get(field))
            .map(String::as_str)
    }

    pub fn global_error(&self) -> Option<&str> {
        self.global_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::form::validators::{NON_EMPTY_MESSAGE, REQUIRED_MESSAGE};
    use crate::form::{DETAILS_FIELD, ISSUE_FIELD, TRACKING_NUMBER_FIELD};
    use crate::http::{HttpClientResponse, HttpClientResult};
    use crate::submit::GENERIC_SUBMIT_MESSAGE;

    struct StatusBackend(u16, &'static str);

    #[async_trait]
    impl Transport for StatusBackend {
        async fn post_json(&self, _url: &str, _body: Bytes) -> HttpClientResult {
            let mut headers = HashMap::new();
            headers.insert(
                "content-type".to_string(),
                "application/json".to_string(),
            );
            Ok(HttpClientResponse::new(
                self.0,
                String::new(),
                headers,
                Some(Bytes::from_static(self.1.as_bytes())),
            ))
        }
    }

    fn filled_in() -> FormState {
        let mut state = FormState::new(FormSchema::delivery());
        state.change(TRACKING_NUMBER_FIELD, "12345");
        state.change(ISSUE_FIELD, "damaged");
        state.change(DETAILS_FIELD, "");
        state
    }

    #[test]
    fn test_pristine_form_cannot_submit() {
        let mut state = FormState::new(FormSchema::delivery());
        assert!(state.is_pristine());
        assert!(!state.can_submit());
        assert_eq!(state.begin_submit(), Err(SubmitFailure::NotReady));
        // errors exist from the start but stay hidden until touched
        assert_eq!(state.visible_error(TRACKING_NUMBER_FIELD), None);
    }

    #[test]
    fn test_change_validates_field() {
        let mut state = FormState::new(FormSchema::delivery());
        state.change(TRACKING_NUMBER_FIELD, "  ");
        assert!(!state.is_pristine());
        assert!(state.can_submit());
        assert_eq!(state.visible_error(TRACKING_NUMBER_FIELD), None);
        state.blur(TRACKING_NUMBER_FIELD);
        assert_eq!(
            state.visible_error(TRACKING_NUMBER_FIELD),
            Some(NON_EMPTY_MESSAGE)
        );
        state.change(TRACKING_NUMBER_FIELD, "54321");
        assert_eq!(state.visible_error(TRACKING_NUMBER_FIELD), None);
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut state = FormState::new(FormSchema::delivery());
        state.change("nickname", "bob");
        assert!(state.is_pristine());
        assert!(state.values().is_empty());
    }

    #[test]
    fn test_invalid_submit_focuses_first_failing_field() {
        let mut state = FormState::new(FormSchema::delivery());
        state.change(DETAILS_FIELD, "box was wet");
        let failure = state.begin_submit().unwrap_err();
        assert_eq!(failure.focus(), Some(TRACKING_NUMBER_FIELD));
        match failure {
            SubmitFailure::Invalid { errors, .. } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[ISSUE_FIELD], REQUIRED_MESSAGE);
            }
            other => panic!("unexpected failure: {:?}", other),
        }
        assert!(!state.is_submitting());
        // a submit attempt touches every field
        assert_eq!(state.visible_error(ISSUE_FIELD), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_submitting_blocks_second_submit() {
        let mut state = filled_in();
        let values = state.begin_submit().unwrap();
        assert_eq!(values.get(TRACKING_NUMBER_FIELD), Some("12345"));
        assert!(state.is_submitting());
        assert!(!state.can_submit());
        assert_eq!(state.begin_submit(), Err(SubmitFailure::NotReady));

        assert_eq!(state.complete(Ok(())), Ok(()));
        assert!(state.submit_succeeded());
        assert!(state.can_submit());
    }

    #[test]
    fn test_server_field_error_until_changed() {
        let mut state = filled_in();
        state.begin_submit().unwrap();
        let failure = state
            .complete(Err(SubmissionError::field(
                TRACKING_NUMBER_FIELD,
                "Unknown tracking number",
            )))
            .unwrap_err();
        assert_eq!(failure.focus(), Some(TRACKING_NUMBER_FIELD));
        assert!(!state.submit_succeeded());
        assert_eq!(
            state.visible_error(TRACKING_NUMBER_FIELD),
            Some("Unknown tracking number")
        );
        assert_eq!(state.global_error(), None);

        state.change(TRACKING_NUMBER_FIELD, "54321");
        assert_eq!(state.visible_error(TRACKING_NUMBER_FIELD), None);
    }

    #[test]
    fn test_server_error_for_unknown_field() {
        let mut state = filled_in();
        state.begin_submit().unwrap();
        let failure = state
            .complete(Err(SubmissionError::field("postcode", "Unknown")))
            .unwrap_err();
        assert_eq!(failure.focus(), None);
        assert!(!state.submit_succeeded());
        assert!(!state.is_submitting());
        assert_eq!(state.global_error(), None);
        for field in [TRACKING_NUMBER_FIELD, ISSUE_FIELD, DETAILS_FIELD] {
            assert_eq!(state.visible_error(field), None);
        }
        // the form can be sent again
        assert!(state.can_submit());
    }

    #[tokio::test]
    async fn test_handle_submit() {
        let endpoint = "http://localhost/api/report";

        let mut state = filled_in();
        let submitter = Submitter::new(endpoint, StatusBackend(200, ""));
        assert_eq!(state.handle_submit(&submitter).await, Ok(()));
        assert!(state.submit_succeeded());

        let submitter = Submitter::new(
            endpoint,
            StatusBackend(500, r#"{"reason":"InternalError"}"#),
        );
        let failure = state.handle_submit(&submitter).await.unwrap_err();
        assert_eq!(failure.focus(), None);
        assert_eq!(state.global_error(), Some(GENERIC_SUBMIT_MESSAGE));
        assert!(!state.submit_succeeded());
        assert!(!state.is_submitting());
    }
}
