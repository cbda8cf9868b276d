use std::sync::Arc;

use crate::form::FormValues;
use crate::http::{HttpClientResponse, Transport};

use super::error::{FailureReason, ServerErrorPayload, SubmissionError};

pub const SUCCESS_MESSAGE: &str = "Message submitted successfully";

/// Called with the submitted values once the backend accepted them.
pub type OnSuccess = Arc<dyn Fn(&FormValues) + Send + Sync>;

/// Posts form values to the report endpoint and turns every non-success
/// path into a single [`SubmissionError`].
pub struct Submitter<T: Transport> {
    endpoint: String,
    transport: T,
    on_success: Option<OnSuccess>,
}

impl<T: Transport> Submitter<T> {
    pub fn new<S: Into<String>>(endpoint: S, transport: T) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
            on_success: None,
        }
    }

    pub fn with_on_success(mut self, on_success: OnSuccess) -> Self {
        self.on_success = Some(on_success);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn submit(
        &self,
        values: &FormValues,
    ) -> Result<(), SubmissionError> {
        let body = values.to_json_bytes().map_err(|e| {
            log::warn!("Unable to serialize form values: {}", e);
            SubmissionError::generic()
        })?;

        let reason = match self.transport.post_json(&self.endpoint, body).await
        {
            Ok(response) if response.is_success() => {
                if let Some(on_success) = &self.on_success {
                    on_success(values);
                }
                return Ok(());
            }
            Ok(response) => failure_reason(&response),
            Err(e) => FailureReason::Transport(e.to_string()),
        };

        log::debug!("Submission to {} failed: {}", self.endpoint, reason);
        Err(reason.into_submission_error())
    }
}

#[cfg(any(feature = "http_client", target_arch = "wasm32"))]
impl Submitter<crate::http::HttpClient> {
    /// Submitter posting to the configured endpoint over HTTP(S).
    pub fn from_config(
        config: &crate::ReportConfig,
    ) -> Result<Self, crate::ReportError> {
        let client = crate::http::HttpClient::new().with_timeout(config.timeout()?);
        Ok(Submitter::new(config.endpoint()?, client))
    }
}

fn failure_reason(response: &HttpClientResponse) -> FailureReason {
    if response.is_json() {
        match response.json::<serde_json::Value>() {
            Ok(body) => match ServerErrorPayload::from_json(&body) {
                Some(payload) => FailureReason::Server(payload),
                None => FailureReason::Transport(format!(
                    "error body is not an object: {}",
                    body
                )),
            },
            Err(e) => FailureReason::Transport(format!(
                "undecodable error body: {}",
                e
            )),
        }
    } else {
        FailureReason::Status {
            code: response.status_code(),
            message: response.status_text().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::http::{HttpClientError, HttpClientResult};
    use crate::submit::error::GENERIC_SUBMIT_MESSAGE;

    const ENDPOINT: &str = "http://localhost/api/report";

    struct MockBackend {
        status: u16,
        status_text: &'static str,
        content_type: Option<&'static str>,
        body: &'static str,
        requests: Mutex<Vec<(String, Bytes)>>,
    }

    impl MockBackend {
        fn new(status: u16, content_type: Option<&'static str>, body: &'static str) -> Self {
            Self {
                status,
                status_text: "",
                content_type,
                body,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn with_status_text(mut self, status_text: &'static str) -> Self {
            self.status_text = status_text;
            self
        }
    }

    #[async_trait]
    impl Transport for MockBackend {
        async fn post_json(&self, url: &str, body: Bytes) -> HttpClientResult {
            self.requests.lock().unwrap().push((url.to_string(), body));
            let mut headers = HashMap::new();
            if let Some(content_type) = self.content_type {
                headers.insert("Content-Type".to_string(), content_type.to_string());
            }
            Ok(HttpClientResponse::new(
                self.status,
                self.status_text.to_string(),
                headers,
                Some(Bytes::from_static(self.body.as_bytes())),
            ))
        }
    }

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn post_json(&self, url: &str, _body: Bytes) -> HttpClientResult {
            Err(HttpClientError::ConnectionError(url.to_string()))
        }
    }

    fn values() -> FormValues {
        FormValues::new()
            .with("trackingNumber", "12345")
            .with("issue", "damaged")
            .with("details", "")
    }

    #[tokio::test]
    async fn test_success_posts_json_body() {
        let submitted = Arc::new(Mutex::new(Vec::new()));
        let recorder = submitted.clone();
        let submitter = Submitter::new(ENDPOINT, MockBackend::new(200, None, ""))
            .with_on_success(Arc::new(move |values: &FormValues| {
                recorder.lock().unwrap().push(values.clone());
            }));

        assert_eq!(submitter.submit(&values()).await, Ok(()));

        let requests = submitter.transport().requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, ENDPOINT);
        assert_eq!(
            &requests[0].1[..],
            br#"{"trackingNumber":"12345","issue":"damaged","details":""}"#
        );
        assert_eq!(*submitted.lock().unwrap(), vec![values()]);
    }

    #[tokio::test]
    async fn test_validation_error_maps_to_field() {
        let backend = MockBackend::new(
            422,
            Some("application/json; charset=utf-8"),
            r#"{"code":422,"reason":"ValidationError","message":"Too short","location":"trackingNumber"}"#,
        );
        let submitter = Submitter::new(ENDPOINT, backend);
        let error = submitter.submit(&values()).await.unwrap_err();
        assert_eq!(error, SubmissionError::field("trackingNumber", "Too short"));
    }

    #[tokio::test]
    async fn test_plain_text_error_is_generic() {
        let backend = MockBackend::new(500, Some("text/plain"), "Internal Server Error")
            .with_status_text("Internal Server Error");
        let called = Arc::new(Mutex::new(false));
        let flag = called.clone();
        let submitter = Submitter::new(ENDPOINT, backend)
            .with_on_success(Arc::new(move |_: &FormValues| {
                *flag.lock().unwrap() = true;
            }));
        let error = submitter.submit(&values()).await.unwrap_err();
        assert_eq!(error.global_error(), Some(GENERIC_SUBMIT_MESSAGE));
        assert_eq!(error.errors().len(), 1);
        assert!(!*called.lock().unwrap());
    }

    #[tokio::test]
    async fn test_json_error_with_other_reason_is_generic() {
        let backend = MockBackend::new(
            400,
            Some("application/json"),
            r#"{"reason":"BadRequest","message":"nope","location":"issue"}"#,
        );
        let error = Submitter::new(ENDPOINT, backend)
            .submit(&values())
            .await
            .unwrap_err();
        assert_eq!(error, SubmissionError::generic());
    }

    #[tokio::test]
    async fn test_non_object_json_error_is_generic() {
        for body in [
            r#"["ValidationError","Too short","trackingNumber"]"#,
            r#""Too short""#,
        ] {
            let backend =
                MockBackend::new(422, Some("application/json"), body);
            let error = Submitter::new(ENDPOINT, backend)
                .submit(&values())
                .await
                .unwrap_err();
            assert_eq!(error, SubmissionError::generic(), "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_malformed_json_error_is_generic() {
        let backend = MockBackend::new(400, Some("application/json"), "<html>");
        let error = Submitter::new(ENDPOINT, backend)
            .submit(&values())
            .await
            .unwrap_err();
        assert_eq!(error, SubmissionError::generic());
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic() {
        let error = Submitter::new(ENDPOINT, Unreachable)
            .submit(&values())
            .await
            .unwrap_err();
        assert_eq!(error, SubmissionError::generic());
    }

    #[test]
    fn test_failure_reason_without_json() {
        let response = HttpClientResponse::new(
            503,
            "Service Unavailable".to_string(),
            HashMap::new(),
            None,
        );
        assert_eq!(
            failure_reason(&response),
            FailureReason::Status {
                code: 503,
                message: "Service Unavailable".to_string()
            }
        );
    }
}
