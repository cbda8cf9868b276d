//! Delivery-problem reports: field validation, form state and the
//! submission workflow against the report API.

pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod form;
pub(crate) mod http;
pub(crate) mod submit;

#[cfg(feature = "cli")]
mod cli;
#[cfg(feature = "cli")]
pub use cli::run_cli;

pub use config::{ReportConfig, DEFAULT_ENDPOINT, ENDPOINT_KEY, TIMEOUT_KEY};
pub use error::ReportError;
pub use form::validators;
pub use form::{
    DeliveryReport, FieldSchema, FormSchema, FormState, FormValues,
    InputKind, Issue, SubmitFailure, CONTACT_FORM, DELIVERY_FORM,
    DETAILS_FIELD, ISSUE_FIELD, TRACKING_NUMBER_FIELD,
};
#[cfg(any(feature = "http_client", target_arch = "wasm32"))]
pub use http::HttpClient;
pub use http::{
    HttpClientError, HttpClientResponse, HttpClientResult, Transport,
    JSON_CONTENT_TYPE,
};
pub use submit::{
    FailureReason, OnSuccess, ServerErrorPayload, SubmissionError, Submitter,
    GENERIC_SUBMIT_MESSAGE, GLOBAL_ERROR_KEY, SUCCESS_MESSAGE,
};
