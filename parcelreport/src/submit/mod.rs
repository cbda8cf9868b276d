mod error;
mod workflow;

pub use error::{
    FailureReason, ServerErrorPayload, SubmissionError, GENERIC_SUBMIT_MESSAGE,
    GLOBAL_ERROR_KEY,
};
pub use workflow::{OnSuccess, Submitter, SUCCESS_MESSAGE};
