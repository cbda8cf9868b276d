use std::sync::Arc;

use super::fields::{fill_form, print_field_errors};
use crate::{
    FormSchema, FormState, FormValues, ReportConfig, ReportError,
    SubmissionError, SubmitFailure, Submitter, SUCCESS_MESSAGE,
};

pub async fn handle_submit(
    matches: &clap::ArgMatches,
    config: &ReportConfig,
    schema: FormSchema,
) -> i32 {
    let as_json = matches.get_flag("json");
    let submitter = match Submitter::from_config(config) {
        Ok(submitter) => submitter.with_on_success(Arc::new(
            |values: &FormValues| {
                log::info!("Submitted with values {:?}", values);
            },
        )),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut state = FormState::new(schema);
    fill_form(&mut state, matches);
    log::debug!(
        "Submitting form {} to {}",
        state.schema().form_id(),
        submitter.endpoint()
    );

    match state.handle_submit(&submitter).await {
        Ok(()) => {
            if as_json {
                println!("{{}}");
            } else {
                println!("{}", SUCCESS_MESSAGE);
            }
            0
        }
        Err(failure) => {
            if let Err(e) = report_failure(&state, &failure, as_json) {
                eprintln!("Error: {}", e);
            }
            1
        }
    }
}

fn report_failure(
    state: &FormState,
    failure: &SubmitFailure,
    as_json: bool,
) -> Result<(), ReportError> {
    match failure {
        SubmitFailure::NotReady => {
            eprintln!(
                "Nothing to submit: provide at least one field, see --help"
            );
            Ok(())
        }
        SubmitFailure::Invalid { errors, .. } => {
            print_field_errors(state, errors, as_json)
        }
        SubmitFailure::Rejected { error, .. } => {
            print_submission_error(state, error, as_json)
        }
    }
}

fn print_submission_error(
    state: &FormState,
    error: &SubmissionError,
    as_json: bool,
) -> Result<(), ReportError> {
    if as_json {
        println!("{}", serde_json::to_string(error)?);
        return Ok(());
    }
    if let Some(message) = state.global_error() {
        eprintln!("{}", message);
    }
    for (field, message) in error.errors() {
        if error.field_error(field).is_none() {
            continue;
        }
        let label = state
            .schema()
            .field(field)
            .map(|schema| schema.label())
            .unwrap_or(field.as_str());
        eprintln!("{}: {}", label, message);
    }
    Ok(())
}
