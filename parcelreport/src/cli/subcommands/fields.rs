use std::collections::BTreeMap;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::{
    FormState, Issue, ReportError, DETAILS_FIELD, ISSUE_FIELD,
    TRACKING_NUMBER_FIELD,
};

// form field name -> command-line argument id
const FIELD_ARGS: [(&str, &str); 3] = [
    (TRACKING_NUMBER_FIELD, "tracking-number"),
    (ISSUE_FIELD, "issue"),
    (DETAILS_FIELD, "details"),
];

pub fn with_field_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("tracking-number")
                .long("tracking-number")
                .short('n')
                .allow_hyphen_values(true)
                .help("Five digit tracking number of the delivery"),
        )
        .arg(
            Arg::new("issue")
                .long("issue")
                .short('i')
                .value_parser(PossibleValuesParser::new(Issue::names()))
                .help("What went wrong with the delivery"),
        )
        .arg(
            Arg::new("details")
                .long("details")
                .short('d')
                .help("Additional details (optional)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print errors as a JSON object on stdout"),
        )
}

/// Feeds every field given on the command line into `state`, in form order.
pub fn fill_form(state: &mut FormState, matches: &ArgMatches) {
    let fields: Vec<String> = state
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();
    for field in fields {
        let arg_id = FIELD_ARGS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, arg_id)| *arg_id);
        let value = arg_id.and_then(|id| matches.get_one::<String>(id));
        if let Some(value) = value {
            state.change(&field, value.as_str());
            state.blur(&field);
        }
    }
}

pub fn print_field_errors(
    state: &FormState,
    errors: &BTreeMap<String, String>,
    as_json: bool,
) -> Result<(), ReportError> {
    if as_json {
        println!("{}", serde_json::to_string(errors)?);
        return Ok(());
    }
    for field in state.schema().fields() {
        if let Some(message) = errors.get(field.name()) {
            eprintln!("{}: {}", field.label(), message);
        }
    }
    Ok(())
}
