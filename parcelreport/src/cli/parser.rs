use std::collections::HashMap;

use clap::{Arg, Command};

use super::subcommands::submit::*;
use super::subcommands::validate::*;
use crate::{FormSchema, ReportConfig, ENDPOINT_KEY, TIMEOUT_KEY};

const PROGRAM_NAME: &str = "parcelreport";

/// Parses `args` and runs the selected subcommand. Returns the process exit
/// code.
pub async fn run_cli(args: Vec<String>) -> i32 {
    let _ = env_logger::try_init();
    let app = Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand_required(true)
        .about(format!(
            "{}: report a problem with your delivery",
            PROGRAM_NAME
        ))
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .short('e')
                .global(true)
                .help("Report API endpoint (overrides PARCELREPORT_ENDPOINT)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .short('t')
                .global(true)
                .help("Request timeout in seconds"),
        )
        .arg(
            Arg::new("form")
                .long("form")
                .short('f')
                .global(true)
                .default_value("delivery")
                .value_parser(["delivery", "contact"])
                .help("Form variant to validate against"),
        )
        .subcommand(submit_subcommand()) // "submit [FIELDS]"
        .subcommand(validate_subcommand()); // "validate [FIELDS]"

    let matches = match app.try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => {
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                print!("{}", e);
                return 0;
            }
            eprintln!("Error parsing command-line arguments: {}", e);
            eprintln!(
                "For more detailed help, try running '--help' or \
                 '<subcommand> --help'."
            );
            return 2;
        }
    };

    let config = create_initial_config(&matches);
    let form_name = matches
        .get_one::<String>("form")
        .map(String::as_str)
        .unwrap_or("delivery");
    let Some(schema) = FormSchema::by_name(form_name) else {
        eprintln!("Unknown form: {}", form_name);
        return 2;
    };

    match matches.subcommand() {
        Some(("submit", matches)) => {
            // submit
            handle_submit(matches, &config, schema).await
        }
        Some(("validate", matches)) => {
            // validate only
            handle_validate(matches, schema)
        }
        _ => {
            // given `subcommand_required(true)` is defined,
            // this branch should never be reached
            unreachable!("subcommand_required(true) not defined")
        }
    }
}

fn create_initial_config(matches: &clap::ArgMatches) -> ReportConfig {
    let mut config_hashmap = HashMap::new();
    if let Some(endpoint) = matches.get_one::<String>("endpoint") {
        config_hashmap.insert(ENDPOINT_KEY.to_string(), endpoint.to_string());
    }
    if let Some(timeout) = matches.get_one::<String>("timeout") {
        config_hashmap.insert(TIMEOUT_KEY.to_string(), timeout.to_string());
    }

    // environment first, command-line flags win
    ReportConfig::from_env().merge(ReportConfig::new(config_hashmap))
}
