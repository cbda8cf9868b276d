use clap::Command;

use super::fields::with_field_args;
pub use super::validate_handler::handle_validate;

pub fn validate_subcommand() -> Command {
    with_field_args(
        Command::new("validate")
            .about("Check a delivery report without sending it"),
    )
}
