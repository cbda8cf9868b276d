use clap::Command;

use super::fields::with_field_args;
pub use super::submit_handler::handle_submit;

pub fn submit_subcommand() -> Command {
    with_field_args(
        Command::new("submit")
            .about("Validate a delivery report and send it to the report API")
            .after_help(
                "Example: submit --tracking-number 12345 --issue damaged \
                 --details 'box was crushed'",
            ),
    )
}
