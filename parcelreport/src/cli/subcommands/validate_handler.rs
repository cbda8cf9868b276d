use super::fields::{fill_form, print_field_errors};
use crate::{FormSchema, FormState};

pub fn handle_validate(matches: &clap::ArgMatches, schema: FormSchema) -> i32 {
    let as_json = matches.get_flag("json");
    let mut state = FormState::new(schema);
    fill_form(&mut state, matches);

    let errors = state.schema().validate(state.values());
    if errors.is_empty() {
        if as_json {
            println!("{{}}");
        } else {
            println!("All fields are valid");
        }
        return 0;
    }

    if let Err(e) = print_field_errors(&state, &errors, as_json) {
        eprintln!("Error: {}", e);
    }
    1
}
