mod fields;
pub mod submit;
mod submit_handler;
pub mod validate;
mod validate_handler;
