mod parser;
mod subcommands;

pub use parser::run_cli;
