use std::env;

use parcelreport::run_cli;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let exit_code = run_cli(args).await;
    std::process::exit(exit_code);
}
