#[cfg(feature = "cli")]
#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let exit_code = parcelreport::run_cli(args).await;
    std::process::exit(exit_code);
}

#[cfg(not(feature = "cli"))]
fn main() {
    println!("CLI feature is not enabled.");
}
