#[tokio::main]
async fn main() {
    if let Err(err) = awsweep::cli::run().await {
        awsweep::ui::eprintln_error(&err);
        std::process::exit(awsweep::exit::exit_code(&err));
    }
}
