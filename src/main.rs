use std::process::ExitCode;

use typist::errors::{get_exit_code, EXIT_SUCCESS};

#[tokio::main]
async fn main() -> ExitCode {
    match typist::cli::run().await {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(get_exit_code(&e))
        }
    }
}
