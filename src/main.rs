use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match parlo::cli::run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(parlo::errors::get_exit_code(&e))
        }
    }
}
