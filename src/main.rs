use std::process::ExitCode;

use tk::log_failure;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tk::telemetry::init();

    match tk::run(std::env::args_os()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_failure!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
