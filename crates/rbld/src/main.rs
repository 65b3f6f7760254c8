use std::process::ExitCode;

fn main() -> ExitCode {
    if rbld::version_requested(std::env::args_os()) {
        println!("{}", rbld::VERSION_LINE);
        return ExitCode::SUCCESS;
    }
    match rbld::run_daemon() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_failure(&error);
            ExitCode::FAILURE
        }
    }
}

// Telemetry may not be installed when configuration fails, so the final
// error always goes to stderr directly.
fn report_failure(error: &rbld::LaunchError) {
    tracing::error!(target: "rbld::process", error = %error, "daemon exited with error");
    eprintln!("rbld: {error}");
}
