use mpm_unit_tests::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command line arguments
    let cli_args = cli::parse_args();

    let outcome = cli::process_command(cli_args);
    if let Err(e) = &outcome {
        eprintln!("Error: {:#}", e);
    }
    ExitCode::from(cli::exit_status(&outcome))
}
