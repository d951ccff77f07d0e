use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cloud_accounts::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
