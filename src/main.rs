//! Scaffold CLI - declarative workspace provisioning for ClickUp

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = scaffold_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
