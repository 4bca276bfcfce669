//! Dispatch a parsed command line to its command handler.
//!
//! `serve` never reaches this point; `main` starts the language server
//! before the CLI layer is involved.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{check::check, init::init},
    exit_status::ExitStatus,
    report,
};

pub fn run(Arguments { command }: Arguments, verbose: bool) -> Result<ExitStatus> {
    match command {
        Some(Command::Check(cmd)) => {
            let result = check(cmd)?;
            report::print(&result, verbose);
            Ok(if result.issues.is_empty() {
                ExitStatus::Success
            } else {
                ExitStatus::Failure
            })
        }
        Some(Command::Init) => init(),
        Some(Command::Serve(_)) => {
            bail!("Serve command should be handled before run()")
        }
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
