//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report missing and unused translations across the workspace
//! - `init`: Create a `.i18nlensrc.json` configuration file
//! - `serve`: Start the language server on stdio

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use super::commands::check::CheckRule;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Serve(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Arguments shared by workspace commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Workspace directory to search for the config file (default: current directory)
    #[arg(long, env = "I18N_LENS_ROOT")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Checks to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Log lifecycle events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check markup annotations against the configured translation files
    Check(CheckCommand),
    /// Initialize a new .i18nlensrc.json configuration file
    Init,
    /// Start the language server on stdio
    Serve(ServeCommand),
}
