mod args;
mod commands;
mod config;
mod dispatch;
mod rendering;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use argot_core::{NamedEnum, Outcome, RawCommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use args::{split_global, GlobalOptions};
use commands::ParsedCommand;

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Success = 0,
    Failure = 1,
    Usage = 2,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (global_args, command_args) = split_global(&args);

    let options = match GlobalOptions::parse_args(global_args.iter().cloned()) {
        Outcome::Parsed(options) => options,
        Outcome::Help(help) => {
            rendering::print_help(&help);
            return Exit::Success.into();
        }
        Outcome::Failed(errors) => {
            rendering::print_parse_errors(&errors);
            return Exit::Usage.into();
        }
    };

    init_tracing(options.debug());
    if !options.color() {
        colored::control::set_override(false);
    }

    match run(&options, command_args) {
        Ok(exit) => exit.into(),
        Err(e) => {
            rendering::print_failure(&e);
            Exit::Failure.into()
        }
    }
}

fn run(options: &GlobalOptions, args: &[String]) -> Result<Exit> {
    match dispatch::dispatch(args) {
        Outcome::Parsed(command) => {
            execute(&command, options)?;
            Ok(Exit::Success)
        }
        Outcome::Help(help) => {
            rendering::print_help(&help);
            Ok(Exit::Success)
        }
        Outcome::Failed(errors) => {
            rendering::print_parse_errors(&errors);
            Ok(Exit::Usage)
        }
    }
}

fn execute(command: &ParsedCommand, options: &GlobalOptions) -> Result<()> {
    debug!(command = command.kind().name(), "executing command");
    if let ParsedCommand::Batch(request) = command {
        let commands = config::load_batch(Path::new(&request.file))
            .with_context(|| format!("Batch '{}' failed", request.file))?;
        info!(file = %request.file, commands = commands.len(), "running batch");
        for command in &commands {
            execute(command, options)?;
        }
        return Ok(());
    }

    println!("{}", rendering::render_command(command, options.json())?);
    Ok(())
}

fn init_tracing(debug: bool) {
    // ARGOT_LOG overrides the --debug default
    let default_filter = if debug {
        "argot=debug,argot_core=trace"
    } else {
        "argot=warn,argot_core=warn"
    };
    let filter = EnvFilter::try_from_env("ARGOT_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
