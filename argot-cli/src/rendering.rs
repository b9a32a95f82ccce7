//! Terminal output for help text, errors and parsed commands.

use anyhow::Result;
use argot_core::{NamedEnum, ParseErrors};
use colored::Colorize;

use crate::commands::{CopyRequest, ListRequest, ParsedCommand};

pub fn print_help(help: &str) {
    let mut lines = help.lines();
    if let Some(first) = lines.next() {
        println!("{}", first.bold());
    }
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_parse_errors(errors: &ParseErrors) {
    eprintln!("{}", errors.to_string().red());
    eprintln!("Run with {} for usage.", "--help".bold());
}

pub fn print_failure(err: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".red().bold(), err);
}

/// Render a parsed command as JSON or as a one-line summary
pub fn render_command(command: &ParsedCommand, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(command)?);
    }
    Ok(describe(command))
}

fn describe(command: &ParsedCommand) -> String {
    match command {
        ParsedCommand::Copy(request) => describe_copy(request),
        ParsedCommand::List(request) => describe_list(request),
        ParsedCommand::Batch(request) => format!("batch {}", request.file),
        ParsedCommand::Version(request) if request.short => env!("CARGO_PKG_VERSION").to_string(),
        ParsedCommand::Version(_) => format!(
            "argot {} (engine {})",
            env!("CARGO_PKG_VERSION"),
            argot_core::VERSION
        ),
    }
}

fn describe_copy(request: &CopyRequest) -> String {
    let mut line = format!(
        "copy {} -> {} [mode={}, retries={}]",
        request.source,
        request.destination,
        request.mode.name(),
        request.retries
    );
    if request.force {
        line.push_str(" (overwrite)");
    }
    line
}

fn describe_list(request: &ListRequest) -> String {
    let mut line = format!("list {} [format={}", request.path, request.format.name());
    if let Some(depth) = request.depth {
        line.push_str(&format!(", depth={}", depth));
    }
    if !request.exclude.is_empty() {
        line.push_str(&format!(", exclude={}", request.exclude.join(",")));
    }
    line.push(']');
    if request.all {
        line.push_str(" (all)");
    }
    line
}
