//! Routes a command line to the registry of the named command.

use argot_core::{parse_enum_by_name, CommandInfo, NamedEnum, Outcome, ParseErrors, RawCommand};
use tracing::debug;

use crate::commands::{
    BatchCommand, CommandKind, CopyCommand, ListCommand, ParsedCommand, VersionCommand,
};

/// Static information for a command kind
pub fn command_info(kind: CommandKind) -> &'static CommandInfo<CommandKind> {
    match kind {
        CommandKind::Copy => CopyCommand::info(),
        CommandKind::List => ListCommand::info(),
        CommandKind::Batch => BatchCommand::info(),
        CommandKind::Version => VersionCommand::info(),
    }
}

/// Resolve a command name typed by the user
pub fn resolve_kind(name: &str) -> Result<CommandKind, ParseErrors> {
    parse_enum_by_name::<CommandKind>(name)
        .map_err(|e| ParseErrors::single(format!("Unknown command: {}", e)))
}

/// Parse the arguments that follow a command name
pub fn parse_command(kind: CommandKind, args: &[String]) -> Outcome<ParsedCommand> {
    debug!(command = kind.name(), args = args.len(), "parsing command");
    let args = args.iter().cloned();
    match kind {
        CommandKind::Copy => CopyCommand::parse_args(args)
            .and_then(CopyCommand::into_request)
            .map(ParsedCommand::Copy),
        CommandKind::List => ListCommand::parse_args(args)
            .and_then(ListCommand::into_request)
            .map(ParsedCommand::List),
        CommandKind::Batch => BatchCommand::parse_args(args)
            .and_then(BatchCommand::into_request)
            .map(ParsedCommand::Batch),
        CommandKind::Version => VersionCommand::parse_args(args)
            .and_then(VersionCommand::into_request)
            .map(ParsedCommand::Version),
    }
}

/// Parse `<command> [args...]`.
///
/// An empty command line yields the global help.
pub fn dispatch(args: &[String]) -> Outcome<ParsedCommand> {
    let Some((name, rest)) = args.split_first() else {
        return Outcome::Help(global_help());
    };
    match resolve_kind(name) {
        Ok(kind) => parse_command(kind, rest),
        Err(errors) => Outcome::Failed(errors),
    }
}

/// Help listing every command with its one-line summary
pub fn global_help() -> String {
    let mut help = String::from(
        "Usage: argot [--json] [--debug] [--no-color] <command> [args...]\n\nCommands:\n",
    );
    for kind in CommandKind::VARIANTS {
        let summary = command_info(*kind)
            .help()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .nth(1)
            .unwrap_or_default();
        help.push_str(&format!("  {:<10}{}\n", kind.name(), summary));
    }
    help.push_str("\nGlobal options must come before the command name.");
    help.push_str("\nRun 'argot <command> --help' for command options.");
    help
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CopyMode, ListFormat};

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn global_help_explains_option_placement() {
        let help = global_help();
        assert!(help.starts_with("Usage: argot [--json] [--debug] [--no-color] <command>"));
        assert!(help.contains("Global options must come before the command name."));
    }

    #[test]
    fn routes_to_the_named_command() {
        let outcome = dispatch(&args(&["copy", "a", "b", "--mode", "verify"]));
        match outcome.value().unwrap() {
            ParsedCommand::Copy(request) => assert_eq!(request.mode, CopyMode::Verify),
            other => panic!("unexpected command: {:?}", other),
        }

        let outcome = dispatch(&args(&["list", "--format", "table"]));
        match outcome.value().unwrap() {
            ParsedCommand::List(request) => assert_eq!(request.format, ListFormat::Table),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_command_lists_the_known_ones() {
        let outcome = dispatch(&args(&["move", "a", "b"]));
        assert_eq!(
            outcome.errors().unwrap().messages(),
            ["Unknown command: Cannot parse 'move', expected one of: copy, list, batch, version"]
        );
    }

    #[test]
    fn command_help_wins_over_missing_arguments() {
        let outcome = dispatch(&args(&["copy", "--help"]));
        assert_eq!(outcome.help(), Some(command_info(CommandKind::Copy).help()));
    }

    #[test]
    fn empty_command_line_shows_global_help() {
        let help = dispatch(&[]).help().map(str::to_string).unwrap();
        assert!(help.contains("copy      Copy a file or directory."));
        assert!(help.contains("batch     Run every command listed in a TOML batch file:"));
    }
}
