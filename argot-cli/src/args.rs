//! Global options that precede the command name.

use std::sync::OnceLock;

use argot_core::{field, true_bool_flag, CommandRegistry, RawCommand};

use crate::dispatch::global_help;

/// Options for the `argot` binary itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    /// Print parsed commands as JSON
    pub json: Option<bool>,

    /// Enable verbose debug output
    pub debug: Option<bool>,

    /// Disable colored output
    pub no_color: Option<bool>,
}

impl RawCommand for GlobalOptions {
    type Kind = ();

    fn registry() -> &'static CommandRegistry<Self, ()> {
        static REGISTRY: OnceLock<CommandRegistry<GlobalOptions, ()>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            CommandRegistry::builder((), global_help())
                .option("--json", true_bool_flag(field!(GlobalOptions, json)))
                .option("--debug", true_bool_flag(field!(GlobalOptions, debug)))
                .option("--no-color", true_bool_flag(field!(GlobalOptions, no_color)))
                .build()
                .expect("global option registry is well formed")
        })
    }
}

impl GlobalOptions {
    pub fn json(&self) -> bool {
        self.json.unwrap_or(false)
    }

    pub fn debug(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    pub fn color(&self) -> bool {
        !self.no_color.unwrap_or(false)
    }
}

/// Split the command line into leading global flags and the command part.
///
/// Everything from the first token not starting with '-' belongs to the
/// command.
pub fn split_global(args: &[String]) -> (&[String], &[String]) {
    let boundary = args
        .iter()
        .position(|arg| !arg.starts_with('-'))
        .unwrap_or(args.len());
    args.split_at(boundary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argot_core::Outcome;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn split_stops_at_command_name() {
        let line = args(&["--json", "--debug", "copy", "--force", "a"]);
        let (global, command) = split_global(&line);
        assert_eq!(global, ["--json", "--debug"]);
        assert_eq!(command, ["copy", "--force", "a"]);
    }

    #[test]
    fn parses_global_flags() {
        let options = GlobalOptions::parse_args(["--no-color", "--json"]);
        let options = options.value().unwrap();
        assert!(options.json());
        assert!(!options.debug());
        assert!(!options.color());
    }

    #[test]
    fn global_help_lists_commands() {
        let outcome = GlobalOptions::parse_args(["--help"]);
        assert!(matches!(outcome, Outcome::Help(ref help) if help.contains("Commands:")));
    }

    #[test]
    fn unknown_global_flag_is_rejected() {
        let outcome = GlobalOptions::parse_args(["--verbose"]);
        assert_eq!(outcome.errors().unwrap().messages(), ["Unknown argument '--verbose'"]);
    }
}
