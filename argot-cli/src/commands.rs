//! Concrete commands understood by the `argot` binary.
//!
//! Each command has a raw record filled in by the engine and a validated
//! request type whose required fields are guaranteed to be present.

use std::sync::OnceLock;

use argot_core::{
    collect_values, enum_option, field, parsed_option, true_bool_flag, value_positional,
    CommandRegistry, Defaulted, NamedEnum, Outcome, ParseErrors, RawCommand,
};
use serde::Serialize;

/// Tag identifying each command; also the name typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Copy,
    List,
    Batch,
    Version,
}

impl NamedEnum for CommandKind {
    const VARIANTS: &'static [Self] = &[
        CommandKind::Copy,
        CommandKind::List,
        CommandKind::Batch,
        CommandKind::Version,
    ];

    fn name(&self) -> &'static str {
        match self {
            CommandKind::Copy => "copy",
            CommandKind::List => "list",
            CommandKind::Batch => "batch",
            CommandKind::Version => "version",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyMode {
    Fast,
    Safe,
    Verify,
}

impl NamedEnum for CopyMode {
    const VARIANTS: &'static [Self] = &[CopyMode::Fast, CopyMode::Safe, CopyMode::Verify];

    fn name(&self) -> &'static str {
        match self {
            CopyMode::Fast => "fast",
            CopyMode::Safe => "safe",
            CopyMode::Verify => "verify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    Plain,
    Json,
    Table,
}

impl NamedEnum for ListFormat {
    const VARIANTS: &'static [Self] = &[ListFormat::Plain, ListFormat::Json, ListFormat::Table];

    fn name(&self) -> &'static str {
        match self {
            ListFormat::Plain => "plain",
            ListFormat::Json => "json",
            ListFormat::Table => "table",
        }
    }
}

/// Report every missing required argument at once
fn require<T>(value: Option<T>, name: &str, missing: &mut Vec<String>) -> Option<T> {
    if value.is_none() {
        missing.push(format!("Missing required argument <{}>", name));
    }
    value
}

// ---------------------------------------------------------------- copy

pub const COPY_HELP: &str = "\
Usage: argot copy <source> <destination> [options]

Copy a file or directory.

Options:
  --mode <fast|safe|verify>   Copy strategy (default: safe)
  --retries <N>               Attempts before giving up (default: 3)
  --force                     Overwrite an existing destination
  -h, --help                  Show this help";

#[derive(Debug, Clone, PartialEq)]
pub struct CopyCommand {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub mode: Defaulted<CopyMode>,
    pub retries: Defaulted<u32>,
    pub force: Option<bool>,
}

impl Default for CopyCommand {
    fn default() -> Self {
        Self {
            source: None,
            destination: None,
            mode: Defaulted::new(CopyMode::Safe),
            retries: Defaulted::new(3),
            force: None,
        }
    }
}

impl RawCommand for CopyCommand {
    type Kind = CommandKind;

    fn registry() -> &'static CommandRegistry<Self, CommandKind> {
        static REGISTRY: OnceLock<CommandRegistry<CopyCommand, CommandKind>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            CommandRegistry::builder(CommandKind::Copy, COPY_HELP)
                .allowed_in_config(true)
                .option("--mode", enum_option(field!(CopyCommand, mode)))
                .option("--retries", parsed_option(field!(CopyCommand, retries)))
                .option("--force", true_bool_flag(field!(CopyCommand, force)))
                .positional(value_positional(field!(CopyCommand, source)))
                .positional(value_positional(field!(CopyCommand, destination)))
                .build()
                .expect("copy command registry is well formed")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopyRequest {
    pub source: String,
    pub destination: String,
    pub mode: CopyMode,
    pub retries: u32,
    pub force: bool,
}

impl CopyCommand {
    pub fn into_request(self) -> Outcome<CopyRequest> {
        let mut missing = Vec::new();
        let source = require(self.source, "source", &mut missing);
        let destination = require(self.destination, "destination", &mut missing);

        match (source, destination) {
            (Some(source), Some(destination)) => Outcome::Parsed(CopyRequest {
                source,
                destination,
                mode: self.mode.into_inner(),
                retries: self.retries.into_inner(),
                force: self.force.unwrap_or(false),
            }),
            _ => missing_arguments(missing),
        }
    }
}

// ---------------------------------------------------------------- list

pub const LIST_HELP: &str = "\
Usage: argot list [path] [options]

List the entries under a path (default: current directory).

Options:
  --format <plain|json|table>   Output layout (default: plain)
  --depth <N>                   Descend at most N levels
  --exclude <PATTERN>...        Skip entries matching any pattern
  --all                         Include hidden entries
  -h, --help                    Show this help";

#[derive(Debug, Clone, PartialEq)]
pub struct ListCommand {
    pub path: Option<String>,
    pub format: Defaulted<ListFormat>,
    pub depth: Option<u32>,
    pub exclude: Option<Vec<String>>,
    pub all: Option<bool>,
}

impl Default for ListCommand {
    fn default() -> Self {
        Self {
            path: None,
            format: Defaulted::new(ListFormat::Plain),
            depth: None,
            exclude: None,
            all: None,
        }
    }
}

impl RawCommand for ListCommand {
    type Kind = CommandKind;

    fn registry() -> &'static CommandRegistry<Self, CommandKind> {
        static REGISTRY: OnceLock<CommandRegistry<ListCommand, CommandKind>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            CommandRegistry::builder(CommandKind::List, LIST_HELP)
                .allowed_in_config(true)
                .option("--format", enum_option(field!(ListCommand, format)))
                .option("--depth", parsed_option(field!(ListCommand, depth)))
                .option("--exclude", collect_values(field!(ListCommand, exclude)))
                .option("--all", true_bool_flag(field!(ListCommand, all)))
                .positional(value_positional(field!(ListCommand, path)))
                .build()
                .expect("list command registry is well formed")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRequest {
    pub path: String,
    pub format: ListFormat,
    pub depth: Option<u32>,
    pub exclude: Vec<String>,
    pub all: bool,
}

impl ListCommand {
    pub fn into_request(self) -> Outcome<ListRequest> {
        Outcome::Parsed(ListRequest {
            path: self.path.unwrap_or_else(|| ".".to_string()),
            format: self.format.into_inner(),
            depth: self.depth,
            exclude: self.exclude.unwrap_or_default(),
            all: self.all.unwrap_or(false),
        })
    }
}

// ---------------------------------------------------------------- batch

pub const BATCH_HELP: &str = "\
Usage: argot batch <file>

Run every command listed in a TOML batch file:

  [[run]]
  args = [\"copy\", \"a.txt\", \"b.txt\", \"--force\"]

Batch files may not contain further batch commands.

Options:
  -h, --help   Show this help";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchCommand {
    pub file: Option<String>,
}

impl RawCommand for BatchCommand {
    type Kind = CommandKind;

    fn registry() -> &'static CommandRegistry<Self, CommandKind> {
        static REGISTRY: OnceLock<CommandRegistry<BatchCommand, CommandKind>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            CommandRegistry::builder(CommandKind::Batch, BATCH_HELP)
                .allowed_in_config(false)
                .positional(value_positional(field!(BatchCommand, file)))
                .build()
                .expect("batch command registry is well formed")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRequest {
    pub file: String,
}

impl BatchCommand {
    pub fn into_request(self) -> Outcome<BatchRequest> {
        let mut missing = Vec::new();
        match require(self.file, "file", &mut missing) {
            Some(file) => Outcome::Parsed(BatchRequest { file }),
            None => missing_arguments(missing),
        }
    }
}

// ---------------------------------------------------------------- version

pub const VERSION_HELP: &str = "\
Usage: argot version [--short]

Print version information.

Options:
  --short      Print only the version number
  -h, --help   Show this help";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionCommand {
    pub short: Option<bool>,
}

impl RawCommand for VersionCommand {
    type Kind = CommandKind;

    fn registry() -> &'static CommandRegistry<Self, CommandKind> {
        static REGISTRY: OnceLock<CommandRegistry<VersionCommand, CommandKind>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            CommandRegistry::builder(CommandKind::Version, VERSION_HELP)
                .allowed_in_config(true)
                .option("--short", true_bool_flag(field!(VersionCommand, short)))
                .build()
                .expect("version command registry is well formed")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionRequest {
    pub short: bool,
}

impl VersionCommand {
    pub fn into_request(self) -> Outcome<VersionRequest> {
        Outcome::Parsed(VersionRequest {
            short: self.short.unwrap_or(false),
        })
    }
}

// ----------------------------------------------------------------

/// A fully validated command, ready to run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum ParsedCommand {
    Copy(CopyRequest),
    List(ListRequest),
    Batch(BatchRequest),
    Version(VersionRequest),
}

impl ParsedCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            ParsedCommand::Copy(_) => CommandKind::Copy,
            ParsedCommand::List(_) => CommandKind::List,
            ParsedCommand::Batch(_) => CommandKind::Batch,
            ParsedCommand::Version(_) => CommandKind::Version,
        }
    }
}

fn missing_arguments<T>(missing: Vec<String>) -> Outcome<T> {
    match ParseErrors::new(missing) {
        Some(errors) => Outcome::Failed(errors),
        None => Outcome::Failed(ParseErrors::single("Missing required argument")),
    }
}
