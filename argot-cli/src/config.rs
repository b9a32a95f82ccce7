//! Batch files: TOML lists of command lines run in one go.
//!
//! Only commands whose static info allows it may appear in a batch file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use argot_core::Outcome;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::commands::ParsedCommand;
use crate::dispatch::{command_info, parse_command, resolve_kind};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read batch file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid batch file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Entry {index}: empty argument list")]
    EmptyEntry { index: usize },

    #[error("Entry {index}: command '{command}' is not allowed in a batch file")]
    NotAllowed { index: usize, command: String },

    #[error("Entry {index}: help is not a runnable command")]
    HelpInConfig { index: usize },

    #[error("Entry {index}:\n{message}")]
    Parse { index: usize, message: String },
}

#[derive(Debug, Deserialize)]
struct BatchFile {
    #[serde(default)]
    run: Vec<BatchEntry>,
}

#[derive(Debug, Deserialize)]
struct BatchEntry {
    args: Vec<String>,
}

/// Read and parse a batch file from disk
pub fn load_batch(path: &Path) -> Result<Vec<ParsedCommand>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded batch file");
    parse_batch(&content)
}

/// Parse batch file contents. Entries are numbered from 1 in errors.
pub fn parse_batch(content: &str) -> Result<Vec<ParsedCommand>, ConfigError> {
    let file: BatchFile = toml::from_str(content)?;
    let mut commands = Vec::with_capacity(file.run.len());

    for (i, entry) in file.run.iter().enumerate() {
        let index = i + 1;
        let Some((name, rest)) = entry.args.split_first() else {
            return Err(ConfigError::EmptyEntry { index });
        };

        let kind = resolve_kind(name).map_err(|errors| ConfigError::Parse {
            index,
            message: errors.to_string(),
        })?;
        if !command_info(kind).allowed_in_config() {
            return Err(ConfigError::NotAllowed {
                index,
                command: name.clone(),
            });
        }

        match parse_command(kind, rest) {
            Outcome::Parsed(command) => commands.push(command),
            Outcome::Help(_) => return Err(ConfigError::HelpInConfig { index }),
            Outcome::Failed(errors) => {
                return Err(ConfigError::Parse {
                    index,
                    message: errors.to_string(),
                })
            }
        }
    }

    debug!(commands = commands.len(), "batch file parsed");
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandKind, CopyMode};
    use std::io::Write;

    #[test]
    fn parses_every_entry_in_order() {
        let content = r#"
            [[run]]
            args = ["copy", "a.txt", "b.txt", "--mode", "fast"]

            [[run]]
            args = ["list", "--all"]

            [[run]]
            args = ["version"]
        "#;
        let commands = parse_batch(content).unwrap();
        let kinds: Vec<CommandKind> = commands.iter().map(ParsedCommand::kind).collect();
        assert_eq!(kinds, [CommandKind::Copy, CommandKind::List, CommandKind::Version]);
        match &commands[0] {
            ParsedCommand::Copy(request) => assert_eq!(request.mode, CopyMode::Fast),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn empty_file_is_an_empty_batch() {
        assert!(parse_batch("").unwrap().is_empty());
    }

    #[test]
    fn batch_inside_batch_is_rejected() {
        let content = r#"
            [[run]]
            args = ["version"]

            [[run]]
            args = ["batch", "other.toml"]
        "#;
        let err = parse_batch(content).unwrap_err();
        assert!(matches!(err, ConfigError::NotAllowed { index: 2, ref command } if command == "batch"));
    }

    #[test]
    fn help_entry_is_rejected() {
        let content = "[[run]]\nargs = [\"list\", \"-h\"]\n";
        assert!(matches!(parse_batch(content), Err(ConfigError::HelpInConfig { index: 1 })));
    }

    #[test]
    fn parse_errors_carry_formatted_messages() {
        let content = "[[run]]\nargs = [\"copy\", \"--mode\", \"slow\"]\n";
        let err = parse_batch(content).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Entry 1:\n\
             ERROR: Cannot parse 'slow', expected one of: fast, safe, verify"
        );
    }

    #[test]
    fn empty_entry_is_rejected() {
        let content = "[[run]]\nargs = []\n";
        assert!(matches!(parse_batch(content), Err(ConfigError::EmptyEntry { index: 1 })));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[run]]\nargs = [\"list\", \"src\"]").unwrap();
        let commands = load_batch(file.path()).unwrap();
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_batch(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
