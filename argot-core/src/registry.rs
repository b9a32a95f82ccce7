//! Per-command parser registries.
//!
//! A registry holds the static facts about one command (help text, kind,
//! whether it may appear in a config file) plus the binders for its option
//! flags and its positional slots. Registries are built once and shared
//! read-only by every parse call.

use std::collections::HashMap;
use std::fmt;

use crate::binder::Binder;
use crate::error::{ArgotError, Result};
use crate::outcome::Outcome;

/// Tokens that always request help
pub const HELP_FLAGS: [&str; 2] = ["-h", "--help"];

/// Immutable static information about a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo<K> {
    help: String,
    kind: K,
    allowed_in_config: bool,
}

impl<K> CommandInfo<K> {
    pub fn new(kind: K, help: impl Into<String>, allowed_in_config: bool) -> Self {
        Self {
            help: help.into(),
            kind,
            allowed_in_config,
        }
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn allowed_in_config(&self) -> bool {
        self.allowed_in_config
    }
}

type BoxedBinder<R> = Box<dyn Binder<R>>;

/// Declarative parser for raw command records of type `R`.
pub struct CommandRegistry<R, K> {
    pub(crate) info: CommandInfo<K>,
    pub(crate) options: HashMap<String, BoxedBinder<R>>,
    pub(crate) positionals: Vec<BoxedBinder<R>>,
}

impl<R, K> CommandRegistry<R, K> {
    /// Assemble a registry from already-collected parts.
    ///
    /// No validation happens here; the map enforces flag uniqueness. Use
    /// [`CommandRegistry::builder`] to get duplicate and reserved-flag checks.
    pub fn new(
        info: CommandInfo<K>,
        options: HashMap<String, BoxedBinder<R>>,
        positionals: Vec<BoxedBinder<R>>,
    ) -> Self {
        Self {
            info,
            options,
            positionals,
        }
    }

    pub fn builder(kind: K, help: impl Into<String>) -> RegistryBuilder<R, K> {
        RegistryBuilder {
            kind,
            help: help.into(),
            allowed_in_config: false,
            options: Vec::new(),
            positionals: Vec::new(),
        }
    }

    pub fn info(&self) -> &CommandInfo<K> {
        &self.info
    }

    pub fn option(&self, flag: &str) -> Option<&dyn Binder<R>> {
        self.options.get(flag).map(|binder| binder.as_ref())
    }

    pub fn positional(&self, index: usize) -> Option<&dyn Binder<R>> {
        self.positionals.get(index).map(|binder| binder.as_ref())
    }

    /// Registered option flags, sorted
    pub fn option_flags(&self) -> Vec<&str> {
        let mut flags: Vec<&str> = self.options.keys().map(String::as_str).collect();
        flags.sort_unstable();
        flags
    }

    pub fn positional_count(&self) -> usize {
        self.positionals.len()
    }
}

impl<R, K: fmt::Debug> fmt::Debug for CommandRegistry<R, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positionals: Vec<&str> = self.positionals.iter().map(|b| b.field_name()).collect();
        f.debug_struct("CommandRegistry")
            .field("info", &self.info)
            .field("options", &self.option_flags())
            .field("positionals", &positionals)
            .finish()
    }
}

/// Validating builder for [`CommandRegistry`].
pub struct RegistryBuilder<R, K> {
    kind: K,
    help: String,
    allowed_in_config: bool,
    options: Vec<(String, BoxedBinder<R>)>,
    positionals: Vec<BoxedBinder<R>>,
}

impl<R, K> RegistryBuilder<R, K> {
    pub fn allowed_in_config(mut self, allowed: bool) -> Self {
        self.allowed_in_config = allowed;
        self
    }

    /// Bind an option flag
    pub fn option(mut self, flag: impl Into<String>, binder: impl Binder<R> + 'static) -> Self {
        self.options.push((flag.into(), Box::new(binder)));
        self
    }

    /// Bind the next positional slot; slots are filled in call order
    pub fn positional(mut self, binder: impl Binder<R> + 'static) -> Self {
        self.positionals.push(Box::new(binder));
        self
    }

    pub fn build(self) -> Result<CommandRegistry<R, K>> {
        let mut options = HashMap::with_capacity(self.options.len());

        for (flag, binder) in self.options {
            if HELP_FLAGS.contains(&flag.as_str()) {
                return Err(ArgotError::ReservedFlag(flag));
            }
            if flag.len() < 2 || !flag.starts_with('-') {
                return Err(ArgotError::InvalidFlag(flag));
            }
            if options.contains_key(&flag) {
                return Err(ArgotError::DuplicateOption(flag));
            }
            options.insert(flag, binder);
        }

        Ok(CommandRegistry::new(
            CommandInfo::new(self.kind, self.help, self.allowed_in_config),
            options,
            self.positionals,
        ))
    }
}

/// A raw command record with a process-wide registry.
///
/// Implementors usually keep the registry in a `std::sync::OnceLock`.
pub trait RawCommand: Default + Sized + 'static {
    type Kind: 'static;

    fn registry() -> &'static CommandRegistry<Self, Self::Kind>;

    /// Parse `args` starting from `Self::default()`
    fn parse_args<I, S>(args: I) -> Outcome<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::registry().parse(args)
    }

    fn info() -> &'static CommandInfo<Self::Kind> {
        Self::registry().info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field;
    use crate::helpers::{true_bool_flag, value_positional};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Touch,
    }

    #[derive(Debug, Default)]
    struct Touch {
        path: Option<String>,
        quiet: Option<bool>,
    }

    fn builder() -> RegistryBuilder<Touch, Kind> {
        CommandRegistry::builder(Kind::Touch, "touch <path> [--quiet]")
    }

    #[test]
    fn builder_records_static_info() {
        let registry = builder()
            .allowed_in_config(true)
            .option("--quiet", true_bool_flag(field!(Touch, quiet)))
            .option("-q", true_bool_flag(field!(Touch, quiet)))
            .positional(value_positional(field!(Touch, path)))
            .build()
            .unwrap();

        assert_eq!(registry.info().help(), "touch <path> [--quiet]");
        assert_eq!(registry.info().kind(), &Kind::Touch);
        assert!(registry.info().allowed_in_config());
        assert_eq!(registry.option_flags(), vec!["--quiet", "-q"]);
        assert_eq!(registry.positional_count(), 1);
        assert_eq!(registry.positional(0).map(|b| b.field_name()), Some("path"));
        assert!(registry.option("--loud").is_none());
    }

    #[test]
    fn builder_defaults_to_not_allowed_in_config() {
        let registry = builder().build().unwrap();
        assert!(!registry.info().allowed_in_config());
    }

    #[test]
    fn duplicate_flag_is_rejected() {
        let err = builder()
            .option("--quiet", true_bool_flag(field!(Touch, quiet)))
            .option("--quiet", true_bool_flag(field!(Touch, quiet)))
            .build()
            .unwrap_err();
        assert_eq!(err, ArgotError::DuplicateOption("--quiet".to_string()));
    }

    #[test]
    fn help_flags_are_reserved() {
        let err = builder()
            .option("-h", true_bool_flag(field!(Touch, quiet)))
            .build()
            .unwrap_err();
        assert_eq!(err, ArgotError::ReservedFlag("-h".to_string()));
    }

    #[test]
    fn flags_must_look_like_flags() {
        for flag in ["quiet", "-", ""] {
            let err = builder()
                .option(flag, true_bool_flag(field!(Touch, quiet)))
                .build()
                .unwrap_err();
            assert_eq!(err, ArgotError::InvalidFlag(flag.to_string()));
        }
    }
}
