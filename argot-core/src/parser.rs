//! The token-consumption loop.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::binder::Binder;
use crate::outcome::{Outcome, ParseErrors};
use crate::registry::{CommandRegistry, HELP_FLAGS};
use crate::tokens::Tokens;

impl<R, K> CommandRegistry<R, K> {
    /// Parse `args` into a fresh `R::default()` record.
    pub fn parse<I, S>(&self, args: I) -> Outcome<R>
    where
        R: Default,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_with(R::default(), args)
    }

    /// Parse `args` on top of `initial`.
    ///
    /// Help flags win outright, discarding any errors seen so far. Field
    /// failures and duplicated options are collected and parsing goes on.
    /// A token that fits neither an option nor a free positional slot is
    /// reported and ends the loop, since later tokens can no longer be
    /// aligned with their slots.
    pub fn parse_with<I, S>(&self, initial: R, args: I) -> Outcome<R>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evaluate(initial, args).into_outcome()
    }

    /// Run the token loop and keep everything it produced.
    ///
    /// Unlike [`CommandRegistry::parse_with`] the record is returned even
    /// when errors were recorded.
    pub fn evaluate<I, S>(&self, initial: R, args: I) -> ParseReport<R>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rest = Tokens::new(args);
        let mut record = initial;
        let mut position = 0;
        let mut seen: HashSet<String> = HashSet::new();
        let mut errors: Vec<String> = Vec::new();

        debug!(tokens = rest.len(), "parsing command arguments");

        while let Some(token) = rest.next() {
            if HELP_FLAGS.contains(&token.as_str()) {
                debug!(discarded_errors = errors.len(), "help requested");
                return ParseReport {
                    record,
                    help: Some(self.info.help().to_string()),
                    errors: Vec::new(),
                };
            }

            let binder: &dyn Binder<R> = if let Some(binder) = self.options.get(&token) {
                if !seen.insert(token.clone()) {
                    debug!(option = %token, "duplicated option");
                    errors.push(format!("Duplicated option '{}'", token));
                }
                binder.as_ref()
            } else if let Some(binder) = self.positionals.get(position) {
                position += 1;
                binder.as_ref()
            } else {
                debug!(token = %token, "unknown argument, stopping");
                errors.push(format!("Unknown argument '{}'", token));
                break;
            };

            trace!(token = %token, field = binder.field_name(), "binding token");
            let (next, failure) = binder.consume(record, &token, &mut rest);
            record = next;
            if let Some(failure) = failure {
                debug!(field = binder.field_name(), error = %failure, "field rejected its input");
                errors.push(failure.to_string());
            }
        }

        debug!(errors = errors.len(), "command arguments consumed");
        ParseReport {
            record,
            help: None,
            errors,
        }
    }
}

/// Everything one run of the token loop produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport<R> {
    /// Record as left by the last binder that ran
    pub record: R,
    /// Help text, when a help flag ended the loop
    pub help: Option<String>,
    /// Messages in the order they were recorded; empty when help was requested
    pub errors: Vec<String>,
}

impl<R> ParseReport<R> {
    pub fn into_outcome(self) -> Outcome<R> {
        if let Some(help) = self.help {
            return Outcome::Help(help);
        }
        match ParseErrors::new(self.errors) {
            None => Outcome::Parsed(self.record),
            Some(errors) => Outcome::Failed(errors),
        }
    }
}
