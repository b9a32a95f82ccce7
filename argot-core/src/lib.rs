//! Core parsing engine for argot.
//!
//! This crate turns a flat list of command-line tokens into a typed "raw
//! command" record, a help message, or a list of human-readable errors.
//! Commands are described declaratively: a [`CommandRegistry`] binds option
//! flags and ordered positional slots to fields of the record through
//! [`FieldBinder`]s, and the token loop in [`CommandRegistry::parse`] drives
//! them.

mod error;
mod tokens;
mod field;
mod binder;
mod helpers;
mod registry;
mod parser;
mod outcome;

// Re-export core types
pub use error::{ArgotError, FieldError, FieldResult, Result};
pub use tokens::Tokens;
pub use field::{Defaulted, Field, Slot};
pub use binder::{Binder, FieldBinder};
pub use helpers::{
    collect_values, enum_option, enum_positional, format_errors, option_value,
    parse_enum_by_name, parse_from_str, parsed_option, parsed_positional,
    trailing_positional, true_bool_flag, value_option, value_positional, NamedEnum,
};
pub use registry::{CommandInfo, CommandRegistry, RawCommand, RegistryBuilder, HELP_FLAGS};
pub use outcome::{Outcome, ParseErrors};
pub use parser::ParseReport;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
