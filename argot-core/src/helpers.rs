//! Reusable binder constructors and error formatting.

use std::fmt::Display;
use std::str::FromStr;

use crate::binder::FieldBinder;
use crate::error::{FieldError, FieldResult};
use crate::field::Field;
use crate::registry::HELP_FLAGS;
use crate::tokens::Tokens;

const ERROR_PREFIX: &str = "ERROR: ";

/// A finite value domain whose members can be named on the command line.
pub trait NamedEnum: Sized + Copy + Send + Sync + 'static {
    /// Every member, in declaration order
    const VARIANTS: &'static [Self];

    fn name(&self) -> &'static str;
}

/// Presence-only switch: always succeeds with `true`, consumes nothing.
pub fn true_bool_flag<R>(field: Field<R, bool>) -> FieldBinder<R, bool> {
    FieldBinder::constant(field, || Ok(true))
}

/// Match `token` against the names of `E`.
///
/// The failure lists every legal name in declaration order.
pub fn parse_enum_by_name<E: NamedEnum>(token: &str) -> FieldResult<E> {
    E::VARIANTS
        .iter()
        .copied()
        .find(|variant| variant.name() == token)
        .ok_or_else(|| {
            let legal = E::VARIANTS
                .iter()
                .map(|variant| variant.name())
                .collect::<Vec<_>>()
                .join(", ");
            FieldError::new(format!("Cannot parse '{}', expected one of: {}", token, legal))
        })
}

/// Parse a token through `FromStr`, naming the token on failure
pub fn parse_from_str<T>(token: &str) -> FieldResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    token
        .parse()
        .map_err(|e| FieldError::new(format!("Cannot parse '{}': {}", token, e)))
}

/// Take the value token that follows an option flag.
///
/// A help flag is never taken as a value; it stays for the loop to see.
pub fn option_value(flag: &str, rest: &mut Tokens) -> FieldResult<String> {
    rest.next_if(|token| !HELP_FLAGS.contains(&token))
        .ok_or_else(|| FieldError::new(format!("Missing value for option '{}'", flag)))
}

/// `--flag VALUE` stored verbatim
pub fn value_option<R>(field: Field<R, String>) -> FieldBinder<R, String> {
    FieldBinder::new(field, option_value)
}

/// Positional slot stored verbatim
pub fn value_positional<R>(field: Field<R, String>) -> FieldBinder<R, String> {
    FieldBinder::token(field, |token| Ok(token.to_string()))
}

/// `--flag VALUE` converted through `FromStr`
pub fn parsed_option<R, T>(field: Field<R, T>) -> FieldBinder<R, T>
where
    T: FromStr,
    T::Err: Display,
{
    FieldBinder::new(field, |flag, rest| {
        let raw = option_value(flag, rest)?;
        parse_from_str(&raw)
    })
}

/// Positional slot converted through `FromStr`
pub fn parsed_positional<R, T>(field: Field<R, T>) -> FieldBinder<R, T>
where
    T: FromStr,
    T::Err: Display,
{
    FieldBinder::token(field, |token| parse_from_str(token))
}

/// `--flag NAME` resolved against a [`NamedEnum`]
pub fn enum_option<R, E: NamedEnum>(field: Field<R, E>) -> FieldBinder<R, E> {
    FieldBinder::new(field, |flag, rest| {
        let raw = option_value(flag, rest)?;
        parse_enum_by_name(&raw)
    })
}

/// Positional slot resolved against a [`NamedEnum`]
pub fn enum_positional<R, E: NamedEnum>(field: Field<R, E>) -> FieldBinder<R, E> {
    FieldBinder::token(field, |token| parse_enum_by_name(token))
}

/// `--flag A B C`: every following token up to the next one starting with
/// '-'. At least one value is required.
pub fn collect_values<R>(field: Field<R, Vec<String>>) -> FieldBinder<R, Vec<String>> {
    FieldBinder::lookahead(field, |rest| {
        let values = rest.drain_while(|token| !token.starts_with('-'));
        if values.is_empty() {
            Err(FieldError::new("Expected one or more values"))
        } else {
            Ok(values)
        }
    })
}

/// Positional slot that also swallows the following plain tokens.
///
/// Stops at the first token starting with '-' so that options and help
/// flags after the list are still seen by the loop.
pub fn trailing_positional<R>(field: Field<R, Vec<String>>) -> FieldBinder<R, Vec<String>> {
    FieldBinder::new(field, |token, rest| {
        let mut values = vec![token.to_string()];
        values.extend(rest.drain_while(|next| !next.starts_with('-')));
        Ok(values)
    })
}

/// Join error messages into one block.
///
/// The first line of each message gets an `ERROR: ` prefix, continuation
/// lines are padded to the same width. Trailing newlines are dropped.
pub fn format_errors<S: AsRef<str>>(messages: &[S]) -> String {
    let padding = " ".repeat(ERROR_PREFIX.len());
    messages
        .iter()
        .map(|message| {
            message
                .as_ref()
                .trim_end_matches('\n')
                .split('\n')
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 {
                        format!("{}{}", ERROR_PREFIX, line)
                    } else {
                        format!("{}{}", padding, line)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
