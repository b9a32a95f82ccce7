//! The three-way result of parsing a command.

use std::fmt;

use crate::helpers::format_errors;

/// Ordered, non-empty list of parse error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors {
    messages: Vec<String>,
}

impl ParseErrors {
    /// `None` when there is nothing to report
    pub fn new(messages: Vec<String>) -> Option<Self> {
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self { messages: vec![message.into()] }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true for a list built through `new` or `single`
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True if any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|message| message.contains(needle))
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_errors(&self.messages))
    }
}

impl std::error::Error for ParseErrors {}

/// Parsed value, help request, or the errors that prevented parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Parsed(T),
    Help(String),
    Failed(ParseErrors),
}

impl<T> Outcome<T> {
    /// Transform the parsed value; help and errors pass through
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Parsed(value) => Outcome::Parsed(f(value)),
            Outcome::Help(help) => Outcome::Help(help),
            Outcome::Failed(errors) => Outcome::Failed(errors),
        }
    }

    /// Chain a step that may itself produce help or errors.
    ///
    /// `f` is only called for a parsed value.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Parsed(value) => f(value),
            Outcome::Help(help) => Outcome::Help(help),
            Outcome::Failed(errors) => Outcome::Failed(errors),
        }
    }

    /// Split into `(value, help, errors)`; exactly one slot is populated.
    pub fn into_parts(self) -> (Option<T>, Option<String>, Option<ParseErrors>) {
        match self {
            Outcome::Parsed(value) => (Some(value), None, None),
            Outcome::Help(help) => (None, Some(help), None),
            Outcome::Failed(errors) => (None, None, Some(errors)),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Outcome::Parsed(_))
    }

    pub fn is_help(&self) -> bool {
        matches!(self, Outcome::Help(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Parsed(value) => Some(value),
            _ => None,
        }
    }

    pub fn help(&self) -> Option<&str> {
        match self {
            Outcome::Help(help) => Some(help),
            _ => None,
        }
    }

    pub fn errors(&self) -> Option<&ParseErrors> {
        match self {
            Outcome::Failed(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_only_touches_parsed_values() {
        assert_eq!(Outcome::Parsed(2).map(|v| v * 10), Outcome::Parsed(20));
        assert_eq!(
            Outcome::<i32>::Help("usage".into()).map(|v| v * 10),
            Outcome::Help("usage".into())
        );
        let failed = Outcome::<i32>::Failed(ParseErrors::single("bad"));
        assert_eq!(failed.clone().map(|v| v * 10), Outcome::Failed(ParseErrors::single("bad")));
    }

    #[test]
    fn and_then_short_circuits() {
        let mut calls = 0;
        let help = Outcome::<i32>::Help("usage".into()).and_then(|v| {
            calls += 1;
            Outcome::Parsed(v)
        });
        assert!(help.is_help());

        let failed = Outcome::<i32>::Failed(ParseErrors::single("bad")).and_then(|v| {
            calls += 1;
            Outcome::Parsed(v)
        });
        assert!(failed.is_failed());
        assert_eq!(calls, 0);

        let chained = Outcome::Parsed(1).and_then(|_| Outcome::<u8>::Help("nested".into()));
        assert_eq!(chained.help(), Some("nested"));
    }

    #[test]
    fn into_parts_populates_one_slot() {
        assert_eq!(Outcome::Parsed(3).into_parts(), (Some(3), None, None));
        assert_eq!(Outcome::<u8>::Help("h".into()).into_parts(), (None, Some("h".to_string()), None));

        let (value, help, errors) = Outcome::<u8>::Failed(ParseErrors::single("e")).into_parts();
        assert!(value.is_none() && help.is_none());
        assert_eq!(errors.unwrap().messages(), ["e"]);
    }

    #[test]
    fn empty_error_list_is_not_a_failure() {
        assert!(ParseErrors::new(Vec::new()).is_none());
    }

    #[test]
    fn display_uses_error_formatting() {
        let errors = ParseErrors::new(vec!["one".into(), "two\nthree".into()]).unwrap();
        assert_eq!(errors.to_string(), "ERROR: one\nERROR: two\n       three");
        assert!(errors.contains("thr"));
        assert_eq!(errors.len(), 2);
    }
}
