//! The remaining-token sequence handed to field binders.

use std::collections::VecDeque;

/// Tokens not yet consumed by the parsing loop.
///
/// Binders receive a mutable reference so they can take lookahead values
/// (`--depth 3` consumes `3` here). Whatever a binder leaves behind is seen
/// by the loop on its next iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    inner: VecDeque<String>,
}

impl Tokens {
    /// Create a token sequence from already shell-split arguments
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Look at the next token without consuming it
    pub fn peek(&self) -> Option<&str> {
        self.inner.front().map(String::as_str)
    }

    /// Consume the next token only if it satisfies `pred`
    pub fn next_if(&mut self, pred: impl FnOnce(&str) -> bool) -> Option<String> {
        let front = self.inner.front()?;
        if pred(front.as_str()) {
            self.inner.pop_front()
        } else {
            None
        }
    }

    /// Consume leading tokens for as long as `pred` holds
    pub fn drain_while(&mut self, mut pred: impl FnMut(&str) -> bool) -> Vec<String> {
        let mut taken = Vec::new();
        while let Some(token) = self.next_if(&mut pred) {
            taken.push(token);
        }
        taken
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.inner.into()
    }
}

impl Iterator for Tokens {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len(), Some(self.inner.len()))
    }
}

impl<S: Into<String>> FromIterator<S> for Tokens {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Tokens::new(iter)
    }
}
