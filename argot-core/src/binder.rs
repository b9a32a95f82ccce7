//! Field binders: one record field paired with its token-consuming parser.

use crate::error::{FieldError, FieldResult};
use crate::field::Field;
use crate::tokens::Tokens;

/// Type-erased binder stored in a command registry.
///
/// The value type of the bound field is hidden; all the loop sees is
/// "consume the token (and possibly lookahead) and hand back the record".
pub trait Binder<R>: Send + Sync {
    /// Run the parse function and return the updated record together with
    /// the field's failure, if any. On failure the record is returned as it
    /// came in.
    fn consume(&self, record: R, token: &str, rest: &mut Tokens) -> (R, Option<FieldError>);

    /// Name of the bound field, used for diagnostics
    fn field_name(&self) -> &'static str;
}

type ParseFn<T> = Box<dyn Fn(&str, &mut Tokens) -> FieldResult<T> + Send + Sync>;

/// Binder for a field of type `T` inside record `R`.
///
/// Every constructor collapses to the canonical `(token, rest) -> result`
/// parse function.
pub struct FieldBinder<R, T> {
    field: Field<R, T>,
    parse: ParseFn<T>,
}

impl<R, T> FieldBinder<R, T> {
    /// Parse function sees both the current token and the remaining tokens
    pub fn new<F>(field: Field<R, T>, parse: F) -> Self
    where
        F: Fn(&str, &mut Tokens) -> FieldResult<T> + Send + Sync + 'static,
    {
        Self { field, parse: Box::new(parse) }
    }

    /// Parse function ignores its input entirely
    pub fn constant<F>(field: Field<R, T>, produce: F) -> Self
    where
        F: Fn() -> FieldResult<T> + Send + Sync + 'static,
    {
        Self::new(field, move |_, _| produce())
    }

    /// Parse function only reads the tokens after the current one
    pub fn lookahead<F>(field: Field<R, T>, parse: F) -> Self
    where
        F: Fn(&mut Tokens) -> FieldResult<T> + Send + Sync + 'static,
    {
        Self::new(field, move |_, rest| parse(rest))
    }

    /// Parse function only reads the current token
    pub fn token<F>(field: Field<R, T>, parse: F) -> Self
    where
        F: Fn(&str) -> FieldResult<T> + Send + Sync + 'static,
    {
        Self::new(field, move |token, _| parse(token))
    }

    pub fn field(&self) -> &Field<R, T> {
        &self.field
    }
}

impl<R, T> Binder<R> for FieldBinder<R, T> {
    fn consume(&self, record: R, token: &str, rest: &mut Tokens) -> (R, Option<FieldError>) {
        match (self.parse)(token, rest) {
            Ok(value) => (self.field.set(record, value), None),
            Err(err) => (record, Some(err)),
        }
    }

    fn field_name(&self) -> &'static str {
        self.field.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field;

    #[derive(Debug, Default, PartialEq)]
    struct Record {
        count: Option<u32>,
        words: Option<Vec<String>>,
    }

    #[test]
    fn token_shape_reads_current_token() {
        let binder = FieldBinder::token(field!(Record, count), |t| {
            t.parse::<u32>().map_err(|e| FieldError::new(e.to_string()))
        });
        let mut rest = Tokens::new(["untouched"]);
        let (record, err) = binder.consume(Record::default(), "7", &mut rest);
        assert_eq!(record.count, Some(7));
        assert!(err.is_none());
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn lookahead_shape_consumes_following_tokens() {
        let binder = FieldBinder::lookahead(field!(Record, words), |rest| {
            Ok(rest.drain_while(|t| !t.starts_with('-')))
        });
        let mut rest = Tokens::new(["a", "b", "--next"]);
        let (record, _) = binder.consume(Record::default(), "--words", &mut rest);
        assert_eq!(record.words, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(rest.peek(), Some("--next"));
    }

    #[test]
    fn failure_keeps_previous_record() {
        let binder = FieldBinder::constant(field!(Record, count), || Err(FieldError::new("nope")));
        let start = Record { count: Some(1), words: None };
        let (record, err) = binder.consume(start, "--count", &mut Tokens::default());
        assert_eq!(record.count, Some(1));
        assert_eq!(err.map(|e| e.to_string()), Some("nope".to_string()));
        assert_eq!(binder.field_name(), "count");
    }
}
