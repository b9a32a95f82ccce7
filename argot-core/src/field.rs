//! Field references into raw command records.
//!
//! A [`Field`] is an explicit getter/setter pair for exactly one slot of a
//! record. Slots are either plain `Option<T>` (genuinely optional values) or
//! [`Defaulted<T>`] (always readable, but still remembers whether the user
//! supplied the value).

use serde::{Serialize, Serializer};
use std::fmt;

/// A storage slot inside a raw command record.
pub trait Slot {
    type Value;

    /// The value supplied by a binder, if any
    fn current(&self) -> Option<&Self::Value>;

    /// Store a value produced by a binder
    fn fill(&mut self, value: Self::Value);
}

impl<T> Slot for Option<T> {
    type Value = T;

    fn current(&self) -> Option<&T> {
        self.as_ref()
    }

    fn fill(&mut self, value: T) {
        *self = Some(value);
    }
}

/// A value that is always populated, either by the user or by a fallback
/// fixed when the record is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaulted<T> {
    supplied: Option<T>,
    fallback: T,
}

impl<T> Defaulted<T> {
    pub fn new(fallback: T) -> Self {
        Self { supplied: None, fallback }
    }

    /// Effective value: the supplied one, else the fallback
    pub fn get(&self) -> &T {
        self.supplied.as_ref().unwrap_or(&self.fallback)
    }

    pub fn supplied(&self) -> Option<&T> {
        self.supplied.as_ref()
    }

    pub fn is_supplied(&self) -> bool {
        self.supplied.is_some()
    }

    pub fn supply(&mut self, value: T) {
        self.supplied = Some(value);
    }

    pub fn into_inner(self) -> T {
        self.supplied.unwrap_or(self.fallback)
    }
}

impl<T: Default> Default for Defaulted<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Slot for Defaulted<T> {
    type Value = T;

    fn current(&self) -> Option<&T> {
        self.supplied()
    }

    fn fill(&mut self, value: T) {
        self.supply(value);
    }
}

impl<T: Serialize> Serialize for Defaulted<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

/// Reference to one settable field of a raw command record `R`.
///
/// Setting follows value semantics: the record is taken by value and the
/// updated record is returned.
pub struct Field<R, T> {
    name: &'static str,
    get: fn(&R) -> Option<&T>,
    set: fn(R, T) -> R,
}

impl<R, T> Field<R, T> {
    pub const fn new(name: &'static str, get: fn(&R) -> Option<&T>, set: fn(R, T) -> R) -> Self {
        Self { name, get, set }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<'a>(&self, record: &'a R) -> Option<&'a T> {
        (self.get)(record)
    }

    pub fn set(&self, record: R, value: T) -> R {
        (self.set)(record, value)
    }

    pub fn is_set(&self, record: &R) -> bool {
        self.get(record).is_some()
    }
}

impl<R, T> Clone for Field<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for Field<R, T> {}

impl<R, T> fmt::Debug for Field<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

/// Build a [`Field`] for a named slot of a record.
///
/// ```
/// use argot_core::{field, Defaulted};
///
/// #[derive(Default)]
/// struct Greet {
///     name: Option<String>,
///     times: Defaulted<u32>,
/// }
///
/// let name = field!(Greet, name);
/// let times = field!(Greet, times);
/// let record = times.set(name.set(Greet::default(), "ada".to_string()), 3);
/// assert_eq!(record.name.as_deref(), Some("ada"));
/// assert_eq!(*record.times.get(), 3);
/// ```
#[macro_export]
macro_rules! field {
    ($record:ty, $name:ident) => {
        $crate::Field::new(
            stringify!($name),
            |record: &$record| $crate::Slot::current(&record.$name),
            |mut record: $record, value| {
                $crate::Slot::fill(&mut record.$name, value);
                record
            },
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Record {
        path: Option<String>,
        depth: Defaulted<u32>,
    }

    #[test]
    fn option_slot_starts_absent() {
        let path = field!(Record, path);
        let record = Record::default();
        assert!(!path.is_set(&record));
        assert_eq!(path.name(), "path");

        let record = path.set(record, "/tmp".to_string());
        assert_eq!(path.get(&record).map(String::as_str), Some("/tmp"));
    }

    #[test]
    fn defaulted_slot_reads_fallback_until_supplied() {
        let depth = field!(Record, depth);
        let record = Record { depth: Defaulted::new(2), ..Record::default() };

        assert_eq!(*record.depth.get(), 2);
        assert!(!depth.is_set(&record));

        let record = depth.set(record, 5);
        assert_eq!(*record.depth.get(), 5);
        assert!(record.depth.is_supplied());
        assert_eq!(record.depth.clone().into_inner(), 5);
    }

    #[test]
    fn defaulted_serializes_effective_value() {
        let mut value = Defaulted::new(1u8);
        assert_eq!(serde_json::to_string(&value).unwrap(), "1");
        value.supply(9);
        assert_eq!(serde_json::to_string(&value).unwrap(), "9");
    }
}
