use std::fmt;

use tracing::{debug, trace};

use crate::Codec;
use crate::error::CoerceResult;
use crate::value::{Mapping, Value};

/// The result of resolving one field against a document mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome<T> {
    /// A present, non-null value that coerced successfully.
    Value(T),
    /// An optional field that is missing or explicitly null.
    Absent,
    /// The field's default, substituted for a missing, null or malformed value.
    Default(T),
}

impl<T> FieldOutcome<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldOutcome::Absent)
    }

    pub fn is_default(&self) -> bool {
        matches!(self, FieldOutcome::Default(_))
    }

    /// Drops the distinction between a decoded value and a default.
    pub fn into_option(self) -> Option<T> {
        match self {
            FieldOutcome::Value(v) | FieldOutcome::Default(v) => Some(v),
            FieldOutcome::Absent => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldOutcome<U> {
        match self {
            FieldOutcome::Value(v) => FieldOutcome::Value(f(v)),
            FieldOutcome::Absent => FieldOutcome::Absent,
            FieldOutcome::Default(v) => FieldOutcome::Default(f(v)),
        }
    }
}

/// Static metadata for one field: the keys it may appear under, whether it
/// may be logically absent, and how to produce its default.
///
/// The first alias is the canonical key and is the only one written on
/// encode. On decode the aliases are tried in order and the first one
/// present in the document is used, even if its value then fails to coerce.
///
/// Defaults are provider functions so every decode gets a fresh instance.
pub struct FieldDescriptor<T> {
    aliases: &'static [&'static str],
    optional: bool,
    default: Option<fn() -> T>,
}

impl<T> FieldDescriptor<T> {
    /// A field that always resolves to a concrete value.
    ///
    /// # Panics
    ///
    /// Panics if `aliases` is empty. In a `static` or `const` this is a
    /// compile-time error.
    pub const fn new(aliases: &'static [&'static str], default: fn() -> T) -> Self {
        assert!(!aliases.is_empty(), "a field needs at least one alias");
        FieldDescriptor {
            aliases,
            optional: false,
            default: Some(default),
        }
    }

    /// A field that decodes as absent when it is missing, null or malformed.
    ///
    /// # Panics
    ///
    /// Panics if `aliases` is empty.
    pub const fn optional(aliases: &'static [&'static str]) -> Self {
        assert!(!aliases.is_empty(), "a field needs at least one alias");
        FieldDescriptor {
            aliases,
            optional: true,
            default: None,
        }
    }

    /// Gives an optional field a fallback for missing or malformed values.
    ///
    /// An explicit null still decodes as absent.
    pub const fn with_fallback(self, default: fn() -> T) -> Self {
        FieldDescriptor {
            default: Some(default),
            ..self
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    /// The key this field is written under.
    pub fn canonical_key(&self) -> &'static str {
        self.aliases[0]
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Produces a fresh default, if the field has one.
    pub fn default_value(&self) -> Option<T> {
        self.default.map(|default| default())
    }

    /// Finds the first alias present in `document`.
    pub fn lookup<'a>(&self, document: &'a Mapping) -> Option<(&'static str, &'a Value)> {
        self.aliases
            .iter()
            .find_map(|alias| document.get(*alias).map(|value| (*alias, value)))
    }

    /// Resolves this field against `document` using the type's [`Codec`].
    pub fn resolve(&self, document: &Mapping) -> FieldOutcome<T>
    where
        T: Codec,
    {
        self.resolve_with(document, T::decode_value)
    }

    /// Resolves this field against `document`, converting the candidate value
    /// with `decode`.
    ///
    /// This never fails: every path ends in a value, a default or absence.
    pub fn resolve_with(
        &self,
        document: &Mapping,
        decode: impl FnOnce(&Value) -> CoerceResult<T>,
    ) -> FieldOutcome<T> {
        let Some((alias, value)) = self.lookup(document) else {
            trace!(field = self.canonical_key(), "field missing");
            return self.missing();
        };

        if value.is_null() {
            trace!(field = self.canonical_key(), alias, "field is null");
            return if self.optional {
                FieldOutcome::Absent
            } else {
                self.fallback()
            };
        }

        match decode(value) {
            Ok(decoded) => FieldOutcome::Value(decoded),
            Err(err) => {
                debug!(
                    field = self.canonical_key(),
                    alias,
                    error = %err,
                    "field value rejected, falling back"
                );
                self.fallback()
            }
        }
    }

    /// Writes `value` under the canonical key, or nothing for an absent field.
    pub fn encode_into(&self, output: &mut Mapping, value: Option<Value>) {
        if let Some(value) = value {
            output.insert(self.canonical_key().to_owned(), value);
        }
    }

    fn missing(&self) -> FieldOutcome<T> {
        if self.optional && self.default.is_none() {
            FieldOutcome::Absent
        } else {
            self.fallback()
        }
    }

    fn fallback(&self) -> FieldOutcome<T> {
        match self.default_value() {
            Some(value) => FieldOutcome::Default(value),
            None => FieldOutcome::Absent,
        }
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldDescriptor<T> {}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("aliases", &self.aliases)
            .field("optional", &self.optional)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}
