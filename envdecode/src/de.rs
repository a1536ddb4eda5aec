//! Structure traversal used by `#[derive(EnvDecode)]` generated code

use crate::convert::{self, Leaf};
use crate::decoder::EnvDecode;
use crate::error::Error;
use crate::key;
use crate::source::Source;
use std::collections::HashSet;
use std::fmt::Display;

/// Description of one field at one step of the traversal.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    /// Prefix of the structure that owns the field
    pub prefix: &'a str,
    /// Declared field name
    pub name: &'static str,
    /// Explicit key segment from `#[env(name = "...")]`
    pub rename: Option<&'static str>,
    /// Split camel-case words with `_` (`#[env(split_words)]`)
    pub split_words: bool,
    /// Merge a nested structure into the parent's namespace (`#[env(flatten)]`)
    pub flatten: bool,
}

impl Field<'_> {
    /// The environment variable name this field is read from.
    pub fn key(&self) -> String {
        key::derive_key(self.prefix, self.name, self.rename, self.split_words)
    }

    /// The prefix for the fields of a nested structure stored in this field.
    pub fn nested_prefix(&self) -> String {
        if self.flatten && self.rename.is_none() {
            self.prefix.to_owned()
        } else {
            self.key()
        }
    }
}

/// A field type the populator knows how to fill.
///
/// Implemented for every [`Leaf`], for `Option<T>` of any implementor and,
/// through `#[derive(EnvDecode)]`, for structures.
pub trait DecodeField: Sized {
    /// Decode into the existing value. Returns whether any key was found.
    fn decode_field(&mut self, populator: &mut Populator<'_>, field: &Field<'_>) -> Result<bool, Error>;

    /// Build a fresh value, or `None` if no key was found.
    fn decode_new(populator: &mut Populator<'_>, field: &Field<'_>) -> Result<Option<Self>, Error>;
}

impl<T: Leaf> DecodeField for T {
    fn decode_field(&mut self, populator: &mut Populator<'_>, field: &Field<'_>) -> Result<bool, Error> {
        populator.leaf(self, field)
    }

    fn decode_new(populator: &mut Populator<'_>, field: &Field<'_>) -> Result<Option<Self>, Error> {
        populator.new_leaf(field)
    }
}

impl<T: DecodeField> DecodeField for Option<T> {
    fn decode_field(&mut self, populator: &mut Populator<'_>, field: &Field<'_>) -> Result<bool, Error> {
        match self {
            Some(value) => value.decode_field(populator, field),
            None => {
                *self = T::decode_new(populator, field)?;
                Ok(self.is_some())
            }
        }
    }

    fn decode_new(populator: &mut Populator<'_>, field: &Field<'_>) -> Result<Option<Self>, Error> {
        Ok(T::decode_new(populator, field)?.map(Some))
    }
}

/// Per-call traversal state.
pub struct Populator<'a> {
    source: &'a dyn Source,
    claimed: HashSet<String>,
}

impl<'a> Populator<'a> {
    pub(crate) fn new(source: &'a dyn Source) -> Self {
        Self {
            source,
            claimed: HashSet::new(),
        }
    }

    /// Decode the fields of a nested structure.
    pub fn nested<T: EnvDecode>(&mut self, value: &mut T, field: &Field<'_>) -> Result<bool, Error> {
        let prefix = field.nested_prefix();
        tracing::trace!(field = field.name, prefix = %prefix, "descending into nested struct");
        value.decode_fields(self, &prefix)
    }

    /// Build a nested structure from its default, keeping it only if any key was found.
    pub fn new_nested<T: EnvDecode + Default>(&mut self, field: &Field<'_>) -> Result<Option<T>, Error> {
        let mut value = T::default();
        Ok(self.nested(&mut value, field)?.then_some(value))
    }

    /// Decode a leaf value in place.
    pub fn leaf<T: Leaf>(&mut self, value: &mut T, field: &Field<'_>) -> Result<bool, Error> {
        let Some((key, raw)) = self.lookup(field)? else {
            return Ok(false);
        };
        convert::convert(&raw, &T::kind())
            .and_then(|converted| value.assign(converted))
            .map_err(|e| Error::conversion::<T>(key, e))?;
        Ok(true)
    }

    /// Build a leaf value, or `None` if its key is absent.
    pub fn new_leaf<T: Leaf>(&mut self, field: &Field<'_>) -> Result<Option<T>, Error> {
        let Some((key, raw)) = self.lookup(field)? else {
            return Ok(None);
        };
        convert::convert(&raw, &T::kind())
            .and_then(T::from_value)
            .map(Some)
            .map_err(|e| Error::conversion::<T>(key, e))
    }

    /// Decode a field with a user supplied parsing function.
    pub fn deserialize_with<T, E, F>(&mut self, value: &mut T, field: &Field<'_>, parse: F) -> Result<bool, Error>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: Display,
    {
        let Some((key, raw)) = self.lookup(field)? else {
            return Ok(false);
        };
        *value = parse(&raw).map_err(|e| Error::deserialize_error::<T>(key, e))?;
        Ok(true)
    }

    /// Decode an `Option<T>` field with a user supplied parsing function.
    pub fn deserialize_optional_with<T, E, F>(
        &mut self,
        value: &mut Option<T>,
        field: &Field<'_>,
        parse: F,
    ) -> Result<bool, Error>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: Display,
    {
        let Some((key, raw)) = self.lookup(field)? else {
            return Ok(false);
        };
        *value = Some(parse(&raw).map_err(|e| Error::deserialize_error::<T>(key, e))?);
        Ok(true)
    }

    /// Record a field that is never looked up.
    pub fn skip(&mut self, field: &Field<'_>) {
        tracing::trace!(field = field.name, "skipping field");
    }

    fn lookup(&mut self, field: &Field<'_>) -> Result<Option<(String, String)>, Error> {
        let key = field.key();
        if !self.claimed.insert(key.clone()) {
            return Err(Error::DuplicateKey { key });
        }

        match self.source.lookup(&key) {
            Some(raw) => {
                tracing::debug!(key = %key, "found environment variable");
                Ok(Some((key, raw)))
            }
            None => {
                tracing::trace!(key = %key, "environment variable not set");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn field<'a>(prefix: &'a str, name: &'static str) -> Field<'a> {
        Field {
            prefix,
            name,
            rename: None,
            split_words: false,
            flatten: false,
        }
    }

    #[test]
    fn test_leaf_present() {
        let env = source(&[("APP_PORT", "8080")]);
        let mut populator = Populator::new(&env);
        let mut port: u16 = 0;
        assert!(populator.leaf(&mut port, &field("APP", "port")).unwrap());
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_leaf_absent_keeps_value() {
        let env = source(&[]);
        let mut populator = Populator::new(&env);
        let mut port: u16 = 3000;
        assert!(!populator.leaf(&mut port, &field("APP", "port")).unwrap());
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_leaf_conversion_error_names_key() {
        let env = source(&[("APP_PORT", "eighty")]);
        let mut populator = Populator::new(&env);
        let mut port: u16 = 0;
        let err = populator.leaf(&mut port, &field("APP", "port")).unwrap_err();
        match err {
            Error::ConversionFailed { key, type_name, .. } => {
                assert_eq!(key, "APP_PORT");
                assert!(type_name.contains("u16"));
            }
            other => panic!("Expected ConversionFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_option_leaf() {
        let env = source(&[("TIMEOUT", "5s")]);
        let mut populator = Populator::new(&env);

        let mut timeout: Option<Duration> = None;
        assert!(timeout.decode_field(&mut populator, &field("", "timeout")).unwrap());
        assert_eq!(timeout, Some(Duration::from_secs(5)));

        let mut missing: Option<Duration> = None;
        assert!(!missing.decode_field(&mut populator, &field("", "missing")).unwrap());
        assert_eq!(missing, None);
    }

    #[test]
    fn test_duplicate_key() {
        let env = source(&[]);
        let mut populator = Populator::new(&env);
        let mut first = String::new();
        let mut second = String::new();
        populator.leaf(&mut first, &field("", "name")).unwrap();
        let err = populator.leaf(&mut second, &field("", "NAME")).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { ref key } if key == "NAME"));
    }

    #[test]
    fn test_deserialize_with() {
        let env = source(&[("TAGS", "a;b")]);
        let mut populator = Populator::new(&env);
        let mut tags: Vec<String> = Vec::new();
        let split = |raw: &str| -> Result<Vec<String>, String> { Ok(raw.split(';').map(String::from).collect()) };
        assert!(populator.deserialize_with(&mut tags, &field("", "tags"), split).unwrap());
        assert_eq!(tags, vec!["a", "b"]);
    }

    #[test]
    fn test_deserialize_with_error() {
        let env = source(&[("LEVEL", "loud")]);
        let mut populator = Populator::new(&env);
        let mut level: u8 = 0;
        let err = populator
            .deserialize_with(&mut level, &field("", "level"), |_: &str| Err::<u8, _>("unknown level"))
            .unwrap_err();
        assert!(matches!(err, Error::ConversionFailed { ref key, .. } if key == "LEVEL"));
        assert!(err.to_string().contains("unknown level"));
    }

    #[test]
    fn test_nested_prefix() {
        let mut nested = field("APP", "database");
        assert_eq!(nested.nested_prefix(), "APP_DATABASE");

        nested.flatten = true;
        assert_eq!(nested.nested_prefix(), "APP");

        nested.rename = Some("DB");
        assert_eq!(nested.nested_prefix(), "APP_DB");
    }
}
