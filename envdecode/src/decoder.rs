//! The decoder entry point and the trait implemented by `#[derive(EnvDecode)]`

use crate::de::Populator;
use crate::error::Error;
use crate::source::{Source, System};

/// A structure whose fields can be decoded from environment variables.
///
/// Implemented by `#[derive(EnvDecode)]`; there is rarely a reason to
/// implement it by hand.
pub trait EnvDecode: Sized {
    /// Prefix applied by [`EnvDecode::from_env`], set with `#[env(prefix = "...")]`.
    const PREFIX: &'static str = "";

    /// Decode every field under `prefix`. Returns whether any key was found.
    fn decode_fields(&mut self, populator: &mut Populator<'_>, prefix: &str) -> Result<bool, Error>;

    /// Load configuration from the process environment
    ///
    /// Starts from `Default::default()` and applies [`EnvDecode::PREFIX`].
    ///
    /// # Errors
    ///
    /// - Environment variable values cannot be converted into field types
    /// - Two fields derive the same environment variable name
    fn from_env() -> anyhow::Result<Self>
    where
        Self: Default,
    {
        let mut value = Self::default();
        Decoder::new(System)
            .with_prefix(Self::PREFIX)
            .decode(&mut value)?;
        Ok(value)
    }
}

/// Decodes environment variables from a [`Source`] into structures.
///
/// ```rust
/// use envdecode::{Decoder, EnvDecode};
/// use std::collections::HashMap;
///
/// #[derive(Debug, Default, EnvDecode)]
/// struct Config {
///     host: String,
///     port: u16,
/// }
///
/// let env = HashMap::from([
///     ("MYAPP_HOST".to_string(), "localhost".to_string()),
///     ("MYAPP_PORT".to_string(), "8080".to_string()),
/// ]);
///
/// let mut config = Config::default();
/// Decoder::new(&env).with_prefix("MYAPP").decode(&mut config).unwrap();
/// assert_eq!(config.host, "localhost");
/// assert_eq!(config.port, 8080);
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<S> {
    source: S,
    prefix: String,
}

impl<S: Source> Decoder<S> {
    /// Create a decoder without prefix.
    pub fn new(source: S) -> Self {
        Self {
            source,
            prefix: String::new(),
        }
    }

    /// Return a decoder reading every key under `prefix`.
    ///
    /// The prefix is joined to derived keys with `_`; an empty prefix
    /// disables prefixing.
    #[must_use]
    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        Self {
            source: self.source,
            prefix: prefix.into(),
        }
    }

    /// The active prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Decode into `target`, leaving fields without a matching key untouched.
    ///
    /// # Errors
    ///
    /// Fails on the first field whose value cannot be converted, or whose
    /// key is derived by another field too. Fields decoded before the
    /// failure keep their new values.
    pub fn decode<T: EnvDecode>(&self, target: &mut T) -> Result<(), Error> {
        tracing::debug!(
            target_type = std::any::type_name::<T>(),
            prefix = %self.prefix,
            "decoding environment"
        );
        let mut populator = Populator::new(&self.source);
        target.decode_fields(&mut populator, &self.prefix)?;
        Ok(())
    }

    /// Decode into a target that may be absent.
    ///
    /// # Errors
    ///
    /// [`Error::NotAddressable`] if `target` is `None`, otherwise as
    /// [`Decoder::decode`].
    pub fn decode_opt<T: EnvDecode>(&self, target: Option<&mut T>) -> Result<(), Error> {
        match target {
            Some(target) => self.decode(target),
            None => Err(Error::not_addressable::<T>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::de::{DecodeField, Field};
    use std::collections::BTreeMap;

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        left: String,
        right: u32,
    }

    // Hand-written equivalent of the derive output.
    impl EnvDecode for Pair {
        const PREFIX: &'static str = "PAIR";

        fn decode_fields(&mut self, populator: &mut Populator<'_>, prefix: &str) -> Result<bool, Error> {
            let mut found = false;
            let left = Field {
                prefix,
                name: "left",
                rename: None,
                split_words: false,
                flatten: false,
            };
            found |= self.left.decode_field(populator, &left)?;
            let right = Field { name: "right", ..left };
            found |= self.right.decode_field(populator, &right)?;
            Ok(found)
        }
    }

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_decode_with_prefix() {
        let source = env(&[("APP_LEFT", "l"), ("APP_RIGHT", "7")]);
        let mut pair = Pair::default();
        Decoder::new(&source).with_prefix("APP").decode(&mut pair).unwrap();
        assert_eq!(
            pair,
            Pair {
                left: "l".to_string(),
                right: 7
            }
        );
    }

    #[test]
    fn test_decode_without_prefix() {
        let source = env(&[("LEFT", "l"), ("APP_RIGHT", "7")]);
        let mut pair = Pair::default();
        Decoder::new(&source).decode(&mut pair).unwrap();
        assert_eq!(pair.left, "l");
        assert_eq!(pair.right, 0);
    }

    #[test]
    fn test_with_prefix_returns_new_decoder() {
        let source = env(&[]);
        let base = Decoder::new(&source);
        let prefixed = base.clone().with_prefix("APP");
        assert_eq!(base.prefix(), "");
        assert_eq!(prefixed.prefix(), "APP");
    }

    #[test]
    fn test_decode_opt_none_is_not_addressable() {
        let source = env(&[("LEFT", "l")]);
        let err = Decoder::new(&source).decode_opt::<Pair>(None).unwrap_err();
        match err {
            Error::NotAddressable { type_name } => assert!(type_name.contains("Pair")),
            other => panic!("Expected NotAddressable, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_opt_some() {
        let source = env(&[("LEFT", "l")]);
        let mut pair = Pair::default();
        Decoder::new(&source).decode_opt(Some(&mut pair)).unwrap();
        assert_eq!(pair.left, "l");
    }
}
