//! Error types for environment variable decoding

use crate::convert::{ConvertError, Kind};

/// Errors that can occur while decoding environment variables into a struct.
///
/// A missing environment variable is never an error: the field keeps its
/// current value. Every error aborts the decode call; fields decoded before
/// the failure keep their new values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The decode target is not a mutable reference to a structure.
    #[error("cannot decode into {type_name}: target is not a mutable reference to a struct")]
    NotAddressable {
        /// Type that was passed as the decode target
        type_name: String,
    },

    /// The value of an environment variable could not be converted.
    ///
    /// Covers built-in conversions, `UnmarshalEnv` implementations and
    /// `#[env(deserializer = "...")]` functions alike.
    #[error("failed to convert environment variable '{key}' to {type_name}: {source}")]
    ConversionFailed {
        /// Name of the environment variable being converted
        key: String,
        /// Fully qualified type name that conversion was attempted for
        type_name: String,
        /// Underlying conversion failure
        source: ConvertError,
    },

    /// The field's type has no string encoding.
    #[error("environment variable '{key}' cannot be decoded into {type_name}: {kind} has no string encoding")]
    UnsupportedType {
        /// Name of the environment variable derived for the field
        key: String,
        /// Fully qualified type name of the field
        type_name: String,
        /// The shape that has no encoding
        kind: Kind,
    },

    /// Two fields derive the same environment variable name.
    #[error("environment variable '{key}' is claimed by more than one field")]
    DuplicateKey {
        /// The colliding environment variable name
        key: String,
    },
}

impl Error {
    /// Create a not-addressable error for the target type `T`.
    pub fn not_addressable<T: ?Sized>() -> Self {
        Self::NotAddressable {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    /// Wrap a conversion failure for the field of type `T` read from `key`.
    #[doc(hidden)]
    pub fn conversion<T: ?Sized>(key: impl Into<String>, error: ConvertError) -> Self {
        let key = key.into();
        let type_name = std::any::type_name::<T>().to_string();
        match error {
            ConvertError::Unsupported { kind } => Self::UnsupportedType {
                key,
                type_name,
                kind,
            },
            source => Self::ConversionFailed {
                key,
                type_name,
                source,
            },
        }
    }

    /// Create a conversion error from a custom deserializer's message.
    #[doc(hidden)]
    pub fn deserialize_error<T: ?Sized>(key: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::conversion::<T>(key, ConvertError::Custom(message.to_string().into()))
    }

    /// The environment variable the error refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::NotAddressable { .. } => None,
            Self::ConversionFailed { key, .. }
            | Self::UnsupportedType { key, .. }
            | Self::DuplicateKey { key } => Some(key),
        }
    }
}
