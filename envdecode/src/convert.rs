//! Conversion of raw strings into typed values
//!
//! Conversion dispatches on a closed set of declared shapes, [`Kind`]. A
//! raw string is first turned into a [`Value`] according to the kind, then
//! the concrete Rust type takes the value apart in [`Leaf::from_value`].
//!
//! | Kind       | Rust types                                  | Raw format                |
//! |------------|---------------------------------------------|---------------------------|
//! | `String`   | `String`, `PathBuf`                         | verbatim                  |
//! | `Int`      | `i8`..`i128`, `isize`, `u8`..`u128`, `usize`| base 10                   |
//! | `Float`    | `f32`, `f64`                                | decimal or scientific     |
//! | `Bool`     | `bool`                                      | `1 t true 0 f false`      |
//! | `Time`     | `OffsetDateTime`, `SystemTime`              | RFC 3339                  |
//! | `Duration` | `Duration`                                  | `300ms`, `1m30s`          |
//! | `Seq`      | `Vec<T>`                                    | `a,b,c`                   |
//! | `Map`      | `HashMap<String, V>`, `BTreeMap<String, V>` | `k1=v1,k2=v2`             |
//! | `Custom`   | any `T: UnmarshalEnv + Default`             | handed to the type        |

use crate::duration::{self, DurationError};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Boxed error returned by [`UnmarshalEnv`] implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Separator between sequence elements and between map entries.
pub const ITEM_SEPARATOR: char = ',';

/// Separator between a map entry's key and value.
pub const ENTRY_SEPARATOR: char = '=';

/// Declared shape of a leaf field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    String,
    Int { signed: bool, bits: u32 },
    Float { bits: u32 },
    Bool,
    Time,
    Duration,
    Seq(Box<Kind>),
    Map(Box<Kind>),
    Custom,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::String => f.write_str("string"),
            Kind::Int { signed: true, bits } => write!(f, "i{bits}"),
            Kind::Int { signed: false, bits } => write!(f, "u{bits}"),
            Kind::Float { bits } => write!(f, "f{bits}"),
            Kind::Bool => f.write_str("bool"),
            Kind::Time => f.write_str("RFC 3339 timestamp"),
            Kind::Duration => f.write_str("duration"),
            Kind::Seq(elem) => write!(f, "sequence of {elem}"),
            Kind::Map(elem) => write!(f, "map of string to {elem}"),
            Kind::Custom => f.write_str("custom value"),
        }
    }
}

/// A converted value, shaped after the [`Kind`] it was converted for.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i128),
    Uint(u128),
    Float(f64),
    Bool(bool),
    Time(OffsetDateTime),
    Duration(Duration),
    Seq(Vec<Value>),
    /// Entries in input order; later duplicates win when collected.
    Map(Vec<(String, Value)>),
    /// Raw input left for a custom [`UnmarshalEnv`] implementation.
    Raw(String),
}

/// Reasons a raw string could not be converted.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid integer {raw:?}: {source}")]
    Int { raw: String, source: ParseIntError },

    #[error("{raw} does not fit in {kind}")]
    OutOfRange { raw: String, kind: Kind },

    #[error("invalid float {raw:?}: {source}")]
    Float { raw: String, source: ParseFloatError },

    #[error("invalid boolean {raw:?}")]
    Bool { raw: String },

    #[error("invalid RFC 3339 timestamp {raw:?}: {source}")]
    Time {
        raw: String,
        source: time::error::Parse,
    },

    #[error("invalid duration {raw:?}: {source}")]
    Duration { raw: String, source: DurationError },

    #[error("map entry {entry:?} has no '='")]
    MissingSeparator { entry: String },

    #[error("{kind} has no string encoding")]
    Unsupported { kind: Kind },

    #[error("converted value does not match {expected}")]
    Mismatch { expected: Kind },

    #[error(transparent)]
    Custom(BoxError),
}

/// Convert `raw` according to `kind`.
pub fn convert(raw: &str, kind: &Kind) -> Result<Value, ConvertError> {
    match kind {
        Kind::String => Ok(Value::String(raw.to_owned())),
        Kind::Int { signed: true, bits } => {
            let value: i128 = raw.parse().map_err(|source| ConvertError::Int {
                raw: raw.to_owned(),
                source,
            })?;
            if *bits < 128 {
                let max = (1i128 << (bits - 1)) - 1;
                if value > max || value < -max - 1 {
                    return Err(out_of_range(raw, kind));
                }
            }
            Ok(Value::Int(value))
        }
        Kind::Int { signed: false, bits } => {
            let value: u128 = raw.parse().map_err(|source| ConvertError::Int {
                raw: raw.to_owned(),
                source,
            })?;
            if *bits < 128 && value >> bits != 0 {
                return Err(out_of_range(raw, kind));
            }
            Ok(Value::Uint(value))
        }
        Kind::Float { bits: 32 } => raw
            .parse::<f32>()
            .map(|value| Value::Float(f64::from(value)))
            .map_err(|source| ConvertError::Float {
                raw: raw.to_owned(),
                source,
            }),
        Kind::Float { .. } => raw
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|source| ConvertError::Float {
                raw: raw.to_owned(),
                source,
            }),
        Kind::Bool => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| ConvertError::Bool { raw: raw.to_owned() }),
        Kind::Time => OffsetDateTime::parse(raw, &Rfc3339)
            .map(Value::Time)
            .map_err(|source| ConvertError::Time {
                raw: raw.to_owned(),
                source,
            }),
        Kind::Duration => duration::parse(raw)
            .map(Value::Duration)
            .map_err(|source| ConvertError::Duration {
                raw: raw.to_owned(),
                source,
            }),
        Kind::Seq(elem) => {
            ensure_scalar(elem)?;
            if raw.is_empty() {
                return Ok(Value::Seq(Vec::new()));
            }
            raw.split(ITEM_SEPARATOR)
                .map(|item| convert(item, elem))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Seq)
        }
        Kind::Map(elem) => {
            ensure_scalar(elem)?;
            if raw.is_empty() {
                return Ok(Value::Map(Vec::new()));
            }
            raw.split(ITEM_SEPARATOR)
                .map(|entry| -> Result<(String, Value), ConvertError> {
                    let (key, value) = entry.split_once(ENTRY_SEPARATOR).ok_or_else(|| {
                        ConvertError::MissingSeparator {
                            entry: entry.to_owned(),
                        }
                    })?;
                    Ok((key.to_owned(), convert(value, elem)?))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Map)
        }
        Kind::Custom => Ok(Value::Raw(raw.to_owned())),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

/// Containers cannot nest: their separators would be ambiguous.
fn ensure_scalar(elem: &Kind) -> Result<(), ConvertError> {
    match elem {
        Kind::Seq(_) | Kind::Map(_) => Err(ConvertError::Unsupported { kind: elem.clone() }),
        _ => Ok(()),
    }
}

fn out_of_range(raw: &str, kind: &Kind) -> ConvertError {
    ConvertError::OutOfRange {
        raw: raw.to_owned(),
        kind: kind.clone(),
    }
}

fn mismatch<T: Leaf>() -> ConvertError {
    ConvertError::Mismatch {
        expected: T::kind(),
    }
}

/// A type decoded directly from a single raw string.
pub trait Leaf: Sized {
    /// The declared shape used to convert the raw string.
    fn kind() -> Kind;

    /// Build a value from the output of [`convert`].
    fn from_value(value: Value) -> Result<Self, ConvertError>;

    /// Overwrite `self` with a converted value.
    fn assign(&mut self, value: Value) -> Result<(), ConvertError> {
        *self = Self::from_value(value)?;
        Ok(())
    }
}

/// Custom parsing hook, taking precedence over built-in conversion.
///
/// ```rust
/// use envdecode::{BoxError, UnmarshalEnv};
///
/// #[derive(Default)]
/// struct Hex(i64);
///
/// impl UnmarshalEnv for Hex {
///     fn unmarshal_env(&mut self, raw: &str) -> Result<(), BoxError> {
///         self.0 = i64::from_str_radix(raw, 16)?;
///         Ok(())
///     }
/// }
/// ```
pub trait UnmarshalEnv {
    /// Parse `raw` into `self`.
    fn unmarshal_env(&mut self, raw: &str) -> Result<(), BoxError>;
}

impl<T: UnmarshalEnv + Default> Leaf for T {
    fn kind() -> Kind {
        Kind::Custom
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        let mut decoded = Self::default();
        decoded.assign(value)?;
        Ok(decoded)
    }

    fn assign(&mut self, value: Value) -> Result<(), ConvertError> {
        match value {
            Value::Raw(raw) => self.unmarshal_env(&raw).map_err(ConvertError::Custom),
            _ => Err(mismatch::<Self>()),
        }
    }
}

macro_rules! impl_int_leaf {
    ($variant:ident, $signed:expr, $($ty:ty),*) => {$(
        impl Leaf for $ty {
            fn kind() -> Kind {
                Kind::Int { signed: $signed, bits: <$ty>::BITS }
            }

            fn from_value(value: Value) -> Result<Self, ConvertError> {
                match value {
                    Value::$variant(v) => <$ty>::try_from(v).map_err(|_| ConvertError::OutOfRange {
                        raw: v.to_string(),
                        kind: Self::kind(),
                    }),
                    _ => Err(mismatch::<Self>()),
                }
            }
        }
    )*};
}

impl_int_leaf!(Int, true, i8, i16, i32, i64, i128, isize);
impl_int_leaf!(Uint, false, u8, u16, u32, u64, u128, usize);

impl Leaf for f32 {
    fn kind() -> Kind {
        Kind::Float { bits: 32 }
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            // Parsed at 32-bit precision, so narrowing back is exact.
            Value::Float(v) => Ok(v as f32),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Leaf for f64 {
    fn kind() -> Kind {
        Kind::Float { bits: 64 }
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Float(v) => Ok(v),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Leaf for bool {
    fn kind() -> Kind {
        Kind::Bool
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Bool(v) => Ok(v),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Leaf for String {
    fn kind() -> Kind {
        Kind::String
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::String(v) => Ok(v),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Leaf for PathBuf {
    fn kind() -> Kind {
        Kind::String
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::String(v) => Ok(PathBuf::from(v)),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Leaf for OffsetDateTime {
    fn kind() -> Kind {
        Kind::Time
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Time(v) => Ok(v),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Leaf for SystemTime {
    fn kind() -> Kind {
        Kind::Time
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Time(v) => Ok(SystemTime::from(v)),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl Leaf for Duration {
    fn kind() -> Kind {
        Kind::Duration
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Duration(v) => Ok(v),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl<T: Leaf> Leaf for Vec<T> {
    fn kind() -> Kind {
        Kind::Seq(Box::new(T::kind()))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Seq(items) => items.into_iter().map(T::from_value).collect(),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl<V: Leaf, S: BuildHasher + Default> Leaf for HashMap<String, V, S> {
    fn kind() -> Kind {
        Kind::Map(Box::new(V::kind()))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| -> Result<(String, V), ConvertError> {
                    Ok((key, V::from_value(value)?))
                })
                .collect(),
            _ => Err(mismatch::<Self>()),
        }
    }
}

impl<V: Leaf> Leaf for BTreeMap<String, V> {
    fn kind() -> Kind {
        Kind::Map(Box::new(V::kind()))
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| -> Result<(String, V), ConvertError> {
                    Ok((key, V::from_value(value)?))
                })
                .collect(),
            _ => Err(mismatch::<Self>()),
        }
    }
}
