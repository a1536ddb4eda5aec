//! Decode environment variables into arbitrarily nested structs
//!
//! `envdecode` fills the fields of a struct from key/value pairs, by default
//! the process environment. Each field is read from a key derived from its
//! name, an optional explicit override and a shared prefix. Nested structs,
//! `Option` fields, sequences, maps and custom types are supported.
//!
//! # Features
//!
//! - **Declarative**: Automatic implementation with `#[derive(EnvDecode)]`
//! - **Nested structs**: Each level extends the prefix (`APP_DB_HOST`), or
//!   merges into its parent with `#[env(flatten)]`
//! - **Optional sections**: `Option<T>` stays `None` unless one of its keys is set
//! - **Missing keys are not errors**: Absent variables leave fields untouched
//! - **Custom types**: Implement [`UnmarshalEnv`] or pass a deserializer function
//! - **Pluggable sources**: Decode from any [`Source`], such as a `HashMap` in tests
//!
//! # Value Parsing
//!
//! - Strings: `DATABASE_URL=postgres://localhost/db`
//! - Numbers (base 10, range checked): `MAX_CONNECTIONS=42`
//! - Booleans: `DEBUG=true` (`1`, `t`, `true`, `0`, `f`, `false`, any case)
//! - Timestamps (RFC 3339): `STARTED_AT=2021-01-02T15:04:05Z`
//! - Durations: `TIMEOUT=1m30s`
//! - Sequences: `HOSTS=a,b,c`
//! - Maps: `LABELS=env=prod,team=core`
//!
//! # Example
//!
//! ```rust
//! use envdecode::{Decoder, EnvDecode};
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, EnvDecode)]
//! struct Database {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, EnvDecode)]
//! struct Config {
//!     database: Database,
//!     timeout: Duration,
//!     replica: Option<Database>,
//! }
//!
//! let env = HashMap::from([
//!     ("MYAPP_DATABASE_HOST".to_string(), "db.internal".to_string()),
//!     ("MYAPP_DATABASE_PORT".to_string(), "5432".to_string()),
//!     ("MYAPP_TIMEOUT".to_string(), "1m30s".to_string()),
//! ]);
//!
//! let mut config = Config::default();
//! Decoder::new(&env).with_prefix("MYAPP").decode(&mut config).unwrap();
//!
//! assert_eq!(config.database.host, "db.internal");
//! assert_eq!(config.database.port, 5432);
//! assert_eq!(config.timeout, Duration::from_secs(90));
//! assert!(config.replica.is_none());
//! ```
//!
//! # Attributes
//!
//! ## `#[env(prefix = "MYAPP")]`
//!
//! Struct-level prefix used by [`EnvDecode::from_env`].
//!
//! ```rust
//! use envdecode::EnvDecode;
//!
//! #[derive(Debug, Default, EnvDecode)]
//! #[env(prefix = "MYAPP")]
//! struct Config {
//!     port: u16,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("MYAPP_PORT", "3000");
//! let config = Config::from_env()?;
//! assert_eq!(config.port, 3000);
//! #     Ok(())
//! # }
//! ```
//!
//! ## `#[env(name = "CUSTOM_NAME")]`
//!
//! Use the given key segment verbatim instead of the field name.
//!
//! ```rust
//! # use envdecode::EnvDecode;
//! #[derive(Default, EnvDecode)]
//! pub struct Config {
//!     // Load from REDIS_URL (or {PREFIX}_REDIS_URL)
//!     #[env(name = "REDIS_URL")]
//!     pub redis_connection_string: String,
//! }
//! ```
//!
//! ## `#[env(split_words)]`
//!
//! Insert `_` at camel-case word boundaries: `FOOCapitalized` becomes
//! `FOO_CAPITALIZED`. Snake case field names already contain their
//! separators and are unaffected.
//!
//! ## `#[env(flatten)]`
//!
//! Decode a nested struct without adding its own segment to the prefix.
//!
//! ```rust
//! # use envdecode::EnvDecode;
//! #[derive(Default, EnvDecode)]
//! struct Tls {
//!     cert_path: String,
//! }
//!
//! #[derive(Default, EnvDecode)]
//! struct Server {
//!     // Reads CERT_PATH rather than TLS_CERT_PATH
//!     #[env(flatten)]
//!     tls: Tls,
//! }
//! ```
//!
//! ## `#[env(skip)]`
//!
//! Never look the field up. Fields holding trait objects (`Box<dyn Any>`) are
//! always skipped.
//!
//! ## `#[env(deserializer = "function")]`
//!
//! Parse the raw value with `fn(&str) -> Result<T, E>` where `E: Display`:
//! - JSON: `#[env(deserializer = "serde_json::from_str")]`
//! - Custom: Define your own deserializer function

#[doc(hidden)]
pub mod de;

pub mod convert;
pub mod duration;
pub mod key;

mod decoder;
mod error;
mod source;

pub use convert::{BoxError, UnmarshalEnv};
pub use decoder::{Decoder, EnvDecode};
pub use envdecode_derive::EnvDecode;
pub use error::Error;
pub use source::{Source, System};

// Re-export for generated code and `from_env`
#[doc(hidden)]
pub use anyhow;
