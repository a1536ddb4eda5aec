//! Key/value sources the decoder reads from

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::hash::BuildHasher;

/// A source of raw string values, looked up by exact, case-sensitive key.
///
/// [`System`] reads the process environment. In-memory maps implement the
/// trait as well, which keeps tests independent of global state.
pub trait Source {
    /// Returns the value stored under `key`, or `None` if it is absent.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct System;

impl Source for System {
    fn lookup(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                tracing::warn!(key, "ignoring environment variable with non UTF-8 value");
                None
            }
        }
    }
}

impl<S: BuildHasher> Source for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: Source + ?Sized> Source for &T {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}
