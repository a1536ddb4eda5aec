//! Environment variable name derivation
//!
//! Every field is looked up under a single key built from three parts:
//! the active prefix, the field's name (or its explicit `name` override)
//! and the `split_words` flag.
//!
//! ```rust
//! use envdecode::key::derive_key;
//!
//! assert_eq!(derive_key("MYAPP", "SimpleInt", None, false), "MYAPP_SIMPLEINT");
//! assert_eq!(derive_key("MYAPP", "SplitWord", None, true), "MYAPP_SPLIT_WORD");
//! assert_eq!(derive_key("", "FOOCapitalized", None, true), "FOO_CAPITALIZED");
//! assert_eq!(derive_key("MYAPP", "port", Some("HTTP_PORT"), false), "MYAPP_HTTP_PORT");
//! ```

/// Separator between a prefix and a key segment, and between split words.
pub const SEPARATOR: char = '_';

/// Derive the full lookup key for a field.
pub fn derive_key(prefix: &str, name: &str, rename: Option<&str>, split_words: bool) -> String {
    join(prefix, &segment(name, rename, split_words))
}

/// Derive the key segment contributed by a single field.
///
/// A non-empty `rename` is used verbatim. Otherwise the name is upper-cased,
/// with word boundaries turned into `_` when `split_words` is set.
pub fn segment(name: &str, rename: Option<&str>, split_words: bool) -> String {
    match rename {
        Some(rename) if !rename.is_empty() => rename.to_owned(),
        _ if split_words => split_upper(name),
        _ => name.to_uppercase(),
    }
}

/// Join a key segment onto a prefix. An empty prefix yields the segment.
pub fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        return segment.to_owned();
    }
    let mut key = String::with_capacity(prefix.len() + 1 + segment.len());
    key.push_str(prefix);
    key.push(SEPARATOR);
    key.push_str(segment);
    key
}

/// Upper-case `name`, inserting `_` at camel-case word boundaries.
///
/// An uppercase letter starts a new word when it follows a lowercase letter
/// or a digit, or when it closes an acronym run (`FOOCapitalized`).
fn split_upper(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() && starts_word(chars[i - 1], chars.get(i + 1).copied()) {
            out.push(SEPARATOR);
        }
        out.extend(c.to_uppercase());
    }

    out
}

fn starts_word(prev: char, next: Option<char>) -> bool {
    if prev.is_lowercase() || prev.is_ascii_digit() {
        return true;
    }
    prev.is_uppercase() && next.is_some_and(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_without_split() {
        assert_eq!(segment("SimpleInt", None, false), "SIMPLEINT");
        assert_eq!(segment("simple_int", None, false), "SIMPLE_INT");
    }

    #[test]
    fn test_segment_with_split() {
        assert_eq!(segment("SplitWord", None, true), "SPLIT_WORD");
        assert_eq!(segment("StringSlice", None, true), "STRING_SLICE");
        assert_eq!(segment("CustomUnmarshal", None, true), "CUSTOM_UNMARSHAL");
    }

    #[test]
    fn test_split_acronym() {
        assert_eq!(segment("FOOCapitalized", None, true), "FOO_CAPITALIZED");
        assert_eq!(segment("HTTPServer", None, true), "HTTP_SERVER");
        assert_eq!(segment("ServerURL", None, true), "SERVER_URL");
        assert_eq!(segment("ID", None, true), "ID");
    }

    #[test]
    fn test_split_digits() {
        assert_eq!(segment("SimpleInt8", None, true), "SIMPLE_INT8");
        assert_eq!(segment("Http2Enabled", None, true), "HTTP2_ENABLED");
    }

    #[test]
    fn test_split_keeps_existing_underscores() {
        assert_eq!(segment("max_connections", None, true), "MAX_CONNECTIONS");
        assert_eq!(segment("Max_Connections", None, true), "MAX_CONNECTIONS");
    }

    #[test]
    fn test_rename_is_verbatim() {
        assert_eq!(segment("whatever", Some("explicit_lower_case"), true), "explicit_lower_case");
        assert_eq!(segment("whatever", Some("EXPLICIT_UPPER_CASE"), false), "EXPLICIT_UPPER_CASE");
    }

    #[test]
    fn test_empty_rename_falls_back_to_name() {
        assert_eq!(segment("SplitWord", Some(""), true), "SPLIT_WORD");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "PORT"), "PORT");
        assert_eq!(join("MYAPP", "PORT"), "MYAPP_PORT");
        assert_eq!(join("MYAPP_DB", "HOST"), "MYAPP_DB_HOST");
    }

    #[test]
    fn test_derive_key_is_deterministic() {
        let first = derive_key("MYAPP", "FOOCapitalized", None, true);
        let second = derive_key("MYAPP", "FOOCapitalized", None, true);
        assert_eq!(first, second);
        assert_eq!(first, "MYAPP_FOO_CAPITALIZED");
    }
}
