//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates decoding attributes from structs and
//! their fields during macro expansion.

use syn::{Attribute, Field, LitStr};

/// Parsed `#[env(...)]` attributes from the struct itself.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prefix used by the generated `from_env()`.
    pub prefix: Option<String>,
}

impl StructAttrs {
    /// Extract and parse `#[env(...)]` attributes placed on the struct.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // prefix = "..."
                if meta.path.is_ident("prefix") {
                    let value: LitStr = meta.value()?.parse()?;
                    parsed.prefix = Some(value.value());
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(parsed)
    }
}

/// Parsed `#[env(...)]` attributes from a struct field.
///
/// Represents the per-field configuration record consulted while the
/// generated code walks the struct.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Explicit key segment, used verbatim.
    ///
    /// If `None`, the field name is upper-cased.
    pub name: Option<String>,

    /// Insert `_` at camel-case word boundaries of the field name.
    pub split_words: bool,

    /// Decode a nested struct under the parent's prefix.
    pub flatten: bool,

    /// Never look the field up.
    pub skip: bool,

    /// Custom deserializer function path (e.g., `"serde_json::from_str"`).
    ///
    /// When specified, bypasses built-in conversion and uses this function instead.
    pub deserializer: Option<syn::Path>,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Attributes other than `env` are left to other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.name = Some(value.value());
                    return Ok(());
                }

                if meta.path.is_ident("split_words") {
                    attrs.split_words = true;
                    return Ok(());
                }

                if meta.path.is_ident("flatten") {
                    attrs.flatten = true;
                    return Ok(());
                }

                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                // deserializer = "function::path"
                if meta.path.is_ident("deserializer") {
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.deserializer = Some(value.parse()?);
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        if attrs.flatten && attrs.deserializer.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "flatten applies to nested structs and cannot be combined with deserializer",
            ));
        }

        Ok(attrs)
    }
}
