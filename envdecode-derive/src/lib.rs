//! Derive macro implementation for envdecode

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// Check whether the type is `Option<T>`
fn is_option(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        return type_path
            .path
            .segments
            .last()
            .map(|seg| seg.ident == "Option")
            .unwrap_or(false);
    }
    false
}

/// Check whether the type holds a trait object anywhere (`Box<dyn Any>`,
/// `Option<Arc<dyn Trait>>`, ...). Such fields have no static type to
/// convert into and are never decoded.
fn is_dynamic(ty: &Type) -> bool {
    match ty {
        Type::TraitObject(_) => true,
        Type::Paren(inner) => is_dynamic(&inner.elem),
        Type::Group(inner) => is_dynamic(&inner.elem),
        Type::Ptr(inner) => is_dynamic(&inner.elem),
        Type::Reference(inner) => is_dynamic(&inner.elem),
        Type::Path(type_path) => type_path.path.segments.iter().any(|seg| match &seg.arguments {
            PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| match arg {
                GenericArgument::Type(inner) => is_dynamic(inner),
                _ => false,
            }),
            _ => false,
        }),
        _ => false,
    }
}

/// `EnvDecode` derive macro
///
/// Implements `envdecode::EnvDecode` (and the field-level decoding used
/// when the struct is nested in another one).
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX")]`: Prefix used by `from_env()`
///
/// **Field-level**:
/// - `#[env(name = "CUSTOM_NAME")]`: Explicit key segment, used verbatim
/// - `#[env(split_words)]`: Split camel-case words with `_`
/// - `#[env(flatten)]`: Decode a nested struct under the parent's prefix
/// - `#[env(skip)]`: Never decode this field
/// - `#[env(deserializer = "func")]`: Use custom deserializer function
///
/// The struct must implement `Default`.
///
/// # Example
///
/// See the `envdecode` crate documentation for usage examples.
#[proc_macro_derive(EnvDecode, attributes(env))]
pub fn derive_env_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    // Struct name
    let struct_name = &input.ident;

    // Parse struct-level attributes (prefix)
    let struct_attrs = StructAttrs::from_attrs(&input.attrs)?;
    let prefix = struct_attrs.prefix.unwrap_or_default();

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvDecode only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(input, "EnvDecode only supports structs"));
        }
    };

    // Generate one decoding step per field, in declaration order
    let mut steps = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = FieldAttrs::from_field(field)?;

        let name = ident.unraw().to_string();
        let rename = match &attrs.name {
            Some(name) => quote! { ::std::option::Option::Some(#name) },
            None => quote! { ::std::option::Option::None },
        };
        let split_words = attrs.split_words;
        let flatten = attrs.flatten;

        let descriptor = quote! {
            ::envdecode::de::Field {
                prefix: __prefix,
                name: #name,
                rename: #rename,
                split_words: #split_words,
                flatten: #flatten,
            }
        };

        let step = if attrs.skip || is_dynamic(&field.ty) {
            quote! {
                __populator.skip(&#descriptor);
            }
        } else if let Some(func) = &attrs.deserializer {
            if is_option(&field.ty) {
                quote! {
                    __found |= __populator.deserialize_optional_with(
                        &mut self.#ident,
                        &#descriptor,
                        |__raw: &str| #func(__raw),
                    )?;
                }
            } else {
                quote! {
                    __found |= __populator.deserialize_with(
                        &mut self.#ident,
                        &#descriptor,
                        |__raw: &str| #func(__raw),
                    )?;
                }
            }
        } else {
            quote! {
                __found |= ::envdecode::de::DecodeField::decode_field(
                    &mut self.#ident,
                    __populator,
                    &#descriptor,
                )?;
            }
        };
        steps.push(step);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envdecode::EnvDecode for #struct_name #ty_generics #where_clause {
            const PREFIX: &'static str = #prefix;

            #[allow(unused_mut)]
            fn decode_fields(
                &mut self,
                __populator: &mut ::envdecode::de::Populator<'_>,
                __prefix: &str,
            ) -> ::std::result::Result<bool, ::envdecode::Error> {
                let mut __found = false;
                #(#steps)*
                ::std::result::Result::Ok(__found)
            }
        }

        impl #impl_generics ::envdecode::de::DecodeField for #struct_name #ty_generics #where_clause {
            fn decode_field(
                &mut self,
                __populator: &mut ::envdecode::de::Populator<'_>,
                __field: &::envdecode::de::Field<'_>,
            ) -> ::std::result::Result<bool, ::envdecode::Error> {
                __populator.nested(self, __field)
            }

            fn decode_new(
                __populator: &mut ::envdecode::de::Populator<'_>,
                __field: &::envdecode::de::Field<'_>,
            ) -> ::std::result::Result<::std::option::Option<Self>, ::envdecode::Error> {
                __populator.new_nested(__field)
            }
        }
    })
}
