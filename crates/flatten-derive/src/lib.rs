//! Derive macro for `kvlog_shared::Flatten`.
//!
//! Only `pub` fields are emitted. Field names are renamed to snake_case at
//! compile time, and each value goes through `FieldValue`, so nested records,
//! optional records and scalars are told apart by their declared types.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use std::collections::BTreeSet;
use syn::{Attribute, Data, DeriveInput, Field, Fields, LitStr, Path, Visibility};

/// Derive `kvlog_shared::Flatten` (and `FieldValue`) for a struct with named fields.
///
/// Container attribute:
/// - `#[flatten(crate = "path")]` overrides the path of the crate exporting
///   the flattening traits (default `::kvlog_shared`).
///
/// Field attributes:
/// - `#[flatten(rename = "key")]` sets the output key.
/// - `#[flatten(skip)]` omits the field.
/// - `#[flatten(serialize)]` converts the value through `serde_json::to_value`.
#[proc_macro_derive(Flatten, attributes(flatten))]
pub fn derive_flatten(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_flatten(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_flatten(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let krate = parse_crate_path(&input.attrs)?;
    let Data::Struct(struct_data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Flatten can only be derived for structs",
        ));
    };

    let fields: Vec<&Field> = match &struct_data.fields {
        Fields::Named(fields) => fields.named.iter().collect(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &struct_data.fields,
                "Flatten requires named fields",
            ));
        },
    };

    let mut seen = BTreeSet::new();
    let mut inserts = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_field_options(&field.attrs)?;
        if options.skip || !is_public(&field.vis) {
            continue;
        }

        let key = options
            .rename
            .unwrap_or_else(|| to_snake_case(&ident.to_string()));
        if !seen.insert(key.clone()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate flattened key `{key}`"),
            ));
        }

        let key = LitStr::new(&key, Span::call_site());
        let value = if options.serialize {
            quote! {
                #krate::serde_json::to_value(&self.#ident)
                    .unwrap_or(#krate::serde_json::Value::Null)
            }
        } else {
            quote! { #krate::FieldValue::to_field_value(&self.#ident) }
        };
        inserts.push(quote! {
            record.insert(::std::string::String::from(#key), #value);
        });
    }

    let body = if inserts.is_empty() {
        quote! { #krate::FlattenedRecord::new() }
    } else {
        quote! {
            let mut record = #krate::FlattenedRecord::new();
            #(#inserts)*
            record
        }
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics #krate::Flatten for #name #ty_generics #where_clause {
            fn flatten(&self) -> #krate::FlattenedRecord {
                #body
            }
        }

        impl #impl_generics #krate::FieldValue for #name #ty_generics #where_clause {
            fn to_field_value(&self) -> #krate::serde_json::Value {
                #krate::serde_json::Value::Object(#krate::Flatten::flatten(self))
            }
        }
    })
}

fn parse_crate_path(attrs: &[Attribute]) -> Result<Path, syn::Error> {
    let mut krate: Option<Path> = None;
    for attr in attrs {
        if !attr.path().is_ident("flatten") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let value: LitStr = meta.value()?.parse()?;
                if krate.is_some() {
                    return Err(meta.error("duplicate flatten(crate = ...)"));
                }
                krate = Some(value.parse()?);
                return Ok(());
            }
            Err(meta.error("unsupported flatten attribute on container"))
        })?;
    }

    Ok(krate.unwrap_or_else(|| syn::parse_quote!(::kvlog_shared)))
}

#[derive(Debug, Default)]
struct FieldOptions {
    rename: Option<String>,
    skip: bool,
    serialize: bool,
}

fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions, syn::Error> {
    let mut options = FieldOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("flatten") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                if options.rename.is_some() {
                    return Err(meta.error("duplicate flatten(rename = ...)"));
                }
                let key = value.value();
                if key.is_empty() {
                    return Err(meta.error("flatten(rename = ...) must not be empty"));
                }
                options.rename = Some(key);
                return Ok(());
            }
            if meta.path.is_ident("skip") {
                options.skip = true;
                return Ok(());
            }
            if meta.path.is_ident("serialize") {
                options.serialize = true;
                return Ok(());
            }
            Err(meta.error("unsupported flatten attribute on field"))
        })?;
    }
    Ok(options)
}

const fn is_public(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}

/// Rename a `PascalCase`/`camelCase` identifier to `snake_case`.
///
/// Acronym runs stay together (`UserID` -> `user_id`, `HTTPServer` ->
/// `http_server`); identifiers already in snake case are unchanged.
fn to_snake_case(name: &str) -> String {
    let name = name.strip_prefix("r#").unwrap_or(name);
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (index, &current) in chars.iter().enumerate() {
        if !current.is_uppercase() {
            out.push(current);
            continue;
        }

        let previous = index.checked_sub(1).and_then(|at| chars.get(at)).copied();
        let next = chars.get(index + 1).copied();
        let after_lower = previous.is_some_and(|ch| ch.is_lowercase() || ch.is_ascii_digit());
        let acronym_end =
            previous.is_some_and(char::is_uppercase) && next.is_some_and(char::is_lowercase);
        if (after_lower || acronym_end) && !out.ends_with('_') {
            out.push('_');
        }
        out.extend(current.to_lowercase());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{expand_flatten, to_snake_case};
    use syn::DeriveInput;

    fn expansion_error(input: &DeriveInput) -> String {
        expand_flatten(input).err().map(|error| error.to_string()).unwrap_or_default()
    }

    #[test]
    fn enums_are_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            enum Status { Ok, Failed }
        };
        assert_eq!(expansion_error(&input), "Flatten can only be derived for structs");
    }

    #[test]
    fn tuple_structs_are_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Pair(pub i64, pub i64);
        };
        assert_eq!(expansion_error(&input), "Flatten requires named fields");
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Clash {
                pub UserID: String,
                pub user_id: String,
            }
        };
        assert_eq!(expansion_error(&input), "duplicate flattened key `user_id`");
    }

    #[test]
    fn crate_path_is_configurable() {
        let input: DeriveInput = syn::parse_quote! {
            #[flatten(crate = "kvlog")]
            struct Event {
                pub id: u64,
            }
        };
        let tokens = expand_flatten(&input).map(|tokens| tokens.to_string()).unwrap_or_default();
        assert!(tokens.contains("kvlog :: Flatten"));
        assert!(!tokens.contains("kvlog_shared"));
    }

    #[test]
    fn snake_case_handles_acronyms() {
        assert_eq!(to_snake_case("UserID"), "user_id");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("ID"), "id");
        assert_eq!(to_snake_case("A"), "a");
    }

    #[test]
    fn snake_case_splits_words() {
        assert_eq!(to_snake_case("InternalError"), "internal_error");
        assert_eq!(to_snake_case("statusCode"), "status_code");
        assert_eq!(to_snake_case("Retry2Count"), "retry2_count");
    }

    #[test]
    fn snake_case_is_idempotent() {
        assert_eq!(to_snake_case("user_id"), "user_id");
        assert_eq!(to_snake_case("Request_ID"), "request_id");
        assert_eq!(to_snake_case("r#type"), "type");
    }
}
