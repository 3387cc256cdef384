use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr};

pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let vis = &input.vis;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Model derive: generic structs are not supported",
        ));
    }

    let options = parse_options(input)?;
    let collection = options
        .collection
        .unwrap_or_else(|| format!("{}s", to_snake_case(&name.to_string())));
    let patch_name = options
        .patch
        .unwrap_or_else(|| format_ident!("{}Patch", name));

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Model derive: only structs with named fields are supported",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Model derive: only structs are supported",
            ))
        }
    };

    let rename_all = serde_value(&input.attrs, "rename_all")?;
    let rename_all_attr = rename_all.map(|value| quote! { #[serde(rename_all = #value)] });

    let mut patch_fields = Vec::new();
    let mut setters = Vec::new();
    for field in fields {
        let ident = match &field.ident {
            Some(ident) => ident,
            None => continue,
        };
        let ty = &field.ty;
        let rename_attr = serde_value(&field.attrs, "rename")?
            .map(|value| quote! { #[serde(rename = #value)] });

        patch_fields.push(quote! {
            #[serde(skip_serializing_if = "Option::is_none")]
            #rename_attr
            pub #ident: ::core::option::Option<#ty>,
        });
        setters.push(quote! {
            pub fn #ident(mut self, value: impl ::core::convert::Into<#ty>) -> Self {
                self.#ident = ::core::option::Option::Some(value.into());
                self
            }
        });
    }

    let patch_doc = format!("Partial update for [`{}`]; unset fields are left untouched.", name);

    Ok(quote! {
        impl collection_store::Model for #name {
            const COLLECTION: &'static str = #collection;
            type Patch = #patch_name;
        }

        #[doc = #patch_doc]
        #[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
        #rename_all_attr
        #vis struct #patch_name {
            #(#patch_fields)*
        }

        impl #patch_name {
            #(#setters)*
        }
    })
}

struct ModelOptions {
    collection: Option<String>,
    patch: Option<Ident>,
}

fn parse_options(input: &DeriveInput) -> syn::Result<ModelOptions> {
    let mut options = ModelOptions {
        collection: None,
        patch: None,
    };

    for attr in &input.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                options.collection = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("patch") {
                let value: LitStr = meta.value()?.parse()?;
                options.patch = Some(value.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported model attribute"))
            }
        })?;
    }

    Ok(options)
}

/// Reads `#[serde(<key> = "...")]` from a list of attributes, ignoring every
/// other serde option.
fn serde_value(attrs: &[Attribute], key: &str) -> syn::Result<Option<LitStr>> {
    let mut found = None;
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let is_key = meta.path.is_ident(key);
            if meta.input.peek(syn::Token![=]) {
                let expr: syn::Expr = meta.value()?.parse()?;
                if let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(value),
                    ..
                }) = expr
                {
                    if is_key {
                        found = Some(value);
                    }
                }
            } else if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                let _: TokenStream2 = content.parse()?;
            }
            Ok(())
        })?;
    }
    Ok(found)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
