extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input, punctuated::Punctuated};

#[proc_macro_derive(Identifiable)]
pub fn derive_identifiable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let expanded = quote! {
        impl crate::Identifiable for #name {
            fn get_id(&self) -> uuid::Uuid {
                self.id
            }
        }
    };

    TokenStream::from(expanded)
}

#[derive(Debug, Default)]
struct DtoFlags {
    pub ui: bool,
    pub clone: bool,
    pub request: bool,
    pub response: bool,
    pub camel: bool,
}

/// Attaches the derives a DTO needs on each side of the wire.
///
/// `#[dto(translate, request)]` derives `Deserialize` when the `translate-in`
/// feature is on and `Serialize` when `translate-out` is on; `response` is the
/// mirror image. `clone`, `ui` and `camel` add `Clone`, front-end `PartialEq`
/// and `#[serde(rename_all = "camelCase")]` respectively.
#[proc_macro_attribute]
pub fn dto(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = syn::parse_macro_input!(attr with Punctuated<syn::Ident, syn::Token![,]>::parse_separated_nonempty);
    let mut args = args.into_iter();

    // The first argument is the precept name, the rest are flags
    let precept_name = match args.next() {
        Some(name) => name,
        None => {
            return syn::Error::new(proc_macro2::Span::call_site(), "Expected precept name as first argument")
                .to_compile_error()
                .into();
        }
    };

    let mut flags = DtoFlags::default();

    for flag in args {
        match flag.to_string().as_str() {
            "ui" => flags.ui = true,
            "clone" => flags.clone = true,
            "request" => flags.request = true,
            "response" => flags.response = true,
            "camel" => flags.camel = true,
            other => {
                return syn::Error::new(flag.span(), format!("Unknown flag: {}", other))
                    .to_compile_error()
                    .into();
            }
        }
    }

    let mut universal_derives: Vec<syn::Path> = vec![syn::parse_quote!(Debug)];
    let mut item: syn::Item = syn::parse_macro_input!(item as syn::Item);
    let feature_in = format!("{}-in", precept_name);
    let feature_out = format!("{}-out", precept_name);
    let feature_front = format!("{}-front", precept_name);

    let item_attrs = match &mut item {
        syn::Item::Struct(s) => &mut s.attrs,
        syn::Item::Enum(e) => &mut e.attrs,
        other => {
            return syn::Error::new_spanned(other, "dto macro only supports structs and enums")
                .to_compile_error()
                .into();
        }
    };

    // Derives go in front of the item's own attributes so serde helpers follow them
    let mut derive_attrs: Vec<syn::Attribute> = Vec::new();

    if flags.clone {
        universal_derives.push(syn::parse_quote!(Clone));
    }

    if flags.request && flags.response {
        universal_derives.push(syn::parse_quote!(Serialize));
        universal_derives.push(syn::parse_quote!(Deserialize));
    } else if flags.request {
        derive_attrs.push(syn::parse_quote! {
            #[cfg_attr(feature = #feature_in, derive(Deserialize))]
        });
        derive_attrs.push(syn::parse_quote! {
            #[cfg_attr(feature = #feature_out, derive(Serialize))]
        });
    } else if flags.response {
        derive_attrs.push(syn::parse_quote! {
            #[cfg_attr(feature = #feature_in, derive(Serialize))]
        });
        derive_attrs.push(syn::parse_quote! {
            #[cfg_attr(feature = #feature_out, derive(Deserialize))]
        });
    }

    if flags.ui {
        derive_attrs.push(syn::parse_quote! {
            #[cfg_attr(feature = #feature_front, derive(PartialEq))]
        });
    }

    derive_attrs.insert(0, syn::parse_quote! {
        #[derive(#(#universal_derives),*)]
    });

    if flags.camel {
        derive_attrs.push(syn::parse_quote! {
            #[serde(rename_all = "camelCase")]
        });
    }

    derive_attrs.append(item_attrs);
    *item_attrs = derive_attrs;

    TokenStream::from(quote! { #item })
}
