//! Implementation of the `#[derive(Accessors)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Generics, Ident, parse_macro_input};

/// Main implementation of the Accessors derive macro.
pub fn derive_accessors_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;

    let expanded = match &input.data {
        Data::Struct(data_struct) => generate_struct_accessors(name, generics, &data_struct.fields),
        Data::Enum(_) => syn::Error::new_spanned(
            &input.ident,
            "Accessors can only be derived for structs, not enums.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Accessors cannot be derived for unions.")
                .to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

fn generate_struct_accessors(name: &Ident, generics: &Generics, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(named_fields) => {
            let accessor_methods = named_fields
                .named
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .map(|field_name| {
                    let key = field_name.unraw().to_string();
                    let method_name = format_ident!("{}_accessor", field_name.unraw());
                    let doc = format!("Returns the accessor for the `{key}` field.");

                    quote! {
                        #[doc = #doc]
                        #[must_use]
                        pub fn #method_name() -> ::proform::optics::Optic {
                            static OPTIC: ::std::sync::OnceLock<::proform::optics::Optic> =
                                ::std::sync::OnceLock::new();
                            OPTIC.get_or_init(|| ::proform::optics::prop(#key)).clone()
                        }
                    }
                });

            let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

            quote! {
                impl #impl_generics #name #type_generics #where_clause {
                    #(#accessor_methods)*
                }
            }
        }
        Fields::Unnamed(_) => syn::Error::new_spanned(
            name,
            "Accessors can only be derived for structs with named fields, not tuple structs.",
        )
        .to_compile_error(),
        Fields::Unit => syn::Error::new_spanned(
            name,
            "Accessors cannot be derived for unit structs (structs with no fields).",
        )
        .to_compile_error(),
    }
}
