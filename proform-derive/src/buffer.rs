//! Implementation of the `#[derive(Buffer)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, FieldsNamed, GenericParam, Generics, Ident, parse_macro_input, parse_quote};

/// Main implementation of the Buffer derive macro.
pub fn derive_buffer_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let expanded = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(named_fields) => generate_conversions(name, &input.generics, named_fields),
            Fields::Unnamed(_) => syn::Error::new_spanned(
                name,
                "Buffer can only be derived for structs with named fields, not tuple structs.",
            )
            .to_compile_error(),
            Fields::Unit => syn::Error::new_spanned(
                name,
                "Buffer cannot be derived for unit structs (structs with no fields).",
            )
            .to_compile_error(),
        },
        Data::Enum(_) => syn::Error::new_spanned(name, "Buffer can only be derived for structs, not enums.")
            .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(name, "Buffer cannot be derived for unions.").to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

fn bounded(generics: &Generics, bound: &TokenStream2) -> Generics {
    let mut generics = generics.clone();
    for parameter in &mut generics.params {
        if let GenericParam::Type(type_parameter) = parameter {
            type_parameter.bounds.push(parse_quote!(#bound));
        }
    }
    generics
}

fn generate_conversions(name: &Ident, generics: &Generics, fields: &FieldsNamed) -> TokenStream2 {
    let idents: Vec<&Ident> = fields.named.iter().filter_map(|field| field.ident.as_ref()).collect();
    let keys: Vec<String> = idents.iter().map(|ident| ident.unraw().to_string()).collect();

    let into_generics = bounded(generics, &quote!(::proform::value::IntoValue));
    let (into_impl, into_type, into_where) = into_generics.split_for_impl();

    let from_generics = bounded(generics, &quote!(::proform::value::FromValue));
    let (from_impl, from_type, from_where) = from_generics.split_for_impl();

    quote! {
        impl #into_impl ::proform::value::IntoValue for #name #into_type #into_where {
            fn into_value(self) -> ::proform::value::Value {
                #[allow(unused_mut)]
                let mut record = ::proform::value::Record::new();
                #(
                    record.insert(
                        ::proform::value::Key::from(#keys),
                        ::proform::value::IntoValue::into_value(self.#idents),
                    );
                )*
                ::proform::value::Value::Record(record)
            }
        }

        impl #from_impl ::proform::value::FromValue for #name #from_type #from_where {
            fn from_value(
                value: &::proform::value::Value,
            ) -> ::core::result::Result<Self, ::proform::error::FromValueError> {
                ::proform::value::expect_record(value)?;
                ::core::result::Result::Ok(Self {
                    #( #idents: ::proform::value::field(value, #keys)?, )*
                })
            }
        }
    }
}
