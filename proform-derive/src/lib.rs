//! Derive macros for proform.
//!
//! # Available Derive Macros
//!
//! - [`Accessors`]: Generates a cached accessor optic per struct field
//! - [`Buffer`]: Implements `IntoValue` and `FromValue` for a named struct
//!
//! # Example
//!
//! ```rust,ignore
//! use proform::{Accessors, Buffer};
//! use proform::value::{FromValue, IntoValue};
//!
//! #[derive(Clone, Debug, PartialEq, Accessors, Buffer)]
//! struct Person {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! let buffer = Person { name: "Alice".into(), age: None }.into_value();
//! let name = Person::name_accessor();
//! assert_eq!(name.view(&buffer).unwrap().as_str(), Some("Alice"));
//! assert_eq!(Person::from_value(&buffer).unwrap().name, "Alice");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod accessors;
mod buffer;

use proc_macro::TokenStream;

/// Derive macro generating one accessor function per struct field.
///
/// For each field `foo` the struct gets:
///
/// ```rust,ignore
/// impl StructName {
///     pub fn foo_accessor() -> ::proform::optics::Optic { ... }
/// }
/// ```
///
/// The optic is built on first use and then reused, so every call returns
/// the same instance. That makes the accessor usable as a
/// `ValidationErrors` key, since optics compare by identity.
///
/// # Requirements
///
/// - The struct must be a named struct (not a tuple struct)
///
/// # Example
///
/// ```rust,ignore
/// use proform::Accessors;
/// use proform::optics::Optic;
///
/// #[derive(Accessors)]
/// struct Person {
///     name: String,
/// }
///
/// assert!(Optic::ptr_eq(&Person::name_accessor(), &Person::name_accessor()));
/// ```
#[proc_macro_derive(Accessors)]
pub fn derive_accessors(input: TokenStream) -> TokenStream {
    accessors::derive_accessors_impl(input)
}

/// Derive macro implementing `IntoValue` and `FromValue`.
///
/// Each field is stored under its name in a record. Reading a record with a
/// missing field reads that field from `Null`, so `Option` fields may be
/// absent. Conversion errors name the full path to the mismatching field.
///
/// # Requirements
///
/// - The struct must be a named struct
/// - Every field type must implement `IntoValue` and `FromValue`
///
/// # Example
///
/// ```rust,ignore
/// use proform::Buffer;
/// use proform::value::{FromValue, IntoValue};
///
/// #[derive(Debug, PartialEq, Buffer)]
/// struct Address {
///     city: String,
/// }
///
/// let value = Address { city: "Paris".into() }.into_value();
/// assert_eq!(Address::from_value(&value).unwrap().city, "Paris");
/// ```
#[proc_macro_derive(Buffer)]
pub fn derive_buffer(input: TokenStream) -> TokenStream {
    buffer::derive_buffer_impl(input)
}
