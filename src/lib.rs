//! # proform
//!
//! A form-state binding kernel built on optics.
//!
//! ## Overview
//!
//! A form edits one immutable *buffer*: a nested [`Value`](value::Value)
//! tree. Each control names the part of the buffer it edits with an
//! *accessor*, which is turned into an [`Optic`](optics::Optic) and used to
//! read the control's value and to build a new buffer on every edit.
//! Validation results are placed on a buffer-shaped [`Overlay`](validation::Overlay)
//! that controls read their errors from with the same accessor.
//!
//! - **Values**: persistent records and lists with structural sharing
//! - **Optics**: Lens, Prism and Traversal with cardinality-widening composition
//! - **Accessors**: keys, key paths, dotted strings and optics, all resolved to one optic
//! - **Buffers**: pure reads and writes that rebuild only the edited path
//! - **Validation**: an error overlay addressable by accessor
//!
//! ## Feature Flags
//!
//! - `derive` (default): `#[derive(Buffer)]` and `#[derive(Accessors)]`
//! - `serde`: `Serialize`/`Deserialize` for `Value` and JSON conversions
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use proform::prelude::*;
//! use proform::record;
//!
//! let root = record! { "name" => "", "contact" => record! { "address" => "" } };
//!
//! let name = Binding::new("name");
//! let root = name.write(Value::from("Alice"), &root).unwrap();
//! assert_eq!(name.read(&root).unwrap(), Value::from("Alice"));
//!
//! let errors = ValidationErrors::new().with("contact.address", "required");
//! let overlay = build_overlay(&root, &errors);
//! assert!(error_at(overlay.as_ref(), "contact.address").unwrap().is_some());
//! assert!(name.error(overlay.as_ref()).unwrap().is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

// Used by `record!` and `list!`.
#[doc(hidden)]
pub use imbl;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use proform::prelude::*;
/// ```
pub mod prelude {
    pub use crate::accessor::{AccessorProp, parse_accessor};
    pub use crate::buffer::{Binding, Updater, read_buffer, write_buffer};
    pub use crate::error::{AccessError, ProformError, ProformResult};
    pub use crate::optics::{Cardinality, Focus, Optic};
    pub use crate::validation::{
        ErrorPayload, Overlay, Validate, ValidationError, ValidationErrors, build_overlay, error_at,
        validate_overlay,
    };
    pub use crate::value::{FromValue, IntoValue, Key, Symbol, Value};

    #[cfg(feature = "derive")]
    pub use proform_derive::{Accessors, Buffer};
}

pub mod accessor;
pub mod buffer;
pub mod error;
pub mod optics;
pub mod path;
pub mod validation;
pub mod value;

pub use accessor::{AccessorProp, parse_accessor, parse_accessor_value};
pub use buffer::{Binding, Updater, read_buffer, write_buffer};
pub use optics::{Cardinality, Focus, Optic};
pub use validation::{Overlay, ValidationErrors, build_overlay, error_at};
pub use value::Value;

#[cfg(feature = "derive")]
pub use proform_derive::{Accessors, Buffer};

static_assertions::assert_impl_all!(value::Value: Send, Sync);
static_assertions::assert_impl_all!(optics::Optic: Send, Sync);
static_assertions::assert_impl_all!(validation::Overlay: Send, Sync);
