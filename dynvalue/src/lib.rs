//! `dynvalue` provides a dynamically typed value and a type-directed
//! protocol for converting strongly typed Rust values to and from it.
//!
//! # Features
//!
//! - **Fixed-size `Value`**: every variant fits the same 16 bytes on 64-bit
//!   targets; scalars are inline and heap payloads are boxed once
//! - **Nine value types**: null, int64, uint64, double, bool, string, array,
//!   object and blob
//! - **Bounded recursion**: every conversion carries a [`Depth`] budget, so
//!   hostile nesting fails with an error instead of overflowing the stack
//! - **Records**: the [`record!`] macro describes a struct's fields once and
//!   gets both directions of conversion
//! - **Tagged unions**: the [`alternatives!`] macro converts enums whose
//!   variants carry one value each
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use dynvalue::{Depth, Value, from_value, to_value};
//!
//! let scores = BTreeMap::from([("ada".to_string(), vec![3, 5])]);
//! let v = to_value(&scores).unwrap();
//! assert_eq!(v.to_string(), r#"[["ada",[3,5]]]"#);
//!
//! let back: BTreeMap<String, Vec<i32>> = from_value(&v).unwrap();
//! assert_eq!(back, scores);
//!
//! // Three levels are needed: the map, its entry pair and the vector.
//! assert!(Value::encode(&scores, Depth::new(2)).unwrap_err().is_recursion_limit());
//! ```
//!
//! # Cargo features
//!
//! - `tracing`: log budget exhaustion and record field handling
//! - `miette`: implement `miette::Diagnostic` for [`VariantError`]

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]

extern crate alloc;

mod tracing_macros;

mod error;
pub use error::{ErrorKind, PathSegment, VariantError};

mod value;
pub use value::{VArray, Value, ValueType};

mod object;
pub use object::VObject;

mod blob;
pub use blob::Blob;

mod cmp;

mod depth;
pub use depth::{DEFAULT_MAX_DEPTH, Depth, default_budget, set_default_budget};

mod convert;
pub use convert::{
    DynFromVariant, FromVariant, ToVariant, from_value, from_value_into, from_value_with_depth,
    to_value, to_value_with_depth,
};

mod leaf;

mod containers;

mod reflect;
pub use reflect::{FieldVisitor, Reflect};

mod record;
pub use record::{decode_record, encode_record};

mod alternative;
pub use alternative::{decode_alternative, encode_alternative};

mod visit;
pub use visit::Visitor;

mod ops;

mod format;
pub use format::format_value;
