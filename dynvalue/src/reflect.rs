//! Field descriptors for user-defined records.
//!
//! A record exposes its fields through [`Reflect`]: an ordered walk over
//! `(name, value)` pairs for encoding, and lookup by name for decoding. The
//! [`record!`](crate::record) macro writes the impl from a field list, along
//! with the [`ToVariant`](crate::ToVariant) and
//! [`FromVariant`](crate::FromVariant) impls that route through it.

use alloc::vec::Vec;

use crate::convert::{DynFromVariant, ToVariant};
use crate::error::VariantError;

/// Callback handed to [`Reflect::for_each_field`].
pub type FieldVisitor<'a> =
    dyn FnMut(&'static str, &dyn ToVariant) -> Result<(), VariantError> + 'a;

/// Ordered, named access to the fields of a record.
///
/// Fields of embedded base records come first, in the order the bases are
/// listed, followed by the record's own fields in declaration order.
pub trait Reflect {
    /// Calls `visit` once per field, in order, stopping at the first error.
    fn for_each_field(&self, visit: &mut FieldVisitor<'_>) -> Result<(), VariantError>;

    /// Returns the field called `name`, searching base records first.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn DynFromVariant>;

    /// Names of all fields, in visiting order.
    fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let collected = self.for_each_field(&mut |name: &'static str, _: &dyn ToVariant| {
            names.push(name);
            Ok(())
        });
        debug_assert!(collected.is_ok());
        names
    }
}

/// Implements [`Reflect`], [`ToVariant`](crate::ToVariant) and
/// [`FromVariant`](crate::FromVariant) for a struct.
///
/// List the fields to convert inside braces. Fields that hold embedded base
/// records (which must themselves be declared with `record!`) go after a
/// colon; their fields are flattened into the same object, ahead of the
/// record's own.
///
/// Decoding a fresh instance starts from `Default::default()`, so the struct
/// must implement `Default`.
///
/// ```
/// use dynvalue::{record, to_value, from_value, Value, VObject};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Base { id: u32 }
/// record!(Base { id });
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Named { base: Base, name: String }
/// record!(Named: base { name });
///
/// let named = Named { base: Base { id: 7 }, name: "seven".into() };
/// let v = to_value(&named).unwrap();
/// let keys: Vec<&str> = v.get_object().unwrap().keys().map(String::as_str).collect();
/// assert_eq!(keys, ["id", "name"]);
/// assert_eq!(from_value::<Named>(&v).unwrap(), named);
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty $(: $($base:ident),+)? { $($field:ident),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn for_each_field(
                &self,
                visit: &mut $crate::FieldVisitor<'_>,
            ) -> ::core::result::Result<(), $crate::VariantError> {
                $($(
                    $crate::Reflect::for_each_field(&self.$base, visit)?;
                )+)?
                $(
                    visit(::core::stringify!($field), &self.$field)?;
                )*
                ::core::result::Result::Ok(())
            }

            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut dyn $crate::DynFromVariant> {
                $($(
                    if let ::core::option::Option::Some(field) =
                        $crate::Reflect::field_mut(&mut self.$base, name)
                    {
                        return ::core::option::Option::Some(field);
                    }
                )+)?
                match name {
                    $(
                        ::core::stringify!($field) => ::core::option::Option::Some(
                            &mut self.$field as &mut dyn $crate::DynFromVariant,
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl $crate::ToVariant for $ty {
            fn to_variant(
                &self,
                depth: $crate::Depth,
            ) -> ::core::result::Result<$crate::Value, $crate::VariantError> {
                $crate::encode_record(self, depth)
            }
        }

        impl $crate::FromVariant for $ty {
            fn from_variant(
                value: &$crate::Value,
                depth: $crate::Depth,
            ) -> ::core::result::Result<Self, $crate::VariantError> {
                let mut out = <Self as ::core::default::Default>::default();
                $crate::decode_record(&mut out, value, depth)?;
                ::core::result::Result::Ok(out)
            }

            fn update_from_variant(
                &mut self,
                value: &$crate::Value,
                depth: $crate::Depth,
            ) -> ::core::result::Result<(), $crate::VariantError> {
                $crate::decode_record(self, value, depth)
            }
        }
    };
}
