//! Tagged unions: enums whose variants each carry one payload.
//!
//! An alternative encodes as a two-element array, `[index, payload]`, where
//! `index` is the variant's position in declaration order. The pair spends one
//! level of budget and the payload is converted with what remains.

use alloc::format;
use alloc::vec;

use crate::convert::ToVariant;
use crate::depth::Depth;
use crate::error::{PathSegment, VariantError};
use crate::value::Value;

/// Encodes the alternative at `index` as `[index, payload]`.
pub fn encode_alternative<T: ToVariant + ?Sized>(
    index: i64,
    payload: &T,
    depth: Depth,
) -> Result<Value, VariantError> {
    let depth = depth.descend()?;
    let payload = payload
        .to_variant(depth)
        .map_err(|e| e.with_path(PathSegment::Index(1)))?;
    Ok(Value::from(vec![Value::Int64(index), payload]))
}

/// Splits an `[index, payload]` array, spending one level.
///
/// Returns the index, the payload and the budget left for decoding it.
/// Elements after the payload are ignored.
pub fn decode_alternative(
    value: &Value,
    depth: Depth,
) -> Result<(i64, &Value, Depth), VariantError> {
    let depth = depth.descend()?;
    match value.get_array()? {
        [index, payload, ..] => {
            let index = index
                .as_int64()
                .map_err(|e| e.with_path(PathSegment::Index(0)))?;
            Ok((index, payload, depth))
        }
        other => Err(VariantError::conversion(
            "alternative",
            format!("expected [index, payload], got {} elements", other.len()),
        )),
    }
}

/// Implements [`ToVariant`](crate::ToVariant) and
/// [`FromVariant`](crate::FromVariant) for an enum whose variants each hold
/// exactly one value.
///
/// Variants are numbered from zero in the order listed, which must not
/// change once values are stored. Use `()` as the payload of a variant with
/// nothing to carry.
///
/// ```
/// use dynvalue::{alternatives, from_value, to_value, Value};
///
/// #[derive(Debug, PartialEq)]
/// enum Shape {
///     Circle(f64),
///     Label(String),
/// }
/// alternatives!(Shape { Circle(f64), Label(String) });
///
/// let v = to_value(&Shape::Label("hi".into())).unwrap();
/// assert_eq!(v.to_string(), r#"[1,"hi"]"#);
/// assert_eq!(from_value::<Shape>(&v).unwrap(), Shape::Label("hi".into()));
/// ```
#[macro_export]
macro_rules! alternatives {
    (@encode $self:ident $depth:ident [$($arms:tt)*] $index:expr;) => {
        match $self {
            $($arms)*
        }
    };
    (@encode $self:ident $depth:ident [$($arms:tt)*] $index:expr; $variant:ident $($rest:ident)*) => {
        $crate::alternatives!(@encode $self $depth [
            $($arms)*
            Self::$variant(payload) => $crate::encode_alternative($index, payload, $depth),
        ] $index + 1; $($rest)*)
    };

    (@decode $which:ident $payload:ident $depth:ident [$($arms:tt)*] $index:expr;) => {
        match $which {
            $($arms)*
            other => ::core::result::Result::Err($crate::VariantError::new(
                $crate::ErrorKind::ConversionFailure {
                    target: ::core::any::type_name::<Self>(),
                    reason: ::std::format!("no alternative with index {other}"),
                },
            )),
        }
    };
    (@decode $which:ident $payload:ident $depth:ident [$($arms:tt)*] $index:expr; $variant:ident($inner:ty) $($rest:tt)*) => {
        $crate::alternatives!(@decode $which $payload $depth [
            $($arms)*
            i if i == $index => <$inner as $crate::FromVariant>::from_variant($payload, $depth)
                .map(Self::$variant)
                .map_err(|e| e.with_path($crate::PathSegment::Index(1))),
        ] $index + 1; $($rest)*)
    };

    ($ty:ty { $($variant:ident($inner:ty)),+ $(,)? }) => {
        impl $crate::ToVariant for $ty {
            fn to_variant(
                &self,
                depth: $crate::Depth,
            ) -> ::core::result::Result<$crate::Value, $crate::VariantError> {
                $crate::alternatives!(@encode self depth [] 0i64; $($variant)+)
            }
        }

        impl $crate::FromVariant for $ty {
            fn from_variant(
                value: &$crate::Value,
                depth: $crate::Depth,
            ) -> ::core::result::Result<Self, $crate::VariantError> {
                let (which, payload, depth) = $crate::decode_alternative(value, depth)?;
                $crate::alternatives!(@decode which payload depth [] 0i64; $($variant($inner))+)
            }
        }
    };
}
