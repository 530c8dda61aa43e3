//! Scalar conversions.
//!
//! Leaves never descend, so they accept any budget, including zero.
//! Integers of every width collapse into the two 64-bit tags (signed into
//! `Int64`, unsigned into `UInt64`) and floats into `Double`.

use alloc::format;
use alloc::string::{String, ToString};

use crate::blob::Blob;
use crate::convert::{FromVariant, ToVariant};
use crate::depth::Depth;
use crate::error::VariantError;
use crate::object::VObject;
use crate::value::Value;

/// Reads any numeric-compatible value as a wide integer, ready to be narrowed.
fn integer_of(value: &Value, target: &'static str) -> Result<i128, VariantError> {
    match value {
        Value::Null => Ok(0),
        Value::Int64(i) => Ok(i128::from(*i)),
        Value::UInt64(u) => Ok(i128::from(*u)),
        Value::Bool(b) => Ok(i128::from(*b)),
        Value::Double(d) if d.is_finite() => Ok(d.trunc() as i128),
        Value::Double(d) => Err(VariantError::conversion(
            target,
            format!("{d} is not a finite number"),
        )),
        Value::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|e| VariantError::conversion(target, format!("{s:?}: {e}"))),
        other => Err(VariantError::type_mismatch("numeric", other.value_type())),
    }
}

macro_rules! impl_integer {
    ($($t:ty),*) => {$(
        impl ToVariant for $t {
            fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
                Ok(Value::from(*self))
            }
        }

        impl FromVariant for $t {
            fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
                let wide = integer_of(value, stringify!($t))?;
                <$t>::try_from(wide).map_err(|_| {
                    VariantError::conversion(
                        stringify!($t),
                        format!("{wide} out of range for {}", stringify!($t)),
                    )
                })
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// 128-bit integers use the 64-bit tags while they fit and fall back to
// decimal text beyond that.

impl ToVariant for i128 {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        if let Ok(n) = i64::try_from(*self) {
            Ok(Value::Int64(n))
        } else if let Ok(n) = u64::try_from(*self) {
            Ok(Value::UInt64(n))
        } else {
            Ok(Value::from(self.to_string()))
        }
    }
}

impl FromVariant for i128 {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        integer_of(value, "i128")
    }
}

impl ToVariant for u128 {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        match u64::try_from(*self) {
            Ok(n) => Ok(Value::UInt64(n)),
            Err(_) => Ok(Value::from(self.to_string())),
        }
    }
}

impl FromVariant for u128 {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        // Text is parsed at full width; the signed path tops out at i128::MAX.
        if let Value::String(s) = value {
            return s
                .trim()
                .parse()
                .map_err(|e| VariantError::conversion("u128", format!("{s:?}: {e}")));
        }
        let wide = integer_of(value, "u128")?;
        u128::try_from(wide)
            .map_err(|_| VariantError::conversion("u128", format!("{wide} out of range for u128")))
    }
}

impl ToVariant for f64 {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        Ok(Value::Double(*self))
    }
}

impl FromVariant for f64 {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        value.as_double()
    }
}

impl ToVariant for f32 {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        Ok(Value::from(*self))
    }
}

impl FromVariant for f32 {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        let wide = value.as_double()?;
        let narrow = wide as f32;
        if wide.is_finite() && narrow.is_infinite() {
            return Err(VariantError::conversion(
                "f32",
                format!("{wide} out of range for f32"),
            ));
        }
        Ok(narrow)
    }
}

impl ToVariant for bool {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        Ok(Value::Bool(*self))
    }
}

impl FromVariant for bool {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        value.as_bool()
    }
}

impl ToVariant for str {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        Ok(Value::from(self))
    }
}

impl ToVariant for String {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        Ok(Value::from(self.as_str()))
    }
}

impl FromVariant for String {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        value.as_string()
    }
}

impl ToVariant for char {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        Ok(Value::from(*self))
    }
}

impl FromVariant for char {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        let text = value.as_string()?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(VariantError::conversion(
                "char",
                format!("expected exactly one character, got {text:?}"),
            )),
        }
    }
}

impl ToVariant for () {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        Ok(Value::Null)
    }
}

impl FromVariant for () {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        match value {
            Value::Null => Ok(()),
            other => Err(VariantError::type_mismatch("null", other.value_type())),
        }
    }
}

impl ToVariant for Value {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        Ok(self.clone())
    }
}

impl FromVariant for Value {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        Ok(value.clone())
    }

    fn update_from_variant(&mut self, value: &Value, _depth: Depth) -> Result<(), VariantError> {
        self.clone_from(value);
        Ok(())
    }
}

impl ToVariant for VObject {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        Ok(Value::from(self.clone()))
    }
}

impl FromVariant for VObject {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        value.get_object().cloned()
    }
}

impl ToVariant for Blob {
    fn to_variant(&self, _depth: Depth) -> Result<Value, VariantError> {
        Ok(Value::from(self.clone()))
    }
}

impl FromVariant for Blob {
    fn from_variant(value: &Value, _depth: Depth) -> Result<Self, VariantError> {
        value.as_blob()
    }
}
