//! Core `Value` type.
//!
//! # Memory Layout
//!
//! `Value` is a plain Rust enum. Scalars (`i64`, `u64`, `f64`, `bool`) are
//! stored inline; every heap-resident variant is boxed exactly once, so the
//! payload is never wider than a pointer or a 64-bit scalar:
//!
//! ```text
//! ┌────────────┬──────────────────────────────────────┐
//! │ tag (1 B)  │ payload: i64 / u64 / f64 / bool / Box │
//! └────────────┴──────────────────────────────────────┘
//!  16 bytes on 64-bit targets, 12 bytes on most 32-bit targets
//! ```
//!
//! Cloning deep-copies the boxed payload. Moving out with [`Value::take`]
//! leaves `Null` behind.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::mem;
use std::sync::LazyLock;

use crate::blob::Blob;
use crate::error::{ErrorKind, VariantError};
use crate::object::VObject;

/// Ordered sequence of values.
pub type VArray = Vec<Value>;

static EMPTY_OBJECT: LazyLock<VObject> = LazyLock::new(VObject::new);

/// Enum distinguishing the value types.
///
/// The declaration order is the order values of different types sort in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    /// Null value
    Null,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer
    UInt64,
    /// 64-bit floating point
    Double,
    /// Boolean value
    Bool,
    /// String (UTF-8)
    String,
    /// Array of values
    Array,
    /// Object (ordered key-value map)
    Object,
    /// Binary data
    Blob,
}

impl ValueType {
    /// Lowercase name of the type, as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Int64 => "int64",
            ValueType::UInt64 => "uint64",
            ValueType::Double => "double",
            ValueType::Bool => "bool",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
            ValueType::Blob => "blob",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamic value that can represent null, integers, floats, booleans,
/// strings, binary blobs, arrays, or objects.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Signed integer
    Int64(i64),
    /// Unsigned integer
    UInt64(u64),
    /// Floating point number
    Double(f64),
    /// Boolean
    Bool(bool),
    /// UTF-8 string
    String(Box<String>),
    /// Ordered sequence of values
    Array(Box<VArray>),
    /// Ordered map from string keys to values
    Object(Box<VObject>),
    /// Binary data
    Blob(Box<Blob>),
}

impl Value {
    /// The `null` value.
    pub const NULL: Self = Value::Null;

    // === Type checking ===

    /// Returns the type of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Int64(_) => ValueType::Int64,
            Value::UInt64(_) => ValueType::UInt64,
            Value::Double(_) => ValueType::Double,
            Value::Bool(_) => ValueType::Bool,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
            Value::Blob(_) => ValueType::Blob,
        }
    }

    /// Returns `true` if this is the `null` value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a signed integer.
    #[must_use]
    pub const fn is_int64(&self) -> bool {
        matches!(self, Value::Int64(_))
    }

    /// Returns `true` if this is an unsigned integer.
    #[must_use]
    pub const fn is_uint64(&self) -> bool {
        matches!(self, Value::UInt64(_))
    }

    /// Returns `true` if this is a floating point number.
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    /// Returns `true` if this is a boolean.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if this is a string.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is an array.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if this is an object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` if this is a blob.
    #[must_use]
    pub const fn is_blob(&self) -> bool {
        matches!(self, Value::Blob(_))
    }

    /// int64, uint64, double, bool
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int64(_) | Value::UInt64(_) | Value::Double(_) | Value::Bool(_)
        )
    }

    /// int64, uint64, bool
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Int64(_) | Value::UInt64(_) | Value::Bool(_))
    }

    // === Coercing accessors ===

    /// Converts any scalar to an `i64`.
    ///
    /// Doubles are truncated, `true`/`false` become 1/0, strings are parsed
    /// and `null` is 0.
    pub fn as_int64(&self) -> Result<i64, VariantError> {
        match self {
            Value::Null => Ok(0),
            Value::Int64(i) => Ok(*i),
            Value::UInt64(u) => Ok(*u as i64),
            Value::Double(d) => Ok(*d as i64),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|e| VariantError::conversion("i64", alloc::format!("{s:?}: {e}"))),
            other => Err(VariantError::type_mismatch("numeric", other.value_type())),
        }
    }

    /// Converts any scalar to a `u64`.
    pub fn as_uint64(&self) -> Result<u64, VariantError> {
        match self {
            Value::Null => Ok(0),
            Value::Int64(i) => Ok(*i as u64),
            Value::UInt64(u) => Ok(*u),
            Value::Double(d) => Ok(*d as u64),
            Value::Bool(b) => Ok(u64::from(*b)),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|e| VariantError::conversion("u64", alloc::format!("{s:?}: {e}"))),
            other => Err(VariantError::type_mismatch("numeric", other.value_type())),
        }
    }

    /// Converts any scalar to an `f64`.
    pub fn as_double(&self) -> Result<f64, VariantError> {
        match self {
            Value::Null => Ok(0.0),
            Value::Int64(i) => Ok(*i as f64),
            Value::UInt64(u) => Ok(*u as f64),
            Value::Double(d) => Ok(*d),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|e| VariantError::conversion("f64", alloc::format!("{s:?}: {e}"))),
            other => Err(VariantError::type_mismatch("numeric", other.value_type())),
        }
    }

    /// Converts any scalar to a `bool`.
    ///
    /// Numbers are `true` when non-zero. Only the strings `"true"` and
    /// `"false"` convert.
    pub fn as_bool(&self) -> Result<bool, VariantError> {
        match self {
            Value::Null => Ok(false),
            Value::Int64(i) => Ok(*i != 0),
            Value::UInt64(u) => Ok(*u != 0),
            Value::Double(d) => Ok(*d != 0.0),
            Value::Bool(b) => Ok(*b),
            Value::String(s) => match s.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(VariantError::conversion(
                    "bool",
                    alloc::format!("only \"true\" or \"false\" convert, got {s:?}"),
                )),
            },
            other => Err(VariantError::type_mismatch("numeric", other.value_type())),
        }
    }

    /// Stringifies any scalar. Blobs are rendered as base64.
    pub fn as_string(&self) -> Result<String, VariantError> {
        match self {
            Value::Null => Ok(String::new()),
            Value::Int64(i) => Ok(i.to_string()),
            Value::UInt64(u) => Ok(u.to_string()),
            Value::Double(d) => Ok(d.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::String(s) => Ok(String::clone(s)),
            Value::Blob(b) => Ok(b.to_base64()),
            other => Err(VariantError::type_mismatch("scalar", other.value_type())),
        }
    }

    /// Converts to a [`Blob`].
    ///
    /// A string ending in `=` is decoded as base64, any other string yields
    /// its UTF-8 bytes, and `null` yields an empty blob.
    pub fn as_blob(&self) -> Result<Blob, VariantError> {
        match self {
            Value::Null => Ok(Blob::default()),
            Value::Blob(b) => Ok(Blob::clone(b)),
            Value::String(s) if s.ends_with('=') => Blob::from_base64(s),
            Value::String(s) => Ok(Blob::from(s.as_bytes())),
            other => Err(VariantError::type_mismatch("blob", other.value_type())),
        }
    }

    // === Exact accessors ===

    /// Returns the string payload.
    pub fn get_string(&self) -> Result<&str, VariantError> {
        match self {
            Value::String(s) => Ok(s.as_str()),
            other => Err(VariantError::type_mismatch("string", other.value_type())),
        }
    }

    /// Returns the string payload mutably.
    pub fn get_string_mut(&mut self) -> Result<&mut String, VariantError> {
        match self {
            Value::String(s) => Ok(&mut **s),
            other => Err(VariantError::type_mismatch("string", other.value_type())),
        }
    }

    /// Returns the array payload. `null` reads as an empty array.
    pub fn get_array(&self) -> Result<&[Value], VariantError> {
        match self {
            Value::Array(a) => Ok(a.as_slice()),
            Value::Null => Ok(&[]),
            other => Err(VariantError::type_mismatch("array", other.value_type())),
        }
    }

    /// Returns the array payload mutably. `null` is replaced by an empty array.
    pub fn get_array_mut(&mut self) -> Result<&mut VArray, VariantError> {
        if self.is_null() {
            *self = Value::Array(Box::default());
        }
        match self {
            Value::Array(a) => Ok(&mut **a),
            other => Err(VariantError::type_mismatch("array", other.value_type())),
        }
    }

    /// Returns the object payload. `null` reads as an empty object.
    pub fn get_object(&self) -> Result<&VObject, VariantError> {
        match self {
            Value::Object(o) => Ok(&**o),
            Value::Null => Ok(&EMPTY_OBJECT),
            other => Err(VariantError::type_mismatch("object", other.value_type())),
        }
    }

    /// Returns the object payload mutably. `null` is replaced by an empty object.
    pub fn get_object_mut(&mut self) -> Result<&mut VObject, VariantError> {
        if self.is_null() {
            *self = Value::Object(Box::default());
        }
        match self {
            Value::Object(o) => Ok(&mut **o),
            other => Err(VariantError::type_mismatch("object", other.value_type())),
        }
    }

    /// Returns the blob payload.
    pub fn get_blob(&self) -> Result<&Blob, VariantError> {
        match self {
            Value::Blob(b) => Ok(&**b),
            other => Err(VariantError::type_mismatch("blob", other.value_type())),
        }
    }

    /// Returns the blob payload mutably.
    pub fn get_blob_mut(&mut self) -> Result<&mut Blob, VariantError> {
        match self {
            Value::Blob(b) => Ok(&mut **b),
            other => Err(VariantError::type_mismatch("blob", other.value_type())),
        }
    }

    // === Indexed and keyed access ===

    /// Returns the element at `index` of an array.
    pub fn at(&self, index: usize) -> Result<&Value, VariantError> {
        let items = self.get_array()?;
        items.get(index).ok_or_else(|| {
            VariantError::new(ErrorKind::IndexOutOfRange {
                index,
                len: items.len(),
            })
        })
    }

    /// Returns the element at `index` of an array mutably.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value, VariantError> {
        let items = match self {
            Value::Array(a) => a,
            other => return Err(VariantError::type_mismatch("array", other.value_type())),
        };
        let len = items.len();
        items
            .get_mut(index)
            .ok_or_else(|| VariantError::new(ErrorKind::IndexOutOfRange { index, len }))
    }

    /// Returns the value stored under `key` in an object.
    pub fn get(&self, key: &str) -> Result<&Value, VariantError> {
        match self {
            Value::Object(o) => o.get(key).ok_or_else(|| {
                VariantError::new(ErrorKind::MissingKey {
                    key: key.to_string(),
                })
            }),
            other => Err(VariantError::type_mismatch("object", other.value_type())),
        }
    }

    /// Returns the value stored under `key` in an object mutably.
    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value, VariantError> {
        match self {
            Value::Object(o) => o.get_mut(key).ok_or_else(|| {
                VariantError::new(ErrorKind::MissingKey {
                    key: key.to_string(),
                })
            }),
            other => Err(VariantError::type_mismatch("object", other.value_type())),
        }
    }

    /// Number of elements of an array (`null` has none).
    pub fn size(&self) -> Result<usize, VariantError> {
        self.get_array().map(<[Value]>::len)
    }

    // === Ownership ===

    /// Takes this value, replacing it with `Value::NULL`.
    pub const fn take(&mut self) -> Value {
        mem::replace(self, Value::NULL)
    }

    /// Releases any payload and resets to `null`.
    pub fn clear(&mut self) {
        *self = Value::NULL;
    }
}

// === From implementations ===

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int64(n as i64)
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::UInt64(n as u64)
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Double(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Box::new(s.into()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Box::new(s))
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(Box::new(c.to_string()))
    }
}

impl From<Blob> for Value {
    fn from(b: Blob) -> Self {
        Value::Blob(Box::new(b))
    }
}

impl From<VArray> for Value {
    fn from(items: VArray) -> Self {
        Value::Array(Box::new(items))
    }
}

impl From<VObject> for Value {
    fn from(obj: VObject) -> Self {
        Value::Object(Box::new(obj))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::NULL,
        }
    }
}

// === FromIterator implementations ===

impl<T: Into<Value>> core::iter::FromIterator<T> for Value {
    /// Collect into an array Value.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::from(iter.into_iter().map(Into::into).collect::<VArray>())
    }
}

impl<K: Into<String>, V: Into<Value>> core::iter::FromIterator<(K, V)> for Value {
    /// Collect key-value pairs into an object Value.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::from(VObject::from_iter(iter))
    }
}
