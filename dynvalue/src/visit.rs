//! Double dispatch over the active tag of a `Value`.

use crate::blob::Blob;
use crate::object::VObject;
use crate::value::Value;

/// Read-only handler with one method per value type.
///
/// [`Value::visit`] calls exactly one of these. Narrower integer and float
/// widths were already widened when the value was built, so only the three
/// numeric handlers exist.
pub trait Visitor {
    /// What every handler returns.
    type Output;

    /// Called for `null`.
    fn visit_null(&mut self) -> Self::Output;
    /// Called for a signed integer.
    fn visit_i64(&mut self, v: i64) -> Self::Output;
    /// Called for an unsigned integer.
    fn visit_u64(&mut self, v: u64) -> Self::Output;
    /// Called for a double.
    fn visit_f64(&mut self, v: f64) -> Self::Output;
    /// Called for a boolean.
    fn visit_bool(&mut self, v: bool) -> Self::Output;
    /// Called for a string.
    fn visit_str(&mut self, v: &str) -> Self::Output;
    /// Called for an array.
    fn visit_array(&mut self, items: &[Value]) -> Self::Output;
    /// Called for an object.
    fn visit_object(&mut self, obj: &VObject) -> Self::Output;

    /// Called for a blob. By default the blob is shown to
    /// [`visit_str`](Self::visit_str) as base64 text.
    fn visit_blob(&mut self, blob: &Blob) -> Self::Output {
        self.visit_str(&blob.to_base64())
    }
}

impl Value {
    /// Dispatches to the handler matching the active tag.
    pub fn visit<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Value::Null => visitor.visit_null(),
            Value::Int64(i) => visitor.visit_i64(*i),
            Value::UInt64(u) => visitor.visit_u64(*u),
            Value::Double(d) => visitor.visit_f64(*d),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::String(s) => visitor.visit_str(s),
            Value::Array(items) => visitor.visit_array(items),
            Value::Object(obj) => visitor.visit_object(obj),
            Value::Blob(blob) => visitor.visit_blob(blob),
        }
    }
}
