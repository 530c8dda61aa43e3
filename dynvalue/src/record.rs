//! Conversion of records through their [`Reflect`] descriptors.
//!
//! A record encodes to an object with one key per field. Decoding walks the
//! *input* object: keys naming a field are decoded into it, unknown keys are
//! skipped, and fields the input does not mention keep their current value.
//!
//! Decoding stops at the first failing field. Fields decoded before it keep
//! their new values, the failing field itself is left as it was (leaf
//! conversions only assign on success), and later keys are not visited.

use alloc::string::String;

use crate::convert::ToVariant;
use crate::depth::Depth;
use crate::error::{PathSegment, VariantError};
use crate::object::VObject;
use crate::reflect::Reflect;
use crate::tracing_macros::trace;
use crate::value::Value;

/// Encodes a record as an object, spending one level for the record itself.
pub fn encode_record<R: Reflect + ?Sized>(record: &R, depth: Depth) -> Result<Value, VariantError> {
    let depth = depth.descend()?;
    let mut out = VObject::new();
    record.for_each_field(
        &mut |name: &'static str, field: &dyn ToVariant| -> Result<(), VariantError> {
            trace!(field = name, "encoding field");
            let encoded = field
                .to_variant(depth)
                .map_err(|e| e.with_path(PathSegment::Field(String::from(name))))?;
            out.insert(name, encoded);
            Ok(())
        },
    )?;
    Ok(Value::from(out))
}

/// Decodes an object into an existing record, spending one level.
///
/// `null` is read as an empty object and leaves the record untouched.
pub fn decode_record<R: Reflect + ?Sized>(
    record: &mut R,
    value: &Value,
    depth: Depth,
) -> Result<(), VariantError> {
    let depth = depth.descend()?;
    let input = value.get_object()?;
    for (key, item) in input {
        match record.field_mut(key) {
            Some(field) => field
                .update_dyn(item, depth)
                .map_err(|e| e.with_path(PathSegment::Field(key.clone())))?,
            None => {
                trace!(key = %key, "skipping unknown key");
            }
        }
    }
    Ok(())
}
