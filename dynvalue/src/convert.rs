//! The conversion contract between typed Rust values and [`Value`].
//!
//! [`ToVariant`] and [`FromVariant`] are the two halves of the dispatch. Every
//! supported type implements both (or `ToVariant` alone for unsized borrowed
//! forms like `str` and slices). Implementations of containers call
//! [`Depth::descend`] once before touching their elements and pass the
//! reduced budget down; leaf implementations ignore the budget.

use crate::depth::Depth;
use crate::error::VariantError;
use crate::value::Value;

/// Converts a typed value into a [`Value`] tree.
pub trait ToVariant {
    /// Encodes `self`, spending `depth` on every structural descent.
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError>;
}

/// Converts a [`Value`] tree into a typed value.
pub trait FromVariant: Sized {
    /// Decodes a fresh instance.
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError>;

    /// Decodes into an existing instance.
    ///
    /// Containers and records override this to update in place: records keep
    /// the fields the input does not mention, pointers reuse their
    /// allocation. The default replaces `self` wholesale, and leaves it
    /// untouched on error.
    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        *self = Self::from_variant(value, depth)?;
        Ok(())
    }
}

/// Object-safe form of [`FromVariant::update_from_variant`].
///
/// Record field lookup hands out `&mut dyn DynFromVariant` so a record can be
/// decoded without knowing its field types.
pub trait DynFromVariant {
    /// Decodes `value` into `self`.
    fn update_dyn(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError>;
}

impl<T: FromVariant> DynFromVariant for T {
    fn update_dyn(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        self.update_from_variant(value, depth)
    }
}

impl<T: ToVariant + ?Sized> ToVariant for &T {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        (**self).to_variant(depth)
    }
}

impl<T: ToVariant + ?Sized> ToVariant for &mut T {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        (**self).to_variant(depth)
    }
}

/// Encodes `value` with the process-wide default budget.
pub fn to_value<T: ToVariant + ?Sized>(value: &T) -> Result<Value, VariantError> {
    to_value_with_depth(value, Depth::default())
}

/// Encodes `value` with an explicit budget.
pub fn to_value_with_depth<T: ToVariant + ?Sized>(
    value: &T,
    depth: Depth,
) -> Result<Value, VariantError> {
    value
        .to_variant(depth)
        .map_err(|e| e.with_budget(depth.remaining()))
}

/// Decodes a `T` with the process-wide default budget.
pub fn from_value<T: FromVariant>(value: &Value) -> Result<T, VariantError> {
    from_value_with_depth(value, Depth::default())
}

/// Decodes a `T` with an explicit budget.
pub fn from_value_with_depth<T: FromVariant>(
    value: &Value,
    depth: Depth,
) -> Result<T, VariantError> {
    T::from_variant(value, depth).map_err(|e| e.with_budget(depth.remaining()))
}

/// Decodes into an existing `T`, keeping whatever the input does not cover.
///
/// On error `target` may be partially updated: for records, fields decoded
/// before the failing one keep their new values.
pub fn from_value_into<T: FromVariant>(
    value: &Value,
    target: &mut T,
    depth: Depth,
) -> Result<(), VariantError> {
    target
        .update_from_variant(value, depth)
        .map_err(|e| e.with_budget(depth.remaining()))
}

impl Value {
    /// Builds a `Value` from any convertible type.
    pub fn encode<T: ToVariant + ?Sized>(source: &T, depth: Depth) -> Result<Value, VariantError> {
        to_value_with_depth(source, depth)
    }

    /// Converts this value to a new `T`.
    pub fn decode<T: FromVariant>(&self, depth: Depth) -> Result<T, VariantError> {
        from_value_with_depth(self, depth)
    }

    /// Converts this value into an existing `T`.
    pub fn decode_into<T: FromVariant>(
        &self,
        target: &mut T,
        depth: Depth,
    ) -> Result<(), VariantError> {
        from_value_into(self, target, depth)
    }
}
