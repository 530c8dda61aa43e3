//! Conversions for optional values, pointers, tuples, sequences, sets and maps.
//!
//! Every container spends one level of budget before converting its elements,
//! and each element starts from the same reduced budget. Errors raised by an
//! element carry its position in the error path.
//!
//! Encodings:
//! - `Option<T>`: `None` is `null`, `Some(v)` is the encoding of `v`
//! - `Box<T>`, `Rc<T>`, `Arc<T>`: the encoding of the pointee
//! - tuples and `[T; N]`: an array with one slot per element
//! - sequences and sets: an array of members in iteration order
//! - maps: an array of `[key, value]` pair-arrays in iteration order
//!
//! Pointers never hold null, so they spend nothing; the level for a nullable
//! pointer is spent by its `Option`. `Option<Box<T>>` costs one level.
//!
//! Tuples and map entries decode leniently: slots missing from a shorter
//! input keep their value (a fresh decode starts from `Default`) and
//! elements past the last slot are ignored.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::convert::{FromVariant, ToVariant};
use crate::depth::Depth;
use crate::error::{ErrorKind, PathSegment, VariantError};
use crate::value::{VArray, Value};

fn at_index(index: usize) -> impl FnOnce(VariantError) -> VariantError {
    move |e| e.with_path(PathSegment::Index(index))
}

/// Encodes every item into an array, after spending one level.
fn encode_items<I>(items: I, depth: Depth) -> Result<Value, VariantError>
where
    I: IntoIterator,
    I::Item: ToVariant,
{
    let depth = depth.descend()?;
    let items = items.into_iter();
    let mut out = VArray::with_capacity(items.size_hint().0);
    for (i, item) in items.enumerate() {
        out.push(item.to_variant(depth).map_err(at_index(i))?);
    }
    Ok(Value::from(out))
}

/// Spends one level, then yields the decoded elements of an array.
///
/// The budget check and the tag check both happen before the first element
/// is produced, so callers can clear their target after this returns.
fn decode_items<T: FromVariant>(
    value: &Value,
    depth: Depth,
) -> Result<impl Iterator<Item = Result<T, VariantError>> + '_, VariantError> {
    let depth = depth.descend()?;
    let items = value.get_array()?;
    Ok(items
        .iter()
        .enumerate()
        .map(move |(i, item)| T::from_variant(item, depth).map_err(at_index(i))))
}

/// Spends one level, then yields the decoded `[key, value]` entries. Each
/// entry is decoded as a pair and spends a level of its own.
fn decode_entries<K: FromVariant + Default, V: FromVariant + Default>(
    value: &Value,
    depth: Depth,
) -> Result<impl Iterator<Item = Result<(K, V), VariantError>> + '_, VariantError> {
    let depth = depth.descend()?;
    let entries = value.get_array()?;
    Ok(entries
        .iter()
        .enumerate()
        .map(move |(i, entry)| <(K, V)>::from_variant(entry, depth).map_err(at_index(i))))
}

/// Fails when the input holds more elements than a fixed array can take.
///
/// A fixed array is a sequence, and sequence decoding keeps every input
/// element; tuples follow pair semantics instead and ignore the excess.
fn check_fits(len: usize, capacity: usize) -> Result<(), VariantError> {
    if len > capacity {
        return Err(VariantError::new(ErrorKind::IndexOutOfRange {
            index: capacity,
            len: capacity,
        }));
    }
    Ok(())
}

// === Option ===

impl<T: ToVariant> ToVariant for Option<T> {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        match self {
            None => Ok(Value::Null),
            Some(inner) => inner.to_variant(depth.descend()?),
        }
    }
}

impl<T: FromVariant> FromVariant for Option<T> {
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        match value {
            Value::Null => Ok(None),
            _ => T::from_variant(value, depth.descend()?).map(Some),
        }
    }

    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        if value.is_null() {
            *self = None;
            return Ok(());
        }
        let depth = depth.descend()?;
        match self {
            Some(inner) => inner.update_from_variant(value, depth),
            None => {
                *self = Some(T::from_variant(value, depth)?);
                Ok(())
            }
        }
    }
}

// === Pointers ===

impl<T: ToVariant + ?Sized> ToVariant for Box<T> {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        (**self).to_variant(depth)
    }
}

impl<T: FromVariant> FromVariant for Box<T> {
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        T::from_variant(value, depth).map(Box::new)
    }

    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        (**self).update_from_variant(value, depth)
    }
}

macro_rules! impl_shared_pointer {
    ($($ptr:ident),*) => {$(
        impl<T: ToVariant + ?Sized> ToVariant for $ptr<T> {
            fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
                (**self).to_variant(depth)
            }
        }

        impl<T: FromVariant> FromVariant for $ptr<T> {
            fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
                T::from_variant(value, depth).map($ptr::new)
            }

            /// Updates the pointee in place when this is the only handle,
            /// otherwise points `self` at a freshly decoded value.
            fn update_from_variant(
                &mut self,
                value: &Value,
                depth: Depth,
            ) -> Result<(), VariantError> {
                match $ptr::get_mut(self) {
                    Some(inner) => inner.update_from_variant(value, depth),
                    None => {
                        *self = $ptr::new(T::from_variant(value, depth)?);
                        Ok(())
                    }
                }
            }
        }
    )*};
}

impl_shared_pointer!(Rc, Arc);

// === Tuples ===

macro_rules! impl_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: ToVariant),+> ToVariant for ($($name,)+) {
            fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
                let depth = depth.descend()?;
                let items: VArray = alloc::vec![
                    $(self.$idx.to_variant(depth).map_err(at_index($idx))?),+
                ];
                Ok(Value::from(items))
            }
        }

        impl<$($name: FromVariant + Default),+> FromVariant for ($($name,)+) {
            fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
                let mut out = <Self as Default>::default();
                out.update_from_variant(value, depth)?;
                Ok(out)
            }

            /// Slots past the end of a shorter input keep their value;
            /// elements past the last slot are ignored.
            fn update_from_variant(
                &mut self,
                value: &Value,
                depth: Depth,
            ) -> Result<(), VariantError> {
                let depth = depth.descend()?;
                let items = value.get_array()?;
                $(
                    if let Some(item) = items.get($idx) {
                        self.$idx
                            .update_from_variant(item, depth)
                            .map_err(at_index($idx))?;
                    }
                )+
                Ok(())
            }
        }
    };
}

impl_tuple!(A: 0, B: 1);
impl_tuple!(A: 0, B: 1, C: 2);
impl_tuple!(A: 0, B: 1, C: 2, D: 3);

// === Sequences ===

impl<T: ToVariant> ToVariant for [T] {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        encode_items(self, depth)
    }
}

impl<T: ToVariant, const N: usize> ToVariant for [T; N] {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        encode_items(self, depth)
    }
}

impl<T: FromVariant + Default, const N: usize> FromVariant for [T; N] {
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        let mut out: [T; N] = core::array::from_fn(|_| T::default());
        out.update_from_variant(value, depth)?;
        Ok(out)
    }

    /// Trailing slots past the end of a shorter input keep their value.
    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        let depth = depth.descend()?;
        let items = value.get_array()?;
        check_fits(items.len(), N)?;
        for (i, (slot, item)) in self.iter_mut().zip(items).enumerate() {
            slot.update_from_variant(item, depth).map_err(at_index(i))?;
        }
        Ok(())
    }
}

impl<T: ToVariant> ToVariant for Vec<T> {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        encode_items(self, depth)
    }
}

impl<T: FromVariant> FromVariant for Vec<T> {
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        decode_items(value, depth)?.collect()
    }

    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        let items = decode_items(value, depth)?;
        self.clear();
        for item in items {
            self.push(item?);
        }
        Ok(())
    }
}

impl<T: ToVariant> ToVariant for VecDeque<T> {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        encode_items(self, depth)
    }
}

impl<T: FromVariant> FromVariant for VecDeque<T> {
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        decode_items(value, depth)?.collect()
    }

    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        let items = decode_items(value, depth)?;
        self.clear();
        for item in items {
            self.push_back(item?);
        }
        Ok(())
    }
}

impl<T: ToVariant> ToVariant for LinkedList<T> {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        encode_items(self, depth)
    }
}

impl<T: FromVariant> FromVariant for LinkedList<T> {
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        decode_items(value, depth)?.collect()
    }

    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        let items = decode_items(value, depth)?;
        self.clear();
        for item in items {
            self.push_back(item?);
        }
        Ok(())
    }
}

// === Sets ===

impl<T: ToVariant> ToVariant for BTreeSet<T> {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        encode_items(self, depth)
    }
}

impl<T: FromVariant + Ord> FromVariant for BTreeSet<T> {
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        decode_items(value, depth)?.collect()
    }

    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        let items = decode_items(value, depth)?;
        self.clear();
        for item in items {
            self.insert(item?);
        }
        Ok(())
    }
}

impl<T: ToVariant, S> ToVariant for HashSet<T, S> {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        encode_items(self, depth)
    }
}

impl<T, S> FromVariant for HashSet<T, S>
where
    T: FromVariant + Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        decode_items(value, depth)?.collect()
    }

    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        let items = decode_items(value, depth)?;
        self.clear();
        for item in items {
            self.insert(item?);
        }
        Ok(())
    }
}

// === Maps ===

impl<K: ToVariant, V: ToVariant> ToVariant for BTreeMap<K, V> {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        encode_items(self, depth)
    }
}

impl<K: FromVariant + Default + Ord, V: FromVariant + Default> FromVariant for BTreeMap<K, V> {
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        decode_entries(value, depth)?.collect()
    }

    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        let entries = decode_entries(value, depth)?;
        self.clear();
        for entry in entries {
            let (k, v) = entry?;
            self.insert(k, v);
        }
        Ok(())
    }
}

impl<K: ToVariant, V: ToVariant, S> ToVariant for HashMap<K, V, S> {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        encode_items(self, depth)
    }
}

impl<K, V, S> FromVariant for HashMap<K, V, S>
where
    K: FromVariant + Default + Eq + Hash,
    V: FromVariant + Default,
    S: BuildHasher + Default,
{
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        decode_entries(value, depth)?.collect()
    }

    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        let entries = decode_entries(value, depth)?;
        self.clear();
        for entry in entries {
            let (k, v) = entry?;
            self.insert(k, v);
        }
        Ok(())
    }
}

impl<K: ToVariant, V: ToVariant, S> ToVariant for IndexMap<K, V, S> {
    fn to_variant(&self, depth: Depth) -> Result<Value, VariantError> {
        encode_items(self, depth)
    }
}

impl<K, V, S> FromVariant for IndexMap<K, V, S>
where
    K: FromVariant + Default + Eq + Hash,
    V: FromVariant + Default,
    S: BuildHasher + Default,
{
    fn from_variant(value: &Value, depth: Depth) -> Result<Self, VariantError> {
        decode_entries(value, depth)?.collect()
    }

    fn update_from_variant(&mut self, value: &Value, depth: Depth) -> Result<(), VariantError> {
        let entries = decode_entries(value, depth)?;
        self.clear();
        for entry in entries {
            let (k, v) = entry?;
            self.insert(k, v);
        }
        Ok(())
    }
}
