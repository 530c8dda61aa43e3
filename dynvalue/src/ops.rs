//! Arithmetic over numeric values.
//!
//! Both operands must be numeric (`int64`, `uint64`, `double` or `bool`).
//! The result type is the common representation of the two:
//! - `double` if either side is a double
//! - otherwise `int64` if either side is signed, or both are booleans
//! - otherwise `uint64`
//!
//! Integer overflow and integer division by zero are conversion failures
//! rather than panics or silent wrap-around.

use alloc::format;
use core::ops::{Add, Div, Mul, Not, Sub};

use crate::error::VariantError;
use crate::value::Value;

#[derive(Clone, Copy)]
enum Common {
    Double,
    Int64,
    UInt64,
}

fn common_type(lhs: &Value, rhs: &Value) -> Result<Common, VariantError> {
    for operand in [lhs, rhs] {
        if !operand.is_numeric() {
            return Err(VariantError::type_mismatch("numeric", operand.value_type()));
        }
    }
    Ok(if lhs.is_double() || rhs.is_double() {
        Common::Double
    } else if lhs.is_int64() || rhs.is_int64() || (lhs.is_bool() && rhs.is_bool()) {
        Common::Int64
    } else {
        Common::UInt64
    })
}

fn signed(v: &Value) -> Result<i64, VariantError> {
    match v {
        Value::UInt64(u) => i64::try_from(*u)
            .map_err(|_| VariantError::conversion("i64", format!("{u} out of range for i64"))),
        other => other.as_int64(),
    }
}

fn arith(
    lhs: &Value,
    rhs: &Value,
    symbol: &'static str,
    int: fn(i64, i64) -> Option<i64>,
    uint: fn(u64, u64) -> Option<u64>,
    float: fn(f64, f64) -> f64,
) -> Result<Value, VariantError> {
    match common_type(lhs, rhs)? {
        Common::Double => Ok(Value::Double(float(lhs.as_double()?, rhs.as_double()?))),
        Common::Int64 => {
            let (a, b) = (signed(lhs)?, signed(rhs)?);
            int(a, b).map(Value::Int64).ok_or_else(|| {
                VariantError::conversion("i64", format!("{a} {symbol} {b} is not representable"))
            })
        }
        Common::UInt64 => {
            let (a, b) = (lhs.as_uint64()?, rhs.as_uint64()?);
            uint(a, b).map(Value::UInt64).ok_or_else(|| {
                VariantError::conversion("u64", format!("{a} {symbol} {b} is not representable"))
            })
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $symbol:literal, $checked:ident, $op:tt) => {
        impl $trait<&Value> for &Value {
            type Output = Result<Value, VariantError>;

            fn $method(self, rhs: &Value) -> Self::Output {
                arith(
                    self,
                    rhs,
                    $symbol,
                    i64::$checked,
                    u64::$checked,
                    |a, b| a $op b,
                )
            }
        }

        impl $trait for Value {
            type Output = Result<Value, VariantError>;

            fn $method(self, rhs: Value) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, "+", checked_add, +);
impl_binary_op!(Sub, sub, "-", checked_sub, -);
impl_binary_op!(Mul, mul, "*", checked_mul, *);
impl_binary_op!(Div, div, "/", checked_div, /);

impl Not for &Value {
    type Output = Result<Value, VariantError>;

    fn not(self) -> Self::Output {
        Ok(Value::Bool(!self.as_bool()?))
    }
}

impl Not for Value {
    type Output = Result<Value, VariantError>;

    fn not(self) -> Self::Output {
        !&self
    }
}
