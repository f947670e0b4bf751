// Copyright 2023 Greptime Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use common_time::Date;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::bytes::{Bytes, StringBytes};
use crate::data_type::ConcreteDataType;
use crate::decimal::Decimal128;
use crate::type_id::LogicalTypeId;

pub type OrderedF32 = OrderedFloat<f32>;
pub type OrderedF64 = OrderedFloat<f64>;

/// Value holds a single arbitrary value of any [DataType](crate::data_type::DataType).
///
/// Comparisons between values of the same logical type follow the type's
/// natural order (floats use the total order of [OrderedFloat]); values of
/// different logical types order by [LogicalTypeId] so that `Value` can key
/// ordered containers, with `Null` smaller than everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Null,

    Boolean(bool),

    // Numeric types:
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(OrderedF32),
    Float64(OrderedF64),

    // Decimal type:
    Decimal128(Decimal128),

    // String types:
    String(StringBytes),
    Binary(Bytes),

    // Date type:
    Date(Date),
}

impl Value {
    /// Returns data type of the value.
    ///
    /// # Panics
    /// Panics if the data type is not supported.
    pub fn data_type(&self) -> ConcreteDataType {
        match self {
            Value::Null => ConcreteDataType::null_datatype(),
            Value::Boolean(_) => ConcreteDataType::boolean_datatype(),
            Value::UInt8(_) => ConcreteDataType::uint8_datatype(),
            Value::UInt16(_) => ConcreteDataType::uint16_datatype(),
            Value::UInt32(_) => ConcreteDataType::uint32_datatype(),
            Value::UInt64(_) => ConcreteDataType::uint64_datatype(),
            Value::Int8(_) => ConcreteDataType::int8_datatype(),
            Value::Int16(_) => ConcreteDataType::int16_datatype(),
            Value::Int32(_) => ConcreteDataType::int32_datatype(),
            Value::Int64(_) => ConcreteDataType::int64_datatype(),
            Value::Float32(_) => ConcreteDataType::float32_datatype(),
            Value::Float64(_) => ConcreteDataType::float64_datatype(),
            Value::Decimal128(d) => ConcreteDataType::decimal128_datatype(d.precision(), d.scale()),
            Value::String(_) => ConcreteDataType::string_datatype(),
            Value::Binary(_) => ConcreteDataType::binary_datatype(),
            Value::Date(_) => ConcreteDataType::date_datatype(),
        }
    }

    /// Returns the logical type of the value.
    pub fn logical_type_id(&self) -> LogicalTypeId {
        match self {
            Value::Null => LogicalTypeId::Null,
            Value::Boolean(_) => LogicalTypeId::Boolean,
            Value::UInt8(_) => LogicalTypeId::UInt8,
            Value::UInt16(_) => LogicalTypeId::UInt16,
            Value::UInt32(_) => LogicalTypeId::UInt32,
            Value::UInt64(_) => LogicalTypeId::UInt64,
            Value::Int8(_) => LogicalTypeId::Int8,
            Value::Int16(_) => LogicalTypeId::Int16,
            Value::Int32(_) => LogicalTypeId::Int32,
            Value::Int64(_) => LogicalTypeId::Int64,
            Value::Float32(_) => LogicalTypeId::Float32,
            Value::Float64(_) => LogicalTypeId::Float64,
            Value::Decimal128(_) => LogicalTypeId::Decimal128,
            Value::String(_) => LogicalTypeId::String,
            Value::Binary(_) => LogicalTypeId::Binary,
            Value::Date(_) => LogicalTypeId::Date,
        }
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Boolean(v1), Value::Boolean(v2)) => v1.cmp(v2),
            (Value::UInt8(v1), Value::UInt8(v2)) => v1.cmp(v2),
            (Value::UInt16(v1), Value::UInt16(v2)) => v1.cmp(v2),
            (Value::UInt32(v1), Value::UInt32(v2)) => v1.cmp(v2),
            (Value::UInt64(v1), Value::UInt64(v2)) => v1.cmp(v2),
            (Value::Int8(v1), Value::Int8(v2)) => v1.cmp(v2),
            (Value::Int16(v1), Value::Int16(v2)) => v1.cmp(v2),
            (Value::Int32(v1), Value::Int32(v2)) => v1.cmp(v2),
            (Value::Int64(v1), Value::Int64(v2)) => v1.cmp(v2),
            (Value::Float32(v1), Value::Float32(v2)) => v1.cmp(v2),
            (Value::Float64(v1), Value::Float64(v2)) => v1.cmp(v2),
            (Value::Decimal128(v1), Value::Decimal128(v2)) => v1.cmp(v2),
            (Value::String(v1), Value::String(v2)) => v1.cmp(v2),
            (Value::Binary(v1), Value::Binary(v2)) => v1.cmp(v2),
            (Value::Date(v1), Value::Date(v2)) => v1.cmp(v2),
            (v1, v2) => v1.logical_type_id().cmp(&v2.logical_type_id()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Decimal128(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{}", v.as_utf8()),
            Value::Binary(v) => write!(f, "{:?}", v.as_ref()),
            Value::Date(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_value_from {
    ($Variant: ident, $Type: ident) => {
        impl From<$Type> for Value {
            fn from(value: $Type) -> Self {
                Value::$Variant(value.into())
            }
        }
    };
}

impl_value_from!(Boolean, bool);
impl_value_from!(UInt8, u8);
impl_value_from!(UInt16, u16);
impl_value_from!(UInt32, u32);
impl_value_from!(UInt64, u64);
impl_value_from!(Int8, i8);
impl_value_from!(Int16, i16);
impl_value_from!(Int32, i32);
impl_value_from!(Int64, i64);
impl_value_from!(Float32, f32);
impl_value_from!(Float64, f64);
impl_value_from!(Decimal128, Decimal128);
impl_value_from!(String, StringBytes);
impl_value_from!(Date, Date);

impl From<String> for Value {
    fn from(string: String) -> Value {
        Value::String(string.into())
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Value {
        Value::String(string.into())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Value {
        Value::Binary(bytes.into())
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Value {
        Value::Binary(bytes.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_data_type() {
        assert_eq!(
            ConcreteDataType::int32_datatype(),
            Value::Int32(42).data_type()
        );
        assert_eq!(
            ConcreteDataType::string_datatype(),
            Value::from("hello").data_type()
        );
        assert_eq!(
            ConcreteDataType::decimal128_datatype(5, 2),
            Value::from(Decimal128::new(12345, 5, 2)).data_type()
        );
        assert_eq!(ConcreteDataType::null_datatype(), Value::Null.data_type());
    }

    #[test]
    fn test_value_ordering() {
        assert!(Value::Int32(1) < Value::Int32(2));
        assert!(Value::Null < Value::Int32(i32::MIN));
        assert!(Value::from("ab") < Value::from("b"));
        assert!(Value::Date(Date::new(0)) < Value::Date(Date::new(1)));
        assert!(Value::Float64(OrderedFloat(1.0)) < Value::Float64(OrderedFloat(1.5)));
        // NaN is ordered greater than any other float.
        assert!(Value::Float64(OrderedFloat(f64::MAX)) < Value::Float64(OrderedFloat(f64::NAN)));
    }

    #[test]
    fn test_value_display() {
        assert_eq!("42", Value::Int32(42).to_string());
        assert_eq!("hello", Value::from("hello").to_string());
        assert_eq!("1970-01-02", Value::Date(Date::new(1)).to_string());
        assert_eq!("123.45", Value::from(Decimal128::new(12345, 5, 2)).to_string());
        assert_eq!("Null", Value::Null.to_string());
    }

    #[test]
    fn test_value_serde() {
        let values = [
            Value::Null,
            Value::Boolean(true),
            Value::Int64(-7),
            Value::UInt64(7),
            Value::Float64(OrderedFloat(3.25)),
            Value::from("hello"),
            Value::from(vec![1u8, 2, 3]),
            Value::Date(Date::new(42)),
            Value::from(Decimal128::new(12345, 5, 2)),
        ];
        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            assert_eq!(value, serde_json::from_str(&json).unwrap());
        }
    }
}
