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

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::type_id::LogicalTypeId;
use crate::types::{
    BinaryType, BooleanType, DateType, Decimal128Type, Float32Type, Float64Type, Int16Type,
    Int32Type, Int64Type, Int8Type, NullType, StringType, UInt16Type, UInt32Type, UInt64Type,
    UInt8Type,
};
use crate::value::Value;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[enum_dispatch::enum_dispatch(DataType)]
pub enum ConcreteDataType {
    Null(NullType),
    Boolean(BooleanType),

    // Numeric types:
    Int8(Int8Type),
    Int16(Int16Type),
    Int32(Int32Type),
    Int64(Int64Type),
    UInt8(UInt8Type),
    UInt16(UInt16Type),
    UInt32(UInt32Type),
    UInt64(UInt64Type),
    Float32(Float32Type),
    Float64(Float64Type),

    // Decimal128 type:
    Decimal128(Decimal128Type),

    // String types:
    Binary(BinaryType),
    String(StringType),

    // Date type:
    Date(DateType),
}

impl fmt::Display for ConcreteDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl ConcreteDataType {
    pub fn null_datatype() -> ConcreteDataType {
        ConcreteDataType::Null(NullType)
    }

    pub fn boolean_datatype() -> ConcreteDataType {
        ConcreteDataType::Boolean(BooleanType)
    }

    pub fn int8_datatype() -> ConcreteDataType {
        ConcreteDataType::Int8(Int8Type)
    }

    pub fn int16_datatype() -> ConcreteDataType {
        ConcreteDataType::Int16(Int16Type)
    }

    pub fn int32_datatype() -> ConcreteDataType {
        ConcreteDataType::Int32(Int32Type)
    }

    pub fn int64_datatype() -> ConcreteDataType {
        ConcreteDataType::Int64(Int64Type)
    }

    pub fn uint8_datatype() -> ConcreteDataType {
        ConcreteDataType::UInt8(UInt8Type)
    }

    pub fn uint16_datatype() -> ConcreteDataType {
        ConcreteDataType::UInt16(UInt16Type)
    }

    pub fn uint32_datatype() -> ConcreteDataType {
        ConcreteDataType::UInt32(UInt32Type)
    }

    pub fn uint64_datatype() -> ConcreteDataType {
        ConcreteDataType::UInt64(UInt64Type)
    }

    pub fn float32_datatype() -> ConcreteDataType {
        ConcreteDataType::Float32(Float32Type)
    }

    pub fn float64_datatype() -> ConcreteDataType {
        ConcreteDataType::Float64(Float64Type)
    }

    pub fn decimal128_datatype(precision: u8, scale: i8) -> ConcreteDataType {
        ConcreteDataType::Decimal128(Decimal128Type::new(precision, scale))
    }

    pub fn string_datatype() -> ConcreteDataType {
        ConcreteDataType::String(StringType)
    }

    pub fn binary_datatype() -> ConcreteDataType {
        ConcreteDataType::Binary(BinaryType)
    }

    pub fn date_datatype() -> ConcreteDataType {
        ConcreteDataType::Date(DateType)
    }

    /// The discrete-domain capability of this type.
    ///
    /// Absent for continuous or unenumerable types (floats, strings,
    /// binaries), for which there is no "value right after this one".
    pub fn discrete_domain(&self) -> Option<&dyn DiscreteDomain> {
        match self {
            ConcreteDataType::Boolean(t) => Some(t),
            ConcreteDataType::Int8(t) => Some(t),
            ConcreteDataType::Int16(t) => Some(t),
            ConcreteDataType::Int32(t) => Some(t),
            ConcreteDataType::Int64(t) => Some(t),
            ConcreteDataType::UInt8(t) => Some(t),
            ConcreteDataType::UInt16(t) => Some(t),
            ConcreteDataType::UInt32(t) => Some(t),
            ConcreteDataType::UInt64(t) => Some(t),
            ConcreteDataType::Decimal128(t) => Some(t),
            ConcreteDataType::Date(t) => Some(t),
            ConcreteDataType::Null(_)
            | ConcreteDataType::Float32(_)
            | ConcreteDataType::Float64(_)
            | ConcreteDataType::Binary(_)
            | ConcreteDataType::String(_) => None,
        }
    }
}

/// Behaviors of a logical data type.
#[enum_dispatch::enum_dispatch]
pub trait DataType: std::fmt::Debug + Send + Sync {
    /// Name of this data type.
    fn name(&self) -> String;

    /// Id of the logical data type.
    fn logical_type_id(&self) -> LogicalTypeId;

    /// Default value of this data type.
    fn default_value(&self) -> Value;
}

/// Stepping over the values of a discrete, bounded data type.
///
/// `next_value`/`prev_value` step by the smallest representable unit of the
/// type (1 for integers, one day for dates, one ulp at the declared scale
/// for decimals) and return `None` at the edge of the domain.
pub trait DiscreteDomain: Send + Sync {
    /// The value immediately after `value`, `None` when `value` is the
    /// largest value of the domain (or not of this type).
    fn next_value(&self, value: &Value) -> Option<Value>;

    /// The value immediately before `value`, `None` when `value` is the
    /// smallest value of the domain (or not of this type).
    fn prev_value(&self, value: &Value) -> Option<Value>;

    /// The smallest and the largest value of the domain.
    fn value_bounds(&self) -> (Value, Value);
}

/// Iterator over the ascending values of `[low, high]`, both ends inclusive.
pub struct DiscreteValues<'a> {
    domain: &'a dyn DiscreteDomain,
    next: Option<Value>,
    high: Value,
}

impl<'a> DiscreteValues<'a> {
    pub fn new(domain: &'a dyn DiscreteDomain, low: Value, high: Value) -> Self {
        Self {
            domain,
            next: Some(low),
            high,
        }
    }
}

impl Iterator for DiscreteValues<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let current = self.next.take()?;
        if current > self.high {
            return None;
        }
        self.next = self.domain.next_value(&current);
        Some(current)
    }
}
