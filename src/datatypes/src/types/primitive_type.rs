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

use serde::{Deserialize, Serialize};

use crate::data_type::{DataType, DiscreteDomain};
use crate::type_id::LogicalTypeId;
use crate::value::Value;

macro_rules! define_primitive_type {
    ($Native: ident, $TypeId: ident, $DataType: ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
            Deserialize,
        )]
        pub struct $DataType;

        impl DataType for $DataType {
            fn name(&self) -> String {
                stringify!($TypeId).to_string()
            }

            fn logical_type_id(&self) -> LogicalTypeId {
                LogicalTypeId::$TypeId
            }

            fn default_value(&self) -> Value {
                Value::$TypeId($Native::default().into())
            }
        }
    };
}

macro_rules! define_integer_type {
    ($Native: ident, $TypeId: ident, $DataType: ident) => {
        define_primitive_type!($Native, $TypeId, $DataType);

        impl DiscreteDomain for $DataType {
            fn next_value(&self, value: &Value) -> Option<Value> {
                match value {
                    Value::$TypeId(v) => v.checked_add(1).map(Value::$TypeId),
                    _ => None,
                }
            }

            fn prev_value(&self, value: &Value) -> Option<Value> {
                match value {
                    Value::$TypeId(v) => v.checked_sub(1).map(Value::$TypeId),
                    _ => None,
                }
            }

            fn value_bounds(&self) -> (Value, Value) {
                (Value::$TypeId($Native::MIN), Value::$TypeId($Native::MAX))
            }
        }
    };
}

define_integer_type!(u8, UInt8, UInt8Type);
define_integer_type!(u16, UInt16, UInt16Type);
define_integer_type!(u32, UInt32, UInt32Type);
define_integer_type!(u64, UInt64, UInt64Type);
define_integer_type!(i8, Int8, Int8Type);
define_integer_type!(i16, Int16, Int16Type);
define_integer_type!(i32, Int32, Int32Type);
define_integer_type!(i64, Int64, Int64Type);

// Floats are a continuous space, they have no discrete domain.
define_primitive_type!(f32, Float32, Float32Type);
define_primitive_type!(f64, Float64, Float64Type);

#[cfg(test)]
mod tests {
    use ordered_float::OrderedFloat;

    use super::*;

    #[test]
    fn test_name_and_default() {
        assert_eq!("Int32", Int32Type.name());
        assert_eq!(LogicalTypeId::Int32, Int32Type.logical_type_id());
        assert_eq!(Value::Int32(0), Int32Type.default_value());
        assert_eq!(Value::Float64(OrderedFloat(0.0)), Float64Type.default_value());
    }

    #[test]
    fn test_integer_stepping() {
        assert_eq!(Some(Value::Int32(6)), Int32Type.next_value(&Value::Int32(5)));
        assert_eq!(Some(Value::Int32(4)), Int32Type.prev_value(&Value::Int32(5)));
        assert_eq!(None, Int32Type.next_value(&Value::Int32(i32::MAX)));
        assert_eq!(None, Int32Type.prev_value(&Value::Int32(i32::MIN)));
        assert_eq!(None, UInt8Type.prev_value(&Value::UInt8(0)));
        // Value of a foreign type never steps.
        assert_eq!(None, Int32Type.next_value(&Value::Int64(5)));
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(
            (Value::Int8(i8::MIN), Value::Int8(i8::MAX)),
            Int8Type.value_bounds()
        );
        assert_eq!(
            (Value::UInt64(u64::MIN), Value::UInt64(u64::MAX)),
            UInt64Type.value_bounds()
        );
    }
}
