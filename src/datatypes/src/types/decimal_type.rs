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
use crate::decimal::Decimal128;
use crate::type_id::LogicalTypeId;
use crate::value::Value;

/// Decimals with the same precision and scale belong to the same logical
/// type; `Decimal128(10, 2)` and `Decimal128(10, 3)` are distinct types.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Decimal128Type {
    precision: u8,
    scale: i8,
}

impl Decimal128Type {
    pub fn new(precision: u8, scale: i8) -> Self {
        Self { precision, scale }
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn scale(&self) -> i8 {
        self.scale
    }
}

impl DataType for Decimal128Type {
    fn name(&self) -> String {
        format!("Decimal128({}, {})", self.precision, self.scale)
    }

    fn logical_type_id(&self) -> LogicalTypeId {
        LogicalTypeId::Decimal128
    }

    fn default_value(&self) -> Value {
        Value::Decimal128(Decimal128::new(0, self.precision, self.scale))
    }
}

impl DiscreteDomain for Decimal128Type {
    fn next_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Decimal128(d) => d.checked_next().map(Value::Decimal128),
            _ => None,
        }
    }

    fn prev_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Decimal128(d) => d.checked_prev().map(Value::Decimal128),
            _ => None,
        }
    }

    fn value_bounds(&self) -> (Value, Value) {
        (
            Value::Decimal128(Decimal128::min_value(self.precision, self.scale)),
            Value::Decimal128(Decimal128::max_value(self.precision, self.scale)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_type() {
        let data_type = Decimal128Type::new(10, 2);
        assert_eq!("Decimal128(10, 2)", data_type.name());
        assert_eq!(
            Value::Decimal128(Decimal128::new(0, 10, 2)),
            data_type.default_value()
        );
    }

    #[test]
    fn test_decimal_stepping() {
        let data_type = Decimal128Type::new(3, 1);
        assert_eq!(
            Some(Value::Decimal128(Decimal128::new(124, 3, 1))),
            data_type.next_value(&Value::Decimal128(Decimal128::new(123, 3, 1)))
        );
        assert_eq!(
            None,
            data_type.next_value(&Value::Decimal128(Decimal128::new(999, 3, 1)))
        );
        let (min, max) = data_type.value_bounds();
        assert_eq!(Value::Decimal128(Decimal128::new(-999, 3, 1)), min);
        assert_eq!(Value::Decimal128(Decimal128::new(999, 3, 1)), max);
    }
}
