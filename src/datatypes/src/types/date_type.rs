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

use common_time::Date;
use serde::{Deserialize, Serialize};

use crate::data_type::{DataType, DiscreteDomain};
use crate::type_id::LogicalTypeId;
use crate::value::Value;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DateType;

impl DataType for DateType {
    fn name(&self) -> String {
        "Date".to_string()
    }

    fn logical_type_id(&self) -> LogicalTypeId {
        LogicalTypeId::Date
    }

    fn default_value(&self) -> Value {
        Value::Date(Date::default())
    }
}

impl DiscreteDomain for DateType {
    fn next_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Date(date) => date.checked_add_days(1).map(Value::Date),
            _ => None,
        }
    }

    fn prev_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Date(date) => date.checked_add_days(-1).map(Value::Date),
            _ => None,
        }
    }

    fn value_bounds(&self) -> (Value, Value) {
        (Value::Date(Date::MIN), Value::Date(Date::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_stepping() {
        assert_eq!(
            Some(Value::Date(Date::new(1))),
            DateType.next_value(&Value::Date(Date::new(0)))
        );
        assert_eq!(
            Some(Value::Date(Date::new(-1))),
            DateType.prev_value(&Value::Date(Date::new(0)))
        );
        assert_eq!(None, DateType.next_value(&Value::Date(Date::MAX)));
        assert_eq!(None, DateType.prev_value(&Value::Date(Date::MIN)));
    }
}
