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

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BooleanType;

impl DataType for BooleanType {
    fn name(&self) -> String {
        "Boolean".to_string()
    }

    fn logical_type_id(&self) -> LogicalTypeId {
        LogicalTypeId::Boolean
    }

    fn default_value(&self) -> Value {
        Value::Boolean(false)
    }
}

impl DiscreteDomain for BooleanType {
    fn next_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Boolean(false) => Some(Value::Boolean(true)),
            _ => None,
        }
    }

    fn prev_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Boolean(true) => Some(Value::Boolean(false)),
            _ => None,
        }
    }

    fn value_bounds(&self) -> (Value, Value) {
        (Value::Boolean(false), Value::Boolean(true))
    }
}
