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

use datatypes::prelude::{ConcreteDataType, Value};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value_set::ValueSet;

/// The predicate of a single column: the set of non-null values the column
/// may take, plus whether SQL `NULL` is also allowed.
///
/// Logical `AND` of two predicates over the same column maps to
/// [Domain::intersect], `OR` to [Domain::union] and `NOT` to
/// [Domain::complement]. A domain whose [Domain::is_none] means no row can
/// match; [Domain::is_all] means the predicate filters nothing. Both are
/// ordinary terminal forms, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    values: ValueSet,
    null_allowed: bool,
}

impl Domain {
    pub fn new(values: ValueSet, null_allowed: bool) -> Domain {
        Domain {
            values,
            null_allowed,
        }
    }

    /// Domain matching no row.
    pub fn none(data_type: ConcreteDataType) -> Domain {
        Domain::new(ValueSet::none(data_type), false)
    }

    /// Domain matching every row.
    pub fn all(data_type: ConcreteDataType) -> Domain {
        Domain::new(ValueSet::all(data_type), true)
    }

    /// Domain matching only `NULL` rows.
    pub fn only_null(data_type: ConcreteDataType) -> Domain {
        Domain::new(ValueSet::none(data_type), true)
    }

    /// Domain matching every non-null row.
    pub fn not_null(data_type: ConcreteDataType) -> Domain {
        Domain::new(ValueSet::all(data_type), false)
    }

    /// Domain matching rows equal to `value`.
    pub fn single_value(data_type: ConcreteDataType, value: Value) -> Result<Domain> {
        Ok(Domain::new(ValueSet::of_values(data_type, [value])?, false))
    }

    /// Domain matching rows equal to any of `values`.
    pub fn multiple_values(
        data_type: ConcreteDataType,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Domain> {
        Ok(Domain::new(ValueSet::of_values(data_type, values)?, false))
    }

    pub fn values(&self) -> &ValueSet {
        &self.values
    }

    pub fn is_null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn data_type(&self) -> &ConcreteDataType {
        self.values.data_type()
    }

    pub fn is_none(&self) -> bool {
        self.values.is_none() && !self.null_allowed
    }

    pub fn is_all(&self) -> bool {
        self.values.is_all() && self.null_allowed
    }

    pub fn is_only_null(&self) -> bool {
        self.values.is_none() && self.null_allowed
    }

    pub fn is_single_value(&self) -> bool {
        !self.null_allowed && self.values.is_single_value()
    }

    /// The single non-null value of the domain, failing unless
    /// [Domain::is_single_value].
    pub fn as_single_value(&self) -> Result<&Value> {
        self.values.single_value()
    }

    /// Whether a row with the given column value matches; `None` stands for
    /// SQL `NULL`.
    pub fn includes_value(&self, value: Option<&Value>) -> Result<bool> {
        match value {
            None => Ok(self.null_allowed),
            Some(value) if value.is_null() => Ok(self.null_allowed),
            Some(value) => self.values.contains_value(value),
        }
    }

    /// Logical `AND` of the two predicates.
    pub fn intersect(&self, other: &Domain) -> Result<Domain> {
        Ok(Domain::new(
            self.values.intersect(&other.values)?,
            self.null_allowed && other.null_allowed,
        ))
    }

    /// Logical `OR` of the two predicates.
    pub fn union(&self, other: &Domain) -> Result<Domain> {
        Ok(Domain::new(
            self.values.union(&other.values)?,
            self.null_allowed || other.null_allowed,
        ))
    }

    /// Logical `NOT` of the predicate.
    pub fn complement(&self) -> Result<Domain> {
        Ok(Domain::new(self.values.complement()?, !self.null_allowed))
    }

    /// Whether some row matches both predicates.
    pub fn overlaps(&self, other: &Domain) -> Result<bool> {
        if self.null_allowed && other.null_allowed {
            return Ok(true);
        }
        self.values.overlaps(&other.values)
    }
}

#[cfg(test)]
mod tests {
    use datatypes::prelude::*;

    use super::*;
    use crate::range::Range;

    fn int32_type() -> ConcreteDataType {
        ConcreteDataType::int32_datatype()
    }

    fn int_domain(low: i32, high: i32) -> Domain {
        Domain::new(
            ValueSet::of_ranges(
                int32_type(),
                [Range::range(int32_type(), Value::Int32(low), true, Value::Int32(high), true)
                    .unwrap()],
            )
            .unwrap(),
            false,
        )
    }

    #[test]
    fn test_terminal_forms() {
        assert!(Domain::none(int32_type()).is_none());
        assert!(Domain::all(int32_type()).is_all());
        assert!(Domain::only_null(int32_type()).is_only_null());
        assert!(!Domain::not_null(int32_type()).is_null_allowed());

        let single = Domain::single_value(int32_type(), Value::Int32(5)).unwrap();
        assert!(single.is_single_value());
        assert_eq!(&Value::Int32(5), single.as_single_value().unwrap());
    }

    #[test]
    fn test_multiple_values() {
        // An IN-list predicate.
        let domain = Domain::multiple_values(
            int32_type(),
            [Value::Int32(1), Value::Int32(5), Value::Int32(9)],
        )
        .unwrap();
        assert!(domain.includes_value(Some(&Value::Int32(5))).unwrap());
        assert!(!domain.includes_value(Some(&Value::Int32(4))).unwrap());
        assert!(!domain.includes_value(None).unwrap());
        assert!(domain.values().is_discrete_set());
    }

    #[test]
    fn test_includes_value() {
        let domain = int_domain(1, 10);
        assert!(domain.includes_value(Some(&Value::Int32(5))).unwrap());
        assert!(!domain.includes_value(Some(&Value::Int32(11))).unwrap());
        assert!(!domain.includes_value(None).unwrap());
        assert!(!domain.includes_value(Some(&Value::Null)).unwrap());

        let nullable = Domain::only_null(int32_type());
        assert!(nullable.includes_value(None).unwrap());
        assert!(!nullable.includes_value(Some(&Value::Int32(5))).unwrap());
    }

    #[test]
    fn test_intersect_and_union_null_handling() {
        let only_null = Domain::only_null(int32_type());
        let not_null = Domain::not_null(int32_type());

        assert!(only_null.intersect(&not_null).unwrap().is_none());
        assert!(only_null.union(&not_null).unwrap().is_all());

        let left = int_domain(1, 10);
        let nullable_right = Domain::new(
            ValueSet::of_ranges(
                int32_type(),
                [Range::range(int32_type(), Value::Int32(5), true, Value::Int32(15), true)
                    .unwrap()],
            )
            .unwrap(),
            true,
        );
        let intersection = left.intersect(&nullable_right).unwrap();
        assert!(!intersection.is_null_allowed());
        assert!(intersection.includes_value(Some(&Value::Int32(7))).unwrap());
        assert!(!intersection.includes_value(Some(&Value::Int32(1))).unwrap());
    }

    #[test]
    fn test_complement_flips_null() {
        let domain = int_domain(1, 10);
        let inverse = domain.complement().unwrap();
        assert!(inverse.is_null_allowed());
        assert!(inverse.includes_value(Some(&Value::Int32(0))).unwrap());
        assert!(!inverse.includes_value(Some(&Value::Int32(5))).unwrap());
        assert_eq!(domain, inverse.complement().unwrap());

        assert!(Domain::none(int32_type()).complement().unwrap().is_all());
        assert!(Domain::all(int32_type()).complement().unwrap().is_none());
        assert_eq!(
            Domain::not_null(int32_type()),
            Domain::only_null(int32_type()).complement().unwrap()
        );
    }

    #[test]
    fn test_overlaps() {
        assert!(int_domain(1, 10).overlaps(&int_domain(5, 15)).unwrap());
        assert!(!int_domain(1, 10).overlaps(&int_domain(20, 30)).unwrap());

        // Two nullable domains always share the null row.
        let left = Domain::only_null(int32_type());
        let right = Domain::all(int32_type());
        assert!(left.overlaps(&right).unwrap());
        assert!(!left.overlaps(&Domain::not_null(int32_type())).unwrap());
    }

    #[test]
    fn test_serde_round_trip() {
        let domains = [
            int_domain(1, 10),
            Domain::only_null(int32_type()),
            Domain::all(int32_type()),
        ];
        for domain in domains {
            let json = serde_json::to_string(&domain).unwrap();
            assert_eq!(domain, serde_json::from_str(&json).unwrap());
        }
    }
}
