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

use std::collections::BTreeSet;

use datatypes::prelude::{ConcreteDataType, Value};
use serde::{Deserialize, Serialize};
use snafu::{ensure, OptionExt};

use crate::error::{
    InvalidValueSetVariantSnafu, NotDiscreteSetSnafu, NotSingleValueSnafu, Result,
    TypeMismatchSnafu,
};
use crate::range::Range;
use crate::range_set::SortedRangeSet;

/// The set of values one column may take, in one of three representations.
///
/// Binary operations are only defined between sets of the same variant and
/// the same data type; mixing variants is an error of the caller, not a
/// conversion point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueSet {
    /// Sorted, disjoint ranges over an ordered type.
    Ranges(SortedRangeSet),
    /// Discrete values over a comparable type, included or excluded as a whole.
    Equatable(EquatableValueSet),
    /// All-or-nothing set for types admitting no finer predicate.
    AllOrNone(AllOrNoneValueSet),
}

impl ValueSet {
    /// The set matching no value, in range representation.
    pub fn none(data_type: ConcreteDataType) -> ValueSet {
        ValueSet::Ranges(SortedRangeSet::none(data_type))
    }

    /// The set matching every value, in range representation.
    pub fn all(data_type: ConcreteDataType) -> ValueSet {
        ValueSet::Ranges(SortedRangeSet::all(data_type))
    }

    /// The union of the given ranges.
    pub fn of_ranges(
        data_type: ConcreteDataType,
        ranges: impl IntoIterator<Item = Range>,
    ) -> Result<ValueSet> {
        Ok(ValueSet::Ranges(SortedRangeSet::from_ranges(
            data_type, ranges,
        )?))
    }

    /// The union of the given discrete values, in range representation.
    pub fn of_values(
        data_type: ConcreteDataType,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<ValueSet> {
        Ok(ValueSet::Ranges(SortedRangeSet::of_values(
            data_type, values,
        )?))
    }

    pub fn data_type(&self) -> &ConcreteDataType {
        match self {
            ValueSet::Ranges(set) => set.data_type(),
            ValueSet::Equatable(set) => set.data_type(),
            ValueSet::AllOrNone(set) => set.data_type(),
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            ValueSet::Ranges(_) => "SortedRangeSet",
            ValueSet::Equatable(_) => "EquatableValueSet",
            ValueSet::AllOrNone(_) => "AllOrNoneValueSet",
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            ValueSet::Ranges(set) => set.is_none(),
            ValueSet::Equatable(set) => set.is_none(),
            ValueSet::AllOrNone(set) => set.is_none(),
        }
    }

    pub fn is_all(&self) -> bool {
        match self {
            ValueSet::Ranges(set) => set.is_all(),
            ValueSet::Equatable(set) => set.is_all(),
            ValueSet::AllOrNone(set) => set.is_all(),
        }
    }

    pub fn is_single_value(&self) -> bool {
        match self {
            ValueSet::Ranges(set) => set.is_single_value(),
            ValueSet::Equatable(set) => set.is_single_value(),
            ValueSet::AllOrNone(_) => false,
        }
    }

    pub fn single_value(&self) -> Result<&Value> {
        match self {
            ValueSet::Ranges(set) => set.single_value(),
            ValueSet::Equatable(set) => set.single_value(),
            ValueSet::AllOrNone(_) => NotSingleValueSnafu.fail(),
        }
    }

    pub fn is_discrete_set(&self) -> bool {
        match self {
            ValueSet::Ranges(set) => set.is_discrete_set(),
            ValueSet::Equatable(set) => set.is_white_list() && !set.is_none(),
            ValueSet::AllOrNone(_) => false,
        }
    }

    pub fn discrete_set(&self) -> Result<Vec<Value>> {
        match self {
            ValueSet::Ranges(set) => set.discrete_set(),
            ValueSet::Equatable(set) => {
                ensure!(self.is_discrete_set(), NotDiscreteSetSnafu);
                Ok(set.entries().cloned().collect())
            }
            ValueSet::AllOrNone(_) => NotDiscreteSetSnafu.fail(),
        }
    }

    pub fn contains_value(&self, value: &Value) -> Result<bool> {
        match self {
            ValueSet::Ranges(set) => set.contains_value(value),
            ValueSet::Equatable(set) => set.contains_value(value),
            ValueSet::AllOrNone(set) => set.contains_value(value),
        }
    }

    /// See [SortedRangeSet::try_expand_ranges]; an equatable allow-list is
    /// already expanded and only checked against `limit`.
    pub fn try_expand_ranges(&self, limit: usize) -> Result<Option<Vec<Value>>> {
        match self {
            ValueSet::Ranges(set) => set.try_expand_ranges(limit),
            ValueSet::Equatable(set) => {
                if set.is_white_list() && set.entry_count() <= limit {
                    Ok(Some(set.entries().cloned().collect()))
                } else {
                    Ok(None)
                }
            }
            ValueSet::AllOrNone(_) => Ok(None),
        }
    }

    pub fn intersect(&self, other: &ValueSet) -> Result<ValueSet> {
        match (self, other) {
            (ValueSet::Ranges(lhs), ValueSet::Ranges(rhs)) => {
                Ok(ValueSet::Ranges(lhs.intersect(rhs)?))
            }
            (ValueSet::Equatable(lhs), ValueSet::Equatable(rhs)) => {
                Ok(ValueSet::Equatable(lhs.intersect(rhs)?))
            }
            (ValueSet::AllOrNone(lhs), ValueSet::AllOrNone(rhs)) => {
                Ok(ValueSet::AllOrNone(lhs.intersect(rhs)?))
            }
            _ => mismatched_variants(self, other),
        }
    }

    pub fn union(&self, other: &ValueSet) -> Result<ValueSet> {
        match (self, other) {
            (ValueSet::Ranges(lhs), ValueSet::Ranges(rhs)) => {
                Ok(ValueSet::Ranges(lhs.union(rhs)?))
            }
            (ValueSet::Equatable(lhs), ValueSet::Equatable(rhs)) => {
                Ok(ValueSet::Equatable(lhs.union(rhs)?))
            }
            (ValueSet::AllOrNone(lhs), ValueSet::AllOrNone(rhs)) => {
                Ok(ValueSet::AllOrNone(lhs.union(rhs)?))
            }
            _ => mismatched_variants(self, other),
        }
    }

    pub fn overlaps(&self, other: &ValueSet) -> Result<bool> {
        match (self, other) {
            // Range sets short-circuit without materializing the intersection.
            (ValueSet::Ranges(lhs), ValueSet::Ranges(rhs)) => lhs.overlaps(rhs),
            _ => Ok(!self.intersect(other)?.is_none()),
        }
    }

    pub fn complement(&self) -> Result<ValueSet> {
        match self {
            ValueSet::Ranges(set) => Ok(ValueSet::Ranges(set.complement()?)),
            ValueSet::Equatable(set) => Ok(ValueSet::Equatable(set.complement())),
            ValueSet::AllOrNone(set) => Ok(ValueSet::AllOrNone(set.complement())),
        }
    }
}

fn mismatched_variants<T>(left: &ValueSet, right: &ValueSet) -> Result<T> {
    InvalidValueSetVariantSnafu {
        left: left.variant_name(),
        right: right.variant_name(),
    }
    .fail()
}

/// A set of discrete values that are collectively included (allow-list) or
/// collectively excluded, for comparable types without an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquatableValueSet {
    data_type: ConcreteDataType,
    white_list: bool,
    entries: BTreeSet<Value>,
}

impl EquatableValueSet {
    /// Set holding exactly the given values.
    pub fn of(
        data_type: ConcreteDataType,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<EquatableValueSet> {
        Self::with_mode(data_type, true, values)
    }

    /// Set holding every value of the type except the given ones.
    pub fn of_excluded(
        data_type: ConcreteDataType,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<EquatableValueSet> {
        Self::with_mode(data_type, false, values)
    }

    fn with_mode(
        data_type: ConcreteDataType,
        white_list: bool,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<EquatableValueSet> {
        let mut entries = BTreeSet::new();
        for value in values {
            ensure!(
                value.data_type() == data_type,
                TypeMismatchSnafu {
                    expected: data_type.clone(),
                    found: value.data_type(),
                }
            );
            entries.insert(value);
        }
        Ok(EquatableValueSet {
            data_type,
            white_list,
            entries,
        })
    }

    pub fn data_type(&self) -> &ConcreteDataType {
        &self.data_type
    }

    pub fn is_white_list(&self) -> bool {
        self.white_list
    }

    pub fn entries(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_none(&self) -> bool {
        self.white_list && self.entries.is_empty()
    }

    pub fn is_all(&self) -> bool {
        !self.white_list && self.entries.is_empty()
    }

    pub fn is_single_value(&self) -> bool {
        self.white_list && self.entries.len() == 1
    }

    pub fn single_value(&self) -> Result<&Value> {
        self.entries
            .iter()
            .next()
            .filter(|_| self.is_single_value())
            .context(NotSingleValueSnafu)
    }

    pub fn contains_value(&self, value: &Value) -> Result<bool> {
        ensure!(
            value.data_type() == self.data_type,
            TypeMismatchSnafu {
                expected: self.data_type.clone(),
                found: value.data_type(),
            }
        );
        Ok(self.white_list == self.entries.contains(value))
    }

    pub fn intersect(&self, other: &EquatableValueSet) -> Result<EquatableValueSet> {
        self.check_compatibility(other)?;
        let (white_list, entries) = match (self.white_list, other.white_list) {
            // A ∩ B
            (true, true) => (
                true,
                self.entries.intersection(&other.entries).cloned().collect(),
            ),
            // A ∩ !B = A - B
            (true, false) => (
                true,
                self.entries.difference(&other.entries).cloned().collect(),
            ),
            // !A ∩ B = B - A
            (false, true) => (
                true,
                other.entries.difference(&self.entries).cloned().collect(),
            ),
            // !A ∩ !B = !(A ∪ B)
            (false, false) => (
                false,
                self.entries.union(&other.entries).cloned().collect(),
            ),
        };
        Ok(EquatableValueSet {
            data_type: self.data_type.clone(),
            white_list,
            entries,
        })
    }

    pub fn union(&self, other: &EquatableValueSet) -> Result<EquatableValueSet> {
        self.check_compatibility(other)?;
        let (white_list, entries) = match (self.white_list, other.white_list) {
            // A ∪ B
            (true, true) => (true, self.entries.union(&other.entries).cloned().collect()),
            // A ∪ !B = !(B - A)
            (true, false) => (
                false,
                other.entries.difference(&self.entries).cloned().collect(),
            ),
            // !A ∪ B = !(A - B)
            (false, true) => (
                false,
                self.entries.difference(&other.entries).cloned().collect(),
            ),
            // !A ∪ !B = !(A ∩ B)
            (false, false) => (
                false,
                self.entries.intersection(&other.entries).cloned().collect(),
            ),
        };
        Ok(EquatableValueSet {
            data_type: self.data_type.clone(),
            white_list,
            entries,
        })
    }

    pub fn complement(&self) -> EquatableValueSet {
        EquatableValueSet {
            data_type: self.data_type.clone(),
            white_list: !self.white_list,
            entries: self.entries.clone(),
        }
    }

    fn check_compatibility(&self, other: &EquatableValueSet) -> Result<()> {
        ensure!(
            self.data_type == other.data_type,
            TypeMismatchSnafu {
                expected: self.data_type.clone(),
                found: other.data_type.clone(),
            }
        );
        Ok(())
    }
}

/// Degenerate value set only knowing whether it matches all values or none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllOrNoneValueSet {
    data_type: ConcreteDataType,
    all: bool,
}

impl AllOrNoneValueSet {
    pub fn all(data_type: ConcreteDataType) -> AllOrNoneValueSet {
        AllOrNoneValueSet {
            data_type,
            all: true,
        }
    }

    pub fn none(data_type: ConcreteDataType) -> AllOrNoneValueSet {
        AllOrNoneValueSet {
            data_type,
            all: false,
        }
    }

    pub fn data_type(&self) -> &ConcreteDataType {
        &self.data_type
    }

    pub fn is_all(&self) -> bool {
        self.all
    }

    pub fn is_none(&self) -> bool {
        !self.all
    }

    pub fn contains_value(&self, value: &Value) -> Result<bool> {
        ensure!(
            value.data_type() == self.data_type,
            TypeMismatchSnafu {
                expected: self.data_type.clone(),
                found: value.data_type(),
            }
        );
        Ok(self.all)
    }

    pub fn intersect(&self, other: &AllOrNoneValueSet) -> Result<AllOrNoneValueSet> {
        self.check_compatibility(other)?;
        Ok(AllOrNoneValueSet {
            data_type: self.data_type.clone(),
            all: self.all && other.all,
        })
    }

    pub fn union(&self, other: &AllOrNoneValueSet) -> Result<AllOrNoneValueSet> {
        self.check_compatibility(other)?;
        Ok(AllOrNoneValueSet {
            data_type: self.data_type.clone(),
            all: self.all || other.all,
        })
    }

    pub fn complement(&self) -> AllOrNoneValueSet {
        AllOrNoneValueSet {
            data_type: self.data_type.clone(),
            all: !self.all,
        }
    }

    fn check_compatibility(&self, other: &AllOrNoneValueSet) -> Result<()> {
        ensure!(
            self.data_type == other.data_type,
            TypeMismatchSnafu {
                expected: self.data_type.clone(),
                found: other.data_type.clone(),
            }
        );
        Ok(())
    }
}

impl From<SortedRangeSet> for ValueSet {
    fn from(set: SortedRangeSet) -> ValueSet {
        ValueSet::Ranges(set)
    }
}

impl From<EquatableValueSet> for ValueSet {
    fn from(set: EquatableValueSet) -> ValueSet {
        ValueSet::Equatable(set)
    }
}

impl From<AllOrNoneValueSet> for ValueSet {
    fn from(set: AllOrNoneValueSet) -> ValueSet {
        ValueSet::AllOrNone(set)
    }
}

#[cfg(test)]
mod tests {
    use datatypes::prelude::*;

    use super::*;
    use crate::error::Error;

    fn int32_type() -> ConcreteDataType {
        ConcreteDataType::int32_datatype()
    }

    fn int_values(values: impl IntoIterator<Item = i32>) -> Vec<Value> {
        values.into_iter().map(Value::Int32).collect()
    }

    fn included(values: impl IntoIterator<Item = i32>) -> EquatableValueSet {
        EquatableValueSet::of(int32_type(), int_values(values)).unwrap()
    }

    fn excluded(values: impl IntoIterator<Item = i32>) -> EquatableValueSet {
        EquatableValueSet::of_excluded(int32_type(), int_values(values)).unwrap()
    }

    #[test]
    fn test_value_set_dispatch() {
        let ranges = ValueSet::of_values(int32_type(), int_values([1, 2, 3])).unwrap();
        assert!(ranges.is_discrete_set());
        assert_eq!(int_values([1, 2, 3]), ranges.discrete_set().unwrap());
        assert!(ranges.contains_value(&Value::Int32(2)).unwrap());
        assert!(!ranges.contains_value(&Value::Int32(4)).unwrap());

        let none = ValueSet::none(int32_type());
        assert!(none.is_none());
        assert!(none.complement().unwrap().is_all());
    }

    #[test]
    fn test_mixed_variants_are_rejected() {
        let ranges = ValueSet::all(int32_type());
        let equatable = ValueSet::Equatable(included([1]));
        let all_or_none = ValueSet::AllOrNone(AllOrNoneValueSet::all(int32_type()));

        let err = ranges.intersect(&equatable).unwrap_err();
        assert!(matches!(err, Error::InvalidValueSetVariant { .. }));
        assert!(ranges.union(&all_or_none).is_err());
        assert!(equatable.union(&all_or_none).is_err());
        assert!(equatable.overlaps(&ranges).is_err());
    }

    #[test]
    fn test_equatable_queries() {
        let set = included([1, 2]);
        assert!(!set.is_none());
        assert!(!set.is_all());
        assert!(set.contains_value(&Value::Int32(1)).unwrap());
        assert!(!set.contains_value(&Value::Int32(3)).unwrap());

        let inverse = set.complement();
        assert!(!inverse.contains_value(&Value::Int32(1)).unwrap());
        assert!(inverse.contains_value(&Value::Int32(3)).unwrap());

        assert!(EquatableValueSet::of(int32_type(), []).unwrap().is_none());
        assert!(EquatableValueSet::of_excluded(int32_type(), [])
            .unwrap()
            .is_all());

        let single = included([7]);
        assert!(single.is_single_value());
        assert_eq!(&Value::Int32(7), single.single_value().unwrap());
        assert!(included([1, 2]).single_value().is_err());
    }

    #[test]
    fn test_equatable_intersect_truth_table() {
        // A ∩ B
        let result = included([1, 2, 3]).intersect(&included([2, 3, 4])).unwrap();
        assert_eq!(included([2, 3]), result);

        // A ∩ !B
        let result = included([1, 2, 3]).intersect(&excluded([2])).unwrap();
        assert_eq!(included([1, 3]), result);

        // !A ∩ B
        let result = excluded([2]).intersect(&included([1, 2, 3])).unwrap();
        assert_eq!(included([1, 3]), result);

        // !A ∩ !B
        let result = excluded([1]).intersect(&excluded([2])).unwrap();
        assert_eq!(excluded([1, 2]), result);
    }

    #[test]
    fn test_equatable_union_truth_table() {
        // A ∪ B
        let result = included([1, 2]).union(&included([2, 3])).unwrap();
        assert_eq!(included([1, 2, 3]), result);

        // A ∪ !B
        let result = included([1]).union(&excluded([1, 2])).unwrap();
        assert_eq!(excluded([2]), result);

        // !A ∪ B
        let result = excluded([1, 2]).union(&included([1])).unwrap();
        assert_eq!(excluded([2]), result);

        // !A ∪ !B
        let result = excluded([1, 2]).union(&excluded([2, 3])).unwrap();
        assert_eq!(excluded([2]), result);
    }

    #[test]
    fn test_equatable_set_rejects_mismatched_values() {
        assert!(EquatableValueSet::of(int32_type(), [Value::Int64(1)]).is_err());
        assert!(EquatableValueSet::of(int32_type(), [Value::Null]).is_err());
        assert!(included([1]).contains_value(&Value::Int64(1)).is_err());
    }

    #[test]
    fn test_all_or_none() {
        let all = AllOrNoneValueSet::all(int32_type());
        let none = AllOrNoneValueSet::none(int32_type());
        assert!(all.is_all());
        assert!(none.is_none());
        assert!(all.contains_value(&Value::Int32(1)).unwrap());
        assert!(!none.contains_value(&Value::Int32(1)).unwrap());

        assert!(all.intersect(&none).unwrap().is_none());
        assert!(all.union(&none).unwrap().is_all());
        assert!(all.complement().is_none());
        assert!(none.complement().is_all());
    }

    #[test]
    fn test_overlaps_via_intersection() {
        let lhs = ValueSet::Equatable(included([1, 2]));
        let rhs = ValueSet::Equatable(included([2, 3]));
        assert!(lhs.overlaps(&rhs).unwrap());

        let rhs = ValueSet::Equatable(included([3, 4]));
        assert!(!lhs.overlaps(&rhs).unwrap());
    }

    #[test]
    fn test_try_expand_ranges() {
        let set = ValueSet::Equatable(included([1, 2, 3]));
        assert_eq!(Some(int_values([1, 2, 3])), set.try_expand_ranges(3).unwrap());
        assert_eq!(None, set.try_expand_ranges(2).unwrap());
        assert_eq!(
            None,
            ValueSet::Equatable(excluded([1])).try_expand_ranges(10).unwrap()
        );
        assert_eq!(
            None,
            ValueSet::AllOrNone(AllOrNoneValueSet::all(int32_type()))
                .try_expand_ranges(10)
                .unwrap()
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let sets = [
            ValueSet::of_values(int32_type(), int_values([1, 5])).unwrap(),
            ValueSet::Equatable(excluded([2])),
            ValueSet::AllOrNone(AllOrNoneValueSet::none(int32_type())),
        ];
        for set in sets {
            let json = serde_json::to_string(&set).unwrap();
            assert_eq!(set, serde_json::from_str::<ValueSet>(&json).unwrap());
        }
    }
}
