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

use std::fmt::{self, Display, Formatter};

use datatypes::prelude::{ConcreteDataType, Value};
use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::error::{InvalidRangeSnafu, Result};
use crate::marker::{Bound, Marker};

/// A closed algebraic interval over the value space of one data type,
/// delimited by a pair of [Marker]s with `low <= high`.
///
/// The low marker is never a `Below` bound and the high marker never an
/// `Above` bound, so `(5, 10]` is `(Above(5), Exactly(10))` and `[5, 10)` is
/// `(Exactly(5), Below(10))`. Ranges compare lexicographically by
/// `(low, high)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct Range {
    low: Marker,
    high: Marker,
}

impl Range {
    pub fn new(low: Marker, high: Marker) -> Result<Range> {
        low.check_type_compatibility(&high)?;
        ensure!(
            low.bound() != Bound::Below,
            InvalidRangeSnafu {
                reason: "low marker must not be a below bound",
            }
        );
        ensure!(
            high.bound() != Bound::Above,
            InvalidRangeSnafu {
                reason: "high marker must not be an above bound",
            }
        );
        ensure!(
            low <= high,
            InvalidRangeSnafu {
                reason: format!("low marker {:?} is greater than high marker {:?}", low, high),
            }
        );
        Ok(Range { low, high })
    }

    /// Range matching every value of the type.
    pub fn all(data_type: ConcreteDataType) -> Range {
        Range {
            low: Marker::lower_unbounded(data_type.clone()),
            high: Marker::upper_unbounded(data_type),
        }
    }

    /// Range holding exactly `value`.
    pub fn equal(data_type: ConcreteDataType, value: Value) -> Result<Range> {
        Ok(Range {
            low: Marker::exactly(data_type.clone(), value.clone())?,
            high: Marker::exactly(data_type, value)?,
        })
    }

    /// `(value, +inf)`.
    pub fn greater_than(data_type: ConcreteDataType, value: Value) -> Result<Range> {
        Ok(Range {
            low: Marker::above(data_type.clone(), value)?,
            high: Marker::upper_unbounded(data_type),
        })
    }

    /// `[value, +inf)`.
    pub fn greater_than_or_equal(data_type: ConcreteDataType, value: Value) -> Result<Range> {
        Ok(Range {
            low: Marker::exactly(data_type.clone(), value)?,
            high: Marker::upper_unbounded(data_type),
        })
    }

    /// `(-inf, value)`.
    pub fn less_than(data_type: ConcreteDataType, value: Value) -> Result<Range> {
        Ok(Range {
            low: Marker::lower_unbounded(data_type.clone()),
            high: Marker::below(data_type, value)?,
        })
    }

    /// `(-inf, value]`.
    pub fn less_than_or_equal(data_type: ConcreteDataType, value: Value) -> Result<Range> {
        Ok(Range {
            low: Marker::lower_unbounded(data_type.clone()),
            high: Marker::exactly(data_type, value)?,
        })
    }

    /// Range between `low` and `high` with the given inclusivities.
    pub fn range(
        data_type: ConcreteDataType,
        low: Value,
        low_inclusive: bool,
        high: Value,
        high_inclusive: bool,
    ) -> Result<Range> {
        let low = if low_inclusive {
            Marker::exactly(data_type.clone(), low)?
        } else {
            Marker::above(data_type.clone(), low)?
        };
        let high = if high_inclusive {
            Marker::exactly(data_type, high)?
        } else {
            Marker::below(data_type, high)?
        };
        Range::new(low, high)
    }

    pub fn low(&self) -> &Marker {
        &self.low
    }

    pub fn high(&self) -> &Marker {
        &self.high
    }

    pub fn data_type(&self) -> &ConcreteDataType {
        self.low.data_type()
    }

    pub fn is_low_unbounded(&self) -> bool {
        self.low.is_lower_unbounded()
    }

    pub fn is_high_unbounded(&self) -> bool {
        self.high.is_upper_unbounded()
    }

    pub fn is_low_inclusive(&self) -> bool {
        self.low.bound() == Bound::Exactly
    }

    pub fn is_high_inclusive(&self) -> bool {
        self.high.bound() == Bound::Exactly
    }

    /// Whether this range holds exactly one value.
    pub fn is_single_value(&self) -> bool {
        self.is_low_inclusive() && self.is_high_inclusive() && self.low.value() == self.high.value()
    }

    /// The single value of the range, when [Range::is_single_value].
    pub fn single_value(&self) -> Option<&Value> {
        if self.is_single_value() {
            self.low.value()
        } else {
            None
        }
    }

    /// Whether this range matches every value of the type.
    pub fn is_all(&self) -> bool {
        self.is_low_unbounded() && self.is_high_unbounded()
    }

    /// Whether `marker` falls between the bounds of this range.
    pub fn includes(&self, marker: &Marker) -> Result<bool> {
        self.low.check_type_compatibility(marker)?;
        Ok(self.low <= *marker && *marker <= self.high)
    }

    /// Whether the two ranges share at least one position of the value space.
    pub fn overlaps(&self, other: &Range) -> Result<bool> {
        self.low.check_type_compatibility(&other.low)?;
        Ok(self.low <= other.high && other.low <= self.high)
    }

    /// The range covered by both `self` and `other`; the ranges must overlap.
    pub fn intersect(&self, other: &Range) -> Result<Range> {
        ensure!(
            self.overlaps(other)?,
            InvalidRangeSnafu {
                reason: "cannot intersect non-overlapping ranges",
            }
        );
        let low = std::cmp::max(&self.low, &other.low);
        let high = std::cmp::min(&self.high, &other.high);
        Ok(Range {
            low: low.clone(),
            high: high.clone(),
        })
    }

    /// The smallest range covering both `self` and `other`. Unlike
    /// [Range::intersect] this is defined for disjoint ranges as well, which
    /// is what coalescing adjacent ranges relies on.
    pub fn span(&self, other: &Range) -> Result<Range> {
        self.low.check_type_compatibility(&other.low)?;
        let low = std::cmp::min(&self.low, &other.low);
        let high = std::cmp::max(&self.high, &other.high);
        Ok(Range {
            low: low.clone(),
            high: high.clone(),
        })
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(value) = self.single_value() {
            return write!(f, "[{value}]");
        }
        match self.low.value() {
            Some(value) if self.is_low_inclusive() => write!(f, "[{value}")?,
            Some(value) => write!(f, "({value}")?,
            None => write!(f, "(-inf")?,
        }
        write!(f, ", ")?;
        match self.high.value() {
            Some(value) if self.is_high_inclusive() => write!(f, "{value}]"),
            Some(value) => write!(f, "{value})"),
            None => write!(f, "+inf)"),
        }
    }
}

/// Wire form of [Range], revalidated on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRange {
    low: Marker,
    high: Marker,
}

impl TryFrom<RawRange> for Range {
    type Error = crate::error::Error;

    fn try_from(raw: RawRange) -> Result<Range> {
        Range::new(raw.low, raw.high)
    }
}

#[cfg(test)]
mod tests {
    use datatypes::prelude::*;

    use super::*;

    fn int32_type() -> ConcreteDataType {
        ConcreteDataType::int32_datatype()
    }

    fn int_range(low: i32, high: i32) -> Range {
        Range::range(int32_type(), Value::Int32(low), true, Value::Int32(high), true).unwrap()
    }

    #[test]
    fn test_construction_checks() {
        // low > high
        assert!(Range::new(
            Marker::exactly(int32_type(), Value::Int32(10)).unwrap(),
            Marker::exactly(int32_type(), Value::Int32(1)).unwrap(),
        )
        .is_err());

        // A below bound cannot open a range.
        assert!(Range::new(
            Marker::below(int32_type(), Value::Int32(1)).unwrap(),
            Marker::exactly(int32_type(), Value::Int32(10)).unwrap(),
        )
        .is_err());

        // An above bound cannot close a range.
        assert!(Range::new(
            Marker::exactly(int32_type(), Value::Int32(1)).unwrap(),
            Marker::above(int32_type(), Value::Int32(10)).unwrap(),
        )
        .is_err());

        // Marker types must match.
        assert!(Range::new(
            Marker::exactly(int32_type(), Value::Int32(1)).unwrap(),
            Marker::upper_unbounded(ConcreteDataType::int64_datatype()),
        )
        .is_err());

        // An empty-looking range with equal open markers is still valid.
        let range = Range::new(
            Marker::above(int32_type(), Value::Int32(1)).unwrap(),
            Marker::upper_unbounded(int32_type()),
        )
        .unwrap();
        assert!(!range.is_single_value());
    }

    #[test]
    fn test_range_predicates() {
        let all = Range::all(int32_type());
        assert!(all.is_all());
        assert!(all.is_low_unbounded());
        assert!(all.is_high_unbounded());

        let single = Range::equal(int32_type(), Value::Int32(42)).unwrap();
        assert!(single.is_single_value());
        assert_eq!(Some(&Value::Int32(42)), single.single_value());

        let range = Range::range(int32_type(), Value::Int32(1), true, Value::Int32(5), false)
            .unwrap();
        assert!(range.is_low_inclusive());
        assert!(!range.is_high_inclusive());
        assert!(!range.is_single_value());
    }

    #[test]
    fn test_includes() {
        let range = int_range(1, 10);
        assert!(range
            .includes(&Marker::exactly(int32_type(), Value::Int32(1)).unwrap())
            .unwrap());
        assert!(range
            .includes(&Marker::exactly(int32_type(), Value::Int32(10)).unwrap())
            .unwrap());
        assert!(!range
            .includes(&Marker::exactly(int32_type(), Value::Int32(11)).unwrap())
            .unwrap());
        assert!(!range
            .includes(&Marker::lower_unbounded(int32_type()))
            .unwrap());
    }

    #[test]
    fn test_overlaps_and_intersect() {
        let left = int_range(1, 10);
        let right = int_range(5, 15);
        assert!(left.overlaps(&right).unwrap());
        assert_eq!(int_range(5, 10), left.intersect(&right).unwrap());

        let disjoint = int_range(20, 30);
        assert!(!left.overlaps(&disjoint).unwrap());
        assert!(left.intersect(&disjoint).is_err());

        // Open bounds meeting at the same value do not overlap.
        let below = Range::less_than(int32_type(), Value::Int32(5)).unwrap();
        let above = Range::greater_than(int32_type(), Value::Int32(5)).unwrap();
        assert!(!below.overlaps(&above).unwrap());

        // But an inclusive bound at the same value does.
        let upto = Range::less_than_or_equal(int32_type(), Value::Int32(5)).unwrap();
        let from = Range::greater_than_or_equal(int32_type(), Value::Int32(5)).unwrap();
        assert!(upto.overlaps(&from).unwrap());
        assert_eq!(
            Range::equal(int32_type(), Value::Int32(5)).unwrap(),
            upto.intersect(&from).unwrap()
        );
    }

    #[test]
    fn test_span() {
        let left = int_range(1, 5);
        let disjoint = int_range(10, 20);
        assert_eq!(int_range(1, 20), left.span(&disjoint).unwrap());
        assert_eq!(int_range(1, 20), disjoint.span(&left).unwrap());

        let all = Range::all(int32_type());
        assert_eq!(all, left.span(&all).unwrap());
    }

    #[test]
    fn test_range_ordering() {
        let mut ranges = vec![int_range(5, 6), int_range(1, 10), int_range(1, 2)];
        ranges.sort();
        assert_eq!(
            vec![int_range(1, 2), int_range(1, 10), int_range(5, 6)],
            ranges
        );
    }

    #[test]
    fn test_display() {
        assert_eq!("[1, 10]", int_range(1, 10).to_string());
        assert_eq!("(-inf, +inf)", Range::all(int32_type()).to_string());
        assert_eq!(
            "[42]",
            Range::equal(int32_type(), Value::Int32(42))
                .unwrap()
                .to_string()
        );
        assert_eq!(
            "(1, 5]",
            Range::range(int32_type(), Value::Int32(1), false, Value::Int32(5), true)
                .unwrap()
                .to_string()
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let ranges = [
            int_range(1, 10),
            Range::all(int32_type()),
            Range::less_than(int32_type(), Value::Int32(5)).unwrap(),
        ];
        for range in ranges {
            let json = serde_json::to_string(&range).unwrap();
            assert_eq!(range, serde_json::from_str(&json).unwrap());
        }
    }

    #[test]
    fn test_deserialize_rejects_inverted_range() {
        let low = Marker::exactly(int32_type(), Value::Int32(10)).unwrap();
        let high = Marker::exactly(int32_type(), Value::Int32(1)).unwrap();
        let json = serde_json::to_string(&RawRange { low, high }).unwrap();
        assert!(serde_json::from_str::<Range>(&json).is_err());
    }
}
