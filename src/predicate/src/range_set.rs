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

use std::collections::BTreeMap;

use datatypes::prelude::{ConcreteDataType, DiscreteValues, Value};
use serde::{Deserialize, Serialize};
use snafu::{ensure, OptionExt};

use crate::error::{
    EmptyRangeSetSnafu, NotDiscreteSetSnafu, NotSingleValueSnafu, Result, TypeMismatchSnafu,
};
use crate::marker::Marker;
use crate::range::Range;

/// A set containing zero or more [Range]s of the same type over an ordered
/// space of possible values.
///
/// The set is kept in canonical form: ranges are sorted by their low marker,
/// pairwise non-overlapping and never adjacent, so every value set has
/// exactly one representation. All construction funnels through
/// [SortedRangeSetBuilder], which establishes the form with a single
/// coalescing sweep; the set itself is immutable and every operation
/// produces a new set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSortedRangeSet", into = "RawSortedRangeSet")]
pub struct SortedRangeSet {
    data_type: ConcreteDataType,
    low_indexed_ranges: BTreeMap<Marker, Range>,
}

impl SortedRangeSet {
    /// The set matching no value.
    pub fn none(data_type: ConcreteDataType) -> SortedRangeSet {
        SortedRangeSet {
            data_type,
            low_indexed_ranges: BTreeMap::new(),
        }
    }

    /// The set matching every value of the type.
    pub fn all(data_type: ConcreteDataType) -> SortedRangeSet {
        let range = Range::all(data_type.clone());
        SortedRangeSet {
            data_type,
            low_indexed_ranges: BTreeMap::from([(range.low().clone(), range)]),
        }
    }

    /// The union of the given ranges, normalized to canonical form.
    pub fn from_ranges(
        data_type: ConcreteDataType,
        ranges: impl IntoIterator<Item = Range>,
    ) -> Result<SortedRangeSet> {
        SortedRangeSetBuilder::new(data_type).add_all(ranges)?.build()
    }

    /// The union of the given discrete values.
    pub fn of_values(
        data_type: ConcreteDataType,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<SortedRangeSet> {
        let mut builder = SortedRangeSetBuilder::new(data_type.clone());
        for value in values {
            builder = builder.add(Range::equal(data_type.clone(), value)?)?;
        }
        builder.build()
    }

    pub fn data_type(&self) -> &ConcreteDataType {
        &self.data_type
    }

    /// The ranges of the set in ascending order.
    pub fn ordered_ranges(&self) -> impl Iterator<Item = &Range> {
        self.low_indexed_ranges.values()
    }

    pub fn range_count(&self) -> usize {
        self.low_indexed_ranges.len()
    }

    pub fn is_none(&self) -> bool {
        self.low_indexed_ranges.is_empty()
    }

    pub fn is_all(&self) -> bool {
        self.low_indexed_ranges.len() == 1
            && self.low_indexed_ranges.values().all(Range::is_all)
    }

    pub fn is_single_value(&self) -> bool {
        self.low_indexed_ranges.len() == 1
            && self.low_indexed_ranges.values().all(Range::is_single_value)
    }

    /// The only value of the set, failing unless [SortedRangeSet::is_single_value].
    pub fn single_value(&self) -> Result<&Value> {
        self.low_indexed_ranges
            .values()
            .next()
            .filter(|_| self.is_single_value())
            .and_then(Range::single_value)
            .context(NotSingleValueSnafu)
    }

    /// Whether every range of the set holds exactly one value.
    pub fn is_discrete_set(&self) -> bool {
        !self.is_none()
            && self
                .low_indexed_ranges
                .values()
                .all(Range::is_single_value)
    }

    /// The values of a discrete set in ascending order, failing unless
    /// [SortedRangeSet::is_discrete_set].
    pub fn discrete_set(&self) -> Result<Vec<Value>> {
        ensure!(self.is_discrete_set(), NotDiscreteSetSnafu);
        Ok(self
            .low_indexed_ranges
            .values()
            .filter_map(Range::single_value)
            .cloned()
            .collect())
    }

    /// Whether `value` belongs to the set, in `O(log n)` by a floor lookup
    /// on the low-indexed map.
    pub fn contains_value(&self, value: &Value) -> Result<bool> {
        let marker = Marker::exactly(self.data_type.clone(), value.clone())?;
        self.includes_marker(&marker)
    }

    pub(crate) fn includes_marker(&self, marker: &Marker) -> Result<bool> {
        ensure!(
            self.data_type == *marker.data_type(),
            TypeMismatchSnafu {
                expected: self.data_type.clone(),
                found: marker.data_type().clone(),
            }
        );
        let floor_entry = self.low_indexed_ranges.range(..=marker).next_back();
        match floor_entry {
            Some((_, range)) => range.includes(marker),
            None => Ok(false),
        }
    }

    /// The smallest single range covering the whole set; fails on an empty set.
    pub fn span(&self) -> Result<Range> {
        let first = self
            .low_indexed_ranges
            .values()
            .next()
            .context(EmptyRangeSetSnafu)?;
        let last = self
            .low_indexed_ranges
            .values()
            .next_back()
            .context(EmptyRangeSetSnafu)?;
        first.span(last)
    }

    /// The set of values present in both sets. A merge-join over the two
    /// sorted range lists, advancing the cursor whose range ends first.
    pub fn intersect(&self, other: &SortedRangeSet) -> Result<SortedRangeSet> {
        self.check_compatibility(other)?;

        let mut builder = SortedRangeSetBuilder::new(self.data_type.clone());
        let mut lhs = self.low_indexed_ranges.values();
        let mut rhs = other.low_indexed_ranges.values();

        let (mut left, mut right) = match (lhs.next(), rhs.next()) {
            (Some(left), Some(right)) => (left, right),
            _ => return builder.build(),
        };

        loop {
            if left.overlaps(right)? {
                builder = builder.add(left.intersect(right)?)?;
            }

            if left.high() <= right.high() {
                match lhs.next() {
                    Some(range) => left = range,
                    None => break,
                }
            } else {
                match rhs.next() {
                    Some(range) => right = range,
                    None => break,
                }
            }
        }

        builder.build()
    }

    /// Whether the two sets share at least one value. Same walk as
    /// [SortedRangeSet::intersect] but short-circuits on the first overlap.
    pub fn overlaps(&self, other: &SortedRangeSet) -> Result<bool> {
        self.check_compatibility(other)?;

        let mut lhs = self.low_indexed_ranges.values();
        let mut rhs = other.low_indexed_ranges.values();

        let (mut left, mut right) = match (lhs.next(), rhs.next()) {
            (Some(left), Some(right)) => (left, right),
            _ => return Ok(false),
        };

        loop {
            if left.overlaps(right)? {
                return Ok(true);
            }

            if left.high() <= right.high() {
                match lhs.next() {
                    Some(range) => left = range,
                    None => break,
                }
            } else {
                match rhs.next() {
                    Some(range) => right = range,
                    None => break,
                }
            }
        }

        Ok(false)
    }

    /// The set of values present in either set; correctness falls out of the
    /// builder's normalization.
    pub fn union(&self, other: &SortedRangeSet) -> Result<SortedRangeSet> {
        self.check_compatibility(other)?;
        SortedRangeSetBuilder::new(self.data_type.clone())
            .add_all(self.low_indexed_ranges.values().cloned())?
            .add_all(other.low_indexed_ranges.values().cloned())?
            .build()
    }

    /// The set of values not in this set: the gaps between consecutive
    /// ranges plus the two outer unbounded gaps. Gap boundaries step to the
    /// neighboring discrete value where the domain has one, so the
    /// complement of `[10, 10]` over integers is `(-inf, 9] ∪ [11, +inf)`;
    /// continuous domains keep open bounds at the original values.
    pub fn complement(&self) -> Result<SortedRangeSet> {
        let mut builder = SortedRangeSetBuilder::new(self.data_type.clone());

        let mut ranges = self.low_indexed_ranges.values();
        let Some(first) = ranges.next() else {
            return builder.add(Range::all(self.data_type.clone()))?.build();
        };

        if !first.is_low_unbounded() {
            builder = builder.add(Range::new(
                Marker::lower_unbounded(self.data_type.clone()),
                first.low().lesser_adjacent()?,
            )?)?;
        }

        let mut previous = first;
        for current in ranges {
            let low = previous.high().greater_adjacent()?;
            let high = current.low().lesser_adjacent()?;
            builder = builder.add(Range::new(low, high)?)?;
            previous = current;
        }

        if !previous.is_high_unbounded() {
            builder = builder.add(Range::new(
                previous.high().greater_adjacent()?,
                Marker::upper_unbounded(self.data_type.clone()),
            )?)?;
        }

        builder.build()
    }

    /// Tries to materialize the set as an explicit list of discrete values,
    /// to turn a range predicate into an IN-list when that is cheap.
    ///
    /// Returns `None` (keep the range form, this is not an error) when the
    /// type cannot enumerate its values, when an unbounded range cannot be
    /// clipped to the type's own bounds, or when more than `limit` values
    /// would be produced.
    pub fn try_expand_ranges(&self, limit: usize) -> Result<Option<Vec<Value>>> {
        let Some(domain) = self.data_type.discrete_domain() else {
            return Ok(None);
        };
        let (min, max) = domain.value_bounds();
        let type_range = Range::range(self.data_type.clone(), min, true, max, true)?;

        let mut result = Vec::new();
        for range in self.low_indexed_ranges.values() {
            let range = if range.is_low_unbounded() || range.is_high_unbounded() {
                // Clip the unbounded side to the type's own min/max.
                if !range.overlaps(&type_range)? {
                    continue;
                }
                let clipped = range.intersect(&type_range)?;
                if clipped.is_low_unbounded() || clipped.is_high_unbounded() {
                    return Ok(None);
                }
                clipped
            } else {
                range.clone()
            };

            let (Some(low), Some(high)) = (range.low().value(), range.high().value()) else {
                return Ok(None);
            };
            let mut values =
                DiscreteValues::new(domain, low.clone(), high.clone()).peekable();
            if !range.is_low_inclusive() {
                let _ = values.next();
            }
            while let Some(value) = values.next() {
                // Skip the highest value when the high bound excludes it.
                if range.is_high_inclusive() || values.peek().is_some() {
                    if result.len() >= limit {
                        return Ok(None);
                    }
                    result.push(value);
                }
            }
        }
        Ok(Some(result))
    }

    fn check_compatibility(&self, other: &SortedRangeSet) -> Result<()> {
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

/// One-shot accumulator normalizing arbitrary ranges into a [SortedRangeSet].
///
/// Ranges may arrive unsorted and overlapping; `build` sorts them by low
/// marker and coalesces overlapping or adjacent neighbors in one
/// left-to-right sweep. Building consumes the builder.
#[derive(Debug)]
pub struct SortedRangeSetBuilder {
    data_type: ConcreteDataType,
    ranges: Vec<Range>,
}

impl SortedRangeSetBuilder {
    pub fn new(data_type: ConcreteDataType) -> SortedRangeSetBuilder {
        SortedRangeSetBuilder {
            data_type,
            ranges: Vec::new(),
        }
    }

    pub fn add(mut self, range: Range) -> Result<SortedRangeSetBuilder> {
        ensure!(
            *range.data_type() == self.data_type,
            TypeMismatchSnafu {
                expected: self.data_type.clone(),
                found: range.data_type().clone(),
            }
        );
        self.ranges.push(range);
        Ok(self)
    }

    pub fn add_all(
        mut self,
        ranges: impl IntoIterator<Item = Range>,
    ) -> Result<SortedRangeSetBuilder> {
        for range in ranges {
            self = self.add(range)?;
        }
        Ok(self)
    }

    pub fn build(mut self) -> Result<SortedRangeSet> {
        self.ranges.sort_unstable_by(|a, b| a.low().cmp(b.low()));

        let mut result = BTreeMap::new();
        let mut current: Option<Range> = None;
        for next in self.ranges {
            let Some(range) = current.take() else {
                current = Some(next);
                continue;
            };

            if range.overlaps(&next)? || range.high().is_adjacent(next.low())? {
                current = Some(range.span(&next)?);
            } else {
                result.insert(range.low().clone(), range);
                current = Some(next);
            }
        }

        if let Some(range) = current {
            result.insert(range.low().clone(), range);
        }

        Ok(SortedRangeSet {
            data_type: self.data_type,
            low_indexed_ranges: result,
        })
    }
}

/// Wire form of [SortedRangeSet]: the data type plus its ranges in ascending
/// order. Deserialization re-runs the builder instead of trusting the wire
/// to be canonical.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSortedRangeSet {
    #[serde(rename = "type")]
    data_type: ConcreteDataType,
    ranges: Vec<Range>,
}

impl From<SortedRangeSet> for RawSortedRangeSet {
    fn from(set: SortedRangeSet) -> RawSortedRangeSet {
        RawSortedRangeSet {
            data_type: set.data_type,
            ranges: set.low_indexed_ranges.into_values().collect(),
        }
    }
}

impl TryFrom<RawSortedRangeSet> for SortedRangeSet {
    type Error = crate::error::Error;

    fn try_from(raw: RawSortedRangeSet) -> Result<SortedRangeSet> {
        SortedRangeSet::from_ranges(raw.data_type, raw.ranges)
    }
}
