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

//! Pruning data segments by their column statistics.

use common_telemetry::{debug, warn};
use datatypes::prelude::{ConcreteDataType, Value};
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::Result;
use crate::range::Range;
use crate::value_set::ValueSet;

/// Min/max/null-count summary a statistics collector reports for one column
/// of a data segment (a file, a row group or a page).
///
/// Every field is optional: a writer may not have collected the statistic,
/// or the reader may fail to decode it. Missing information only ever widens
/// the derived domain, it never prunes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Smallest non-null value of the segment.
    pub min_value: Option<Value>,
    /// Largest non-null value of the segment.
    pub max_value: Option<Value>,
    /// Number of null rows of the segment.
    pub null_count: Option<u64>,
}

impl ColumnStatistics {
    /// The conservative domain of values a segment of `num_rows` rows with
    /// these statistics may contain.
    pub fn to_domain(&self, data_type: &ConcreteDataType, num_rows: u64) -> Result<Domain> {
        if num_rows == 0 {
            return Ok(Domain::none(data_type.clone()));
        }
        if self.null_count == Some(num_rows) {
            return Ok(Domain::only_null(data_type.clone()));
        }
        // An unknown null count has to assume nulls are present.
        let null_allowed = self.null_count.map_or(true, |count| count > 0);
        let range = self.value_range(data_type);
        Ok(Domain::new(
            ValueSet::of_ranges(data_type.clone(), [range])?,
            null_allowed,
        ))
    }

    // `[min, max]`, with each non-decodable side widened to unbounded.
    fn value_range(&self, data_type: &ConcreteDataType) -> Range {
        let decodable =
            |value: &&Value| !value.is_null() && value.data_type() == *data_type;
        let min = self.min_value.as_ref().filter(decodable);
        let max = self.max_value.as_ref().filter(decodable);

        let range = match (min, max) {
            (Some(min), Some(max)) => {
                Range::range(data_type.clone(), min.clone(), true, max.clone(), true)
            }
            (Some(min), None) => Range::greater_than_or_equal(data_type.clone(), min.clone()),
            (None, Some(max)) => Range::less_than_or_equal(data_type.clone(), max.clone()),
            (None, None) => return Range::all(data_type.clone()),
        };
        range.unwrap_or_else(|error| {
            warn!(
                "Ignoring corrupted column statistics {:?}, error: {}",
                self, error
            );
            Range::all(data_type.clone())
        })
    }
}

/// Whether a segment of `num_rows` rows with the given column statistics may
/// contain rows matching `predicate`. A `false` result licenses skipping the
/// segment without decoding it.
pub fn segment_may_match(
    predicate: &Domain,
    statistics: &ColumnStatistics,
    num_rows: u64,
) -> Result<bool> {
    let segment_domain = statistics.to_domain(predicate.data_type(), num_rows)?;
    let matched = predicate.overlaps(&segment_domain)?;
    if !matched {
        debug!(
            "Pruned segment by statistics, rows: {}, statistics: {:?}",
            num_rows, statistics
        );
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use datatypes::prelude::*;

    use super::*;

    fn int32_type() -> ConcreteDataType {
        ConcreteDataType::int32_datatype()
    }

    fn int_predicate(low: i32, high: i32) -> Domain {
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

    fn stats(min: i32, max: i32, null_count: u64) -> ColumnStatistics {
        ColumnStatistics {
            min_value: Some(Value::Int32(min)),
            max_value: Some(Value::Int32(max)),
            null_count: Some(null_count),
        }
    }

    #[test]
    fn test_disjoint_statistics_prune() {
        let predicate = int_predicate(1, 10);
        assert!(!segment_may_match(&predicate, &stats(20, 30, 0), 100).unwrap());
        assert!(!segment_may_match(&predicate, &stats(-5, 0, 0), 100).unwrap());
    }

    #[test]
    fn test_overlapping_statistics_keep() {
        let predicate = int_predicate(1, 10);
        assert!(segment_may_match(&predicate, &stats(5, 30, 0), 100).unwrap());
        assert!(segment_may_match(&predicate, &stats(10, 10, 0), 100).unwrap());
    }

    #[test]
    fn test_missing_statistics_never_prune() {
        let predicate = int_predicate(1, 10);
        assert!(segment_may_match(&predicate, &ColumnStatistics::default(), 100).unwrap());

        // Only one decodable side clips only that side.
        let half = ColumnStatistics {
            min_value: Some(Value::Int32(20)),
            max_value: None,
            null_count: Some(0),
        };
        assert!(!segment_may_match(&predicate, &half, 100).unwrap());
        let half = ColumnStatistics {
            min_value: None,
            max_value: Some(Value::Int32(5)),
            null_count: Some(0),
        };
        assert!(segment_may_match(&predicate, &half, 100).unwrap());
    }

    #[test]
    fn test_mistyped_statistics_widen() {
        // A bound of the wrong type cannot clip anything.
        let predicate = int_predicate(1, 10);
        let mistyped = ColumnStatistics {
            min_value: Some(Value::Int64(20)),
            max_value: Some(Value::Int64(30)),
            null_count: Some(0),
        };
        assert!(segment_may_match(&predicate, &mistyped, 100).unwrap());
    }

    #[test]
    fn test_corrupted_statistics_widen() {
        let predicate = int_predicate(1, 10);
        // min > max, the range is ignored rather than trusted.
        assert!(segment_may_match(&predicate, &stats(30, 20, 0), 100).unwrap());
    }

    #[test]
    fn test_all_null_segment() {
        let all_null = ColumnStatistics {
            min_value: None,
            max_value: None,
            null_count: Some(100),
        };
        assert!(!segment_may_match(&int_predicate(1, 10), &all_null, 100).unwrap());

        let is_null_predicate = Domain::only_null(int32_type());
        assert!(segment_may_match(&is_null_predicate, &all_null, 100).unwrap());
    }

    #[test]
    fn test_null_aware_pruning() {
        // Segment has values [20, 30] and some nulls.
        let segment = stats(20, 30, 5);
        assert!(!segment_may_match(&int_predicate(1, 10), &segment, 100).unwrap());
        // An IS NULL predicate keeps it.
        assert!(segment_may_match(&Domain::only_null(int32_type()), &segment, 100).unwrap());
        // Without nulls the IS NULL predicate prunes it.
        assert!(!segment_may_match(&Domain::only_null(int32_type()), &stats(20, 30, 0), 100)
            .unwrap());
    }

    #[test]
    fn test_empty_segment_prunes() {
        assert!(!segment_may_match(&int_predicate(1, 10), &stats(1, 10, 0), 0).unwrap());
    }

    #[test]
    fn test_statistics_to_domain() {
        let domain = stats(1, 10, 0).to_domain(&int32_type(), 100).unwrap();
        assert!(!domain.is_null_allowed());
        assert!(domain.includes_value(Some(&Value::Int32(5))).unwrap());
        assert!(!domain.includes_value(Some(&Value::Int32(11))).unwrap());

        let unknown = ColumnStatistics::default()
            .to_domain(&int32_type(), 100)
            .unwrap();
        assert!(unknown.is_all());
    }
}
