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

//! Column predicate value sets for query planning.
//!
//! A column predicate is represented as the set of values the column may
//! take: [Marker]s delimit positions on the ordered value space of a data
//! type, a [Range] spans two markers, and a [SortedRangeSet] keeps a
//! canonical (sorted, disjoint, maximally coalesced) union of ranges.
//! [ValueSet] is the wider boundary over the range, discrete-values and
//! all-or-none representations, and [Domain] pairs a value set with SQL
//! `NULL` handling for one column.
//!
//! The optimizer combines predicates with the set algebra (`AND` is
//! `intersect`, `OR` is `union`, `NOT` is `complement`) and the scanner uses
//! [stats::segment_may_match] to skip data segments whose min/max statistics
//! cannot overlap the predicate.

pub mod domain;
pub mod error;
pub mod marker;
pub mod range;
pub mod range_set;
pub mod stats;
pub mod value_set;

pub use domain::Domain;
pub use marker::{Bound, Marker};
pub use range::Range;
pub use range_set::{SortedRangeSet, SortedRangeSetBuilder};
pub use stats::{segment_may_match, ColumnStatistics};
pub use value_set::{AllOrNoneValueSet, EquatableValueSet, ValueSet};
