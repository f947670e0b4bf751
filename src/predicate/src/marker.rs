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

use std::cmp::Ordering;

use datatypes::prelude::{ConcreteDataType, Value};
use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::error::{InvalidMarkerSnafu, NoAdjacentMarkerSnafu, Result, TypeMismatchSnafu};

/// Position of a marker relative to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bound {
    /// Lower than the value, but infinitesimally close to it.
    Below,
    /// Exactly the value.
    Exactly,
    /// Higher than the value, but infinitesimally close to it.
    Above,
}

/// A point on the ordered value space of a data type.
///
/// A marker either sits just below, exactly at or just above a concrete
/// value, or marks one of the two unbounded ends of the space. The unbounded
/// ends carry no value: `(None, Above)` lies below every value of the type,
/// `(None, Below)` lies above every value.
///
/// Markers of the same data type are totally ordered:
/// `(None, Above) < Below(v) < Exactly(v) < Above(v) < (None, Below)`, and
/// markers over different values order by the values themselves. Comparing
/// markers of different data types yields no ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMarker")]
pub struct Marker {
    data_type: ConcreteDataType,
    value: Option<Value>,
    bound: Bound,
}

impl Marker {
    /// Marker below every value of the type.
    pub fn lower_unbounded(data_type: ConcreteDataType) -> Marker {
        Marker {
            data_type,
            value: None,
            bound: Bound::Above,
        }
    }

    /// Marker above every value of the type.
    pub fn upper_unbounded(data_type: ConcreteDataType) -> Marker {
        Marker {
            data_type,
            value: None,
            bound: Bound::Below,
        }
    }

    pub fn below(data_type: ConcreteDataType, value: Value) -> Result<Marker> {
        Self::with_bound(data_type, value, Bound::Below)
    }

    pub fn exactly(data_type: ConcreteDataType, value: Value) -> Result<Marker> {
        Self::with_bound(data_type, value, Bound::Exactly)
    }

    pub fn above(data_type: ConcreteDataType, value: Value) -> Result<Marker> {
        Self::with_bound(data_type, value, Bound::Above)
    }

    fn with_bound(data_type: ConcreteDataType, value: Value, bound: Bound) -> Result<Marker> {
        check_value(&data_type, &value)?;
        Ok(Marker {
            data_type,
            value: Some(value),
            bound,
        })
    }

    pub fn data_type(&self) -> &ConcreteDataType {
        &self.data_type
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    /// The concrete value of this marker, absent for the unbounded ends.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_lower_unbounded(&self) -> bool {
        self.value.is_none() && self.bound == Bound::Above
    }

    pub fn is_upper_unbounded(&self) -> bool {
        self.value.is_none() && self.bound == Bound::Below
    }

    pub(crate) fn check_type_compatibility(&self, other: &Marker) -> Result<()> {
        ensure!(
            self.data_type == other.data_type,
            TypeMismatchSnafu {
                expected: self.data_type.clone(),
                found: other.data_type.clone(),
            }
        );
        Ok(())
    }

    /// Whether no value of the domain lies strictly between this marker and
    /// `other`, so that two ranges meeting at them coalesce losslessly.
    ///
    /// Markers around the same value are adjacent when exactly one of them is
    /// an exact bound. Exact markers of two different values are adjacent
    /// when the values are consecutive in the type's discrete domain; types
    /// without a discrete domain are never adjacent across distinct values.
    pub fn is_adjacent(&self, other: &Marker) -> Result<bool> {
        self.check_type_compatibility(other)?;

        let (Some(value), Some(other_value)) = (&self.value, &other.value) else {
            return Ok(false);
        };

        if value == other_value {
            return Ok((self.bound == Bound::Exactly) != (other.bound == Bound::Exactly));
        }

        if self.bound != Bound::Exactly || other.bound != Bound::Exactly {
            return Ok(false);
        }
        let Some(domain) = self.data_type.discrete_domain() else {
            return Ok(false);
        };
        let (lesser, greater) = if value < other_value {
            (value, other_value)
        } else {
            (other_value, value)
        };
        Ok(domain.next_value(lesser).as_ref() == Some(greater))
    }

    /// The marker right after this one, crossing the value boundary upwards.
    ///
    /// Exact markers step to the next discrete value when the type has one
    /// and degrade to an open (`Above`) bound otherwise. An `Above` marker
    /// can only move on by stepping, so it fails on continuous types; lower
    /// and upper unbounded markers have no adjacent marker at all.
    pub fn greater_adjacent(&self) -> Result<Marker> {
        let Some(value) = &self.value else {
            return NoAdjacentMarkerSnafu {
                reason: "marker is unbounded",
            }
            .fail();
        };

        let next = || {
            self.data_type
                .discrete_domain()
                .and_then(|domain| domain.next_value(value))
        };

        match self.bound {
            Bound::Below => Ok(Marker {
                data_type: self.data_type.clone(),
                value: Some(value.clone()),
                bound: Bound::Exactly,
            }),
            Bound::Exactly => match next() {
                Some(next) => Ok(Marker {
                    data_type: self.data_type.clone(),
                    value: Some(next),
                    bound: Bound::Exactly,
                }),
                // No successor to step to, leave the bound open.
                None => Ok(Marker {
                    data_type: self.data_type.clone(),
                    value: Some(value.clone()),
                    bound: Bound::Above,
                }),
            },
            Bound::Above => match next() {
                Some(next) => Ok(Marker {
                    data_type: self.data_type.clone(),
                    value: Some(next),
                    bound: Bound::Exactly,
                }),
                None => NoAdjacentMarkerSnafu {
                    reason: format!("no value after {} in type {}", value, self.data_type),
                }
                .fail(),
            },
        }
    }

    /// The marker right before this one, mirror of [Marker::greater_adjacent].
    pub fn lesser_adjacent(&self) -> Result<Marker> {
        let Some(value) = &self.value else {
            return NoAdjacentMarkerSnafu {
                reason: "marker is unbounded",
            }
            .fail();
        };

        let prev = || {
            self.data_type
                .discrete_domain()
                .and_then(|domain| domain.prev_value(value))
        };

        match self.bound {
            Bound::Above => Ok(Marker {
                data_type: self.data_type.clone(),
                value: Some(value.clone()),
                bound: Bound::Exactly,
            }),
            Bound::Exactly => match prev() {
                Some(prev) => Ok(Marker {
                    data_type: self.data_type.clone(),
                    value: Some(prev),
                    bound: Bound::Exactly,
                }),
                None => Ok(Marker {
                    data_type: self.data_type.clone(),
                    value: Some(value.clone()),
                    bound: Bound::Below,
                }),
            },
            Bound::Below => match prev() {
                Some(prev) => Ok(Marker {
                    data_type: self.data_type.clone(),
                    value: Some(prev),
                    bound: Bound::Exactly,
                }),
                None => NoAdjacentMarkerSnafu {
                    reason: format!("no value before {} in type {}", value, self.data_type),
                }
                .fail(),
            },
        }
    }

    fn cmp_within_type(&self, other: &Marker) -> Ordering {
        match (&self.value, &other.value) {
            (None, None) => match (self.bound, other.bound) {
                // Lower unbounded is an `Above` bound, upper unbounded a `Below` one.
                (Bound::Above, Bound::Below) => Ordering::Less,
                (Bound::Below, Bound::Above) => Ordering::Greater,
                _ => Ordering::Equal,
            },
            (None, Some(_)) => {
                if self.is_lower_unbounded() {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (Some(_), None) => {
                if other.is_lower_unbounded() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Some(value), Some(other_value)) => value
                .cmp(other_value)
                .then_with(|| self.bound.cmp(&other.bound)),
        }
    }
}

impl PartialOrd for Marker {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.data_type != other.data_type {
            return None;
        }
        Some(self.cmp_within_type(other))
    }
}

impl Ord for Marker {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .expect("compared markers of different data types")
    }
}

fn check_value(data_type: &ConcreteDataType, value: &Value) -> Result<()> {
    ensure!(
        !value.is_null(),
        InvalidMarkerSnafu {
            reason: "marker value must not be null",
        }
    );
    ensure!(
        value.data_type() == *data_type,
        TypeMismatchSnafu {
            expected: data_type.clone(),
            found: value.data_type(),
        }
    );
    Ok(())
}

/// Wire form of [Marker], revalidated on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawMarker {
    data_type: ConcreteDataType,
    value: Option<Value>,
    bound: Bound,
}

impl TryFrom<RawMarker> for Marker {
    type Error = crate::error::Error;

    fn try_from(raw: RawMarker) -> Result<Marker> {
        match &raw.value {
            Some(value) => check_value(&raw.data_type, value)?,
            None => ensure!(
                raw.bound != Bound::Exactly,
                InvalidMarkerSnafu {
                    reason: "unbounded marker must not be an exact bound",
                }
            ),
        }
        Ok(Marker {
            data_type: raw.data_type,
            value: raw.value,
            bound: raw.bound,
        })
    }
}
