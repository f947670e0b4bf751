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

use std::any::Any;

use common_error::ext::ErrorExt;
use common_error::status_code::StatusCode;
use datatypes::prelude::ConcreteDataType;
use snafu::{Location, Snafu};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Mismatched data types: expected {}, found {}", expected, found))]
    TypeMismatch {
        expected: ConcreteDataType,
        found: ConcreteDataType,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid marker: {}", reason))]
    InvalidMarker {
        reason: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid range: {}", reason))]
    InvalidRange {
        reason: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Marker has no adjacent marker: {}", reason))]
    NoAdjacentMarker {
        reason: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Value set does not contain a single value"))]
    NotSingleValue {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Value set is not a discrete set"))]
    NotDiscreteSet {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Cannot get the span of an empty range set"))]
    EmptyRangeSet {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Incompatible value set variants: {} vs {}", left, right))]
    InvalidValueSetVariant {
        left: &'static str,
        right: &'static str,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::TypeMismatch { .. }
            | Error::InvalidMarker { .. }
            | Error::InvalidRange { .. }
            | Error::InvalidValueSetVariant { .. } => StatusCode::InvalidArguments,

            Error::NoAdjacentMarker { .. } => StatusCode::Unsupported,

            Error::NotSingleValue { .. }
            | Error::NotDiscreteSet { .. }
            | Error::EmptyRangeSet { .. } => StatusCode::Unexpected,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Result<T> = std::result::Result<T, Error>;
