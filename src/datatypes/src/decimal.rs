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

use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::error::{DecimalOverflowSnafu, InvalidPrecisionOrScaleSnafu, Result};

/// The maximum precision of a [Decimal128].
pub const DECIMAL128_MAX_PRECISION: u8 = 38;

/// 128-bit decimal. The raw integer `value` is scaled by `10^(-scale)` and
/// holds at most `precision` significant digits.
///
/// Decimals of the same precision and scale order by their raw value; mixing
/// precisions or scales is a type mismatch and is rejected by upper layers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal128 {
    value: i128,
    precision: u8,
    scale: i8,
}

impl Decimal128 {
    /// Creates a decimal without validating that `value` fits in `precision`.
    pub fn new(value: i128, precision: u8, scale: i8) -> Self {
        Self {
            value,
            precision,
            scale,
        }
    }

    /// Creates a decimal, checking precision bounds and digit overflow.
    pub fn try_new(value: i128, precision: u8, scale: i8) -> Result<Self> {
        ensure!(
            precision >= 1
                && precision <= DECIMAL128_MAX_PRECISION
                && scale.unsigned_abs() <= precision,
            InvalidPrecisionOrScaleSnafu { precision, scale }
        );
        ensure!(
            value.unsigned_abs() <= Self::max_raw_value(precision),
            DecimalOverflowSnafu { value, precision }
        );
        Ok(Self {
            value,
            precision,
            scale,
        })
    }

    pub fn value(&self) -> i128 {
        self.value
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn scale(&self) -> i8 {
        self.scale
    }

    /// The largest decimal representable with `precision` digits at `scale`.
    pub fn max_value(precision: u8, scale: i8) -> Self {
        Self::new(Self::max_raw_value(precision) as i128, precision, scale)
    }

    /// The smallest decimal representable with `precision` digits at `scale`.
    pub fn min_value(precision: u8, scale: i8) -> Self {
        Self::new(-(Self::max_raw_value(precision) as i128), precision, scale)
    }

    /// Decimal one ulp greater, `None` when all `precision` digits are used up.
    pub fn checked_next(&self) -> Option<Self> {
        if self.value.unsigned_abs() >= Self::max_raw_value(self.precision) && self.value > 0 {
            return None;
        }
        Some(Self::new(self.value + 1, self.precision, self.scale))
    }

    /// Decimal one ulp smaller, `None` at the bottom of the domain.
    pub fn checked_prev(&self) -> Option<Self> {
        if self.value.unsigned_abs() >= Self::max_raw_value(self.precision) && self.value < 0 {
            return None;
        }
        Some(Self::new(self.value - 1, self.precision, self.scale))
    }

    // `10^precision - 1`, fits in u128 for any precision up to 38.
    fn max_raw_value(precision: u8) -> u128 {
        10u128.pow(u32::from(precision.min(DECIMAL128_MAX_PRECISION))) - 1
    }
}

impl Display for Decimal128 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.scale > 0 {
            let sign = if self.value < 0 { "-" } else { "" };
            let unsigned = self.value.unsigned_abs();
            let factor = 10u128.pow(self.scale as u32);
            let integral = unsigned / factor;
            let fraction = unsigned % factor;
            write!(
                f,
                "{}{}.{:0width$}",
                sign,
                integral,
                fraction,
                width = self.scale as usize
            )
        } else {
            write!(
                f,
                "{}{}",
                self.value,
                "0".repeat(self.scale.unsigned_abs() as usize)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!("123.45", Decimal128::new(12345, 5, 2).to_string());
        assert_eq!("-123.45", Decimal128::new(-12345, 5, 2).to_string());
        assert_eq!("0.05", Decimal128::new(5, 5, 2).to_string());
        assert_eq!("12345", Decimal128::new(12345, 5, 0).to_string());
        assert_eq!("12300", Decimal128::new(123, 5, -2).to_string());
    }

    #[test]
    fn test_try_new() {
        assert!(Decimal128::try_new(999, 3, 1).is_ok());
        assert!(Decimal128::try_new(1000, 3, 1).is_err());
        assert!(Decimal128::try_new(1, 0, 0).is_err());
        assert!(Decimal128::try_new(1, 39, 0).is_err());
    }

    #[test]
    fn test_stepping() {
        let d = Decimal128::new(998, 3, 1);
        assert_eq!(Some(Decimal128::new(999, 3, 1)), d.checked_next());
        assert_eq!(None, Decimal128::new(999, 3, 1).checked_next());
        assert_eq!(None, Decimal128::new(-999, 3, 1).checked_prev());
        assert_eq!(
            Some(Decimal128::new(-999, 3, 1)),
            Decimal128::new(-998, 3, 1).checked_prev()
        );
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Decimal128::new(999, 3, 2), Decimal128::max_value(3, 2));
        assert_eq!(Decimal128::new(-999, 3, 2), Decimal128::min_value(3, 2));
        assert!(Decimal128::min_value(3, 2) < Decimal128::max_value(3, 2));
    }
}
