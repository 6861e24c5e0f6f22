// Copyright 2023 Mikael Lund
//
// Licensed under the Apache license, version 2.0 (the "license");
// you may not use this file except in compliance with the license.
// You may obtain a copy of the license at
//
//     http://www.apache.org/licenses/license-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the license is distributed on an "as is" basis,
// without warranties or conditions of any kind, either express or implied.
// See the license for the specific language governing permissions and
// limitations under the license.

//! Quintic Hermite interpolation over a single interval.

use std::fmt::{self, Debug};

/// Values below this are treated as zero when deciding on a flat segment
pub const ZERO_THRESHOLD: f64 = 1e-9;

/// Function value together with first and second derivative at a point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Endpoint {
    pub value: f64,
    pub first: f64,
    pub second: f64,
}

/// Coefficients of a quintic polynomial in the offset, dz, from the lower interval edge:
/// ```text
/// p(dz) = c₀ + c₁·dz + c₂·dz² + c₃·dz³ + c₄·dz⁴ + c₅·dz⁵
/// ```
#[derive(Clone, Copy, Default, PartialEq)]
pub struct QuinticCoeffs(pub [f64; 6]);

impl Debug for QuinticCoeffs {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "QuinticCoeffs {:?}", self.0)
    }
}

impl QuinticCoeffs {
    /// Fit to value, slope and curvature at both ends of [`low`, `upp`].
    ///
    /// This is a closed-form solve. If both value and slope at `low` vanish, a flat zero segment
    /// is returned without further work.
    ///
    /// # Examples
    /// ```
    /// use pairtab::tabulate::{Endpoint, QuinticCoeffs};
    /// // f(x) = x², fitted on [1, 3]
    /// let low = Endpoint { value: 1.0, first: 2.0, second: 2.0 };
    /// let upp = Endpoint { value: 9.0, first: 6.0, second: 2.0 };
    /// let p = QuinticCoeffs::fit(1.0, 3.0, &low, &upp);
    /// assert!((p.value(1.0) - 4.0).abs() < 1e-12); // x = 2
    /// ```
    pub fn fit(low: f64, upp: f64, lower: &Endpoint, upper: &Endpoint) -> Self {
        if lower.value.abs() < ZERO_THRESHOLD && lower.first.abs() < ZERO_THRESHOLD {
            return Self::default();
        }
        let dz1 = upp - low;
        let dz2 = dz1 * dz1;
        let dz3 = dz2 * dz1;

        let c0 = lower.value;
        let c1 = lower.first;
        let c2 = lower.second * 0.5;

        // residuals at the upper edge after removing the quadratic part
        let a = 6.0 * (upper.value - c0 - c1 * dz1 - c2 * dz2) / dz3;
        let b = 2.0 * (upper.first - c1 - 2.0 * c2 * dz1) / dz2;
        let c = (upper.second - 2.0 * c2) / dz1;

        let c3 = (10.0 * a - 12.0 * b + 3.0 * c) / 6.0;
        let c4 = (-15.0 * a + 21.0 * b - 6.0 * c) / (6.0 * dz1);
        let c5 = (2.0 * a - 3.0 * b + c) / (2.0 * dz2);

        Self([c0, c1, c2, c3, c4, c5])
    }

    /// True if all coefficients are zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| *c == 0.0)
    }

    /// Polynomial value at offset `dz`
    #[inline]
    pub fn value(&self, dz: f64) -> f64 {
        horner(&self.0, dz)
    }

    /// First derivative with respect to `dz`
    #[inline]
    pub fn derivative(&self, dz: f64) -> f64 {
        horner_derivative(&self.0, dz)
    }

    /// Second derivative with respect to `dz`
    #[inline]
    pub fn second_derivative(&self, dz: f64) -> f64 {
        let c = &self.0;
        2.0 * c[2] + dz * (6.0 * c[3] + dz * (12.0 * c[4] + dz * (20.0 * c[5])))
    }
}

/// Degree five polynomial using nested multiplication
#[inline(always)]
pub(crate) fn horner(c: &[f64], dz: f64) -> f64 {
    c[0] + dz * (c[1] + dz * (c[2] + dz * (c[3] + dz * (c[4] + dz * c[5]))))
}

/// Analytical derivative of [`horner`]
#[inline(always)]
pub(crate) fn horner_derivative(c: &[f64], dz: f64) -> f64 {
    c[1] + dz * (2.0 * c[2] + dz * (3.0 * c[3] + dz * (4.0 * c[4] + dz * (5.0 * c[5]))))
}
