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

//! Immutable piecewise quintic table and its evaluation.

use super::error::{Result, TabulateError};
use super::quintic::{horner, horner_derivative, QuinticCoeffs};
use itertools::Itertools;
use std::fmt::{self, Debug};

/// Divisor applied by [`Table::eval_derivative`].
///
/// This is an empirical scale factor that downstream force calculations rely on.
/// It does not follow from the polynomial algebra and must stay as is.
pub const DERIVATIVE_SCALE: f64 = 1000.0;

/// Number of coefficients per interval
const NCOEFF: usize = 6;

/// Tabulated function as a piecewise quintic polynomial.
///
/// Interval `i` spans `[rsq[i], rsq[i+1]]` and stores six coefficients
/// in the offset from `rsq[i]`. The table is read-only once built and can be
/// shared between threads.
#[derive(Clone, PartialEq)]
pub struct Table {
    /// Strictly increasing breakpoints
    rsq: Vec<f64>,
    /// Six coefficients per interval
    coeffs: Vec<f64>,
    /// Lower bound of the valid range
    rsq_min: f64,
    /// Upper bound of the valid range
    rsq_max: f64,
    /// First interval is a hard wall that also covers its upper breakpoint
    hard_wall: bool,
}

impl Table {
    /// Assemble a table from ascending breakpoints and one coefficient set per interval.
    pub(crate) fn from_intervals(
        rsq: Vec<f64>,
        intervals: impl IntoIterator<Item = QuinticCoeffs>,
        rsq_min: f64,
        rsq_max: f64,
    ) -> Self {
        let coeffs = intervals.into_iter().flat_map(|c| c.0).collect_vec();
        let table = Self {
            rsq,
            coeffs,
            rsq_min,
            rsq_max,
            hard_wall: false,
        };
        debug_assert!(table.is_consistent());
        table
    }

    /// Let the first interval own its upper breakpoint, so that `x <= rsq[1]` hits the wall.
    pub(crate) fn with_hard_wall(mut self) -> Self {
        self.hard_wall = self.rsq.len() > 2;
        self
    }

    /// Breakpoints in the transformed (squared) domain
    pub fn breakpoints(&self) -> &[f64] {
        &self.rsq
    }

    /// Flat coefficient block with six entries per interval
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Coefficients of interval `index`
    pub fn interval(&self, index: usize) -> Option<QuinticCoeffs> {
        self.coeffs
            .chunks_exact(NCOEFF)
            .nth(index)
            .map(|c| QuinticCoeffs([c[0], c[1], c[2], c[3], c[4], c[5]]))
    }

    /// Iterate over `(lower breakpoint, upper breakpoint, coefficients)`
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64, &[f64])> + '_ {
        self.rsq
            .iter()
            .tuple_windows()
            .zip(self.coeffs.chunks_exact(NCOEFF))
            .map(|((low, upp), c)| (*low, *upp, c))
    }

    /// Number of intervals
    pub fn len(&self) -> usize {
        self.rsq.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lower bound of the valid range (squared)
    pub fn rsq_min(&self) -> f64 {
        self.rsq_min
    }

    /// Upper bound of the valid range (squared)
    pub fn rsq_max(&self) -> f64 {
        self.rsq_max
    }

    /// True if `x` lies within the recorded valid range
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.rsq_min && x <= self.rsq_max
    }

    /// Structural invariants: sorted breakpoints and six coefficients per interval
    pub fn is_consistent(&self) -> bool {
        self.rsq.len() >= 2
            && self.coeffs.len() == NCOEFF * (self.rsq.len() - 1)
            && self.rsq.iter().tuple_windows().all(|(a, b)| a < b)
    }

    /// Index of the interval holding `x` and the offset from its lower breakpoint.
    ///
    /// Intervals are closed below and open above, except the last one and a hard wall,
    /// which are closed. Queries outside the table are clamped to the first or last interval.
    /// The offset is kept finite so that a zero tail evaluates to zero at x = ∞.
    #[inline]
    fn locate(&self, x: f64) -> (usize, f64) {
        let index = self
            .rsq
            .partition_point(|&b| b <= x)
            .saturating_sub(1)
            .min(self.len().saturating_sub(1));
        let index = if self.hard_wall && index == 1 && x == self.rsq[1] {
            0
        } else {
            index
        };
        (index, (x - self.rsq[index]).clamp(f64::MIN, f64::MAX))
    }

    /// Tabulated value at `x`.
    ///
    /// `x` must lie within [`Table::rsq_min`, `Table::rsq_max`]; use [`Table::try_eval`]
    /// for a checked version.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        let (index, dz) = self.locate(x);
        let offset = NCOEFF * index;
        horner(&self.coeffs[offset..offset + NCOEFF], dz)
    }

    /// Analytical first derivative of the polynomial, df/dx, at `x`
    #[inline]
    pub fn slope(&self, x: f64) -> f64 {
        let (index, dz) = self.locate(x);
        let offset = NCOEFF * index;
        horner_derivative(&self.coeffs[offset..offset + NCOEFF], dz)
    }

    /// Tabulated derivative at `x`, scaled by 1/[`DERIVATIVE_SCALE`]
    #[inline]
    pub fn eval_derivative(&self, x: f64) -> f64 {
        self.slope(x) / DERIVATIVE_SCALE
    }

    /// Checked version of [`Table::eval`]
    pub fn try_eval(&self, x: f64) -> Result<f64> {
        self.check_domain(x).map(|_| self.eval(x))
    }

    /// Checked version of [`Table::eval_derivative`]
    pub fn try_eval_derivative(&self, x: f64) -> Result<f64> {
        self.check_domain(x).map(|_| self.eval_derivative(x))
    }

    fn check_domain(&self, x: f64) -> Result<()> {
        if self.contains(x) {
            Ok(())
        } else {
            Err(TabulateError::OutOfDomain {
                x,
                min: self.rsq_min,
                max: self.rsq_max,
            })
        }
    }

    /// Memory used by breakpoints and coefficients
    pub fn memory_bytes(&self) -> usize {
        (self.rsq.len() + self.coeffs.len()) * std::mem::size_of::<f64>()
    }
}

impl Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("intervals", &self.len())
            .field("rsq_range", &(self.rsq_min, self.rsq_max))
            .finish()
    }
}
