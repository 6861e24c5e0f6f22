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

//! ## Adaptive tabulation
//!
//! Tabulation of any function f(x) in a given interval using piecewise quintic
//! Hermite polynomials. The function is assumed to be expressed in the squared
//! distance, x = r², so that no square root is needed in the inner loop, while
//! the range is given in r.
//!
//! The interval sizes are found by sweeping from the upper bound towards the lower bound,
//! shrinking each trial interval until the fitted polynomial matches the function to
//! within the requested tolerance. See Andrea, Swope & Andersen,
//! [doi:10/frzp4d](https://doi.org/10/frzp4d).
//!
//! The module has no dependencies on the rest of the crate and can be used
//! for general one-dimensional tabulation.

mod boundary;
mod config;
mod derivative;
mod error;
mod partitioner;
mod quintic;
mod table;

pub use self::boundary::{empty_table, extend_full, EMPTY_RSQ_MAX, HARD_WALL_ENERGY};
pub use self::config::{Tolerances, TabulatorConfig};
pub use self::derivative::CentralDifference;
pub use self::error::{Result, TabulateError};
pub use self::partitioner::{
    Tabulator, MAX_INTERVALS, MAX_SHRINK_ATTEMPTS, SAMPLES_PER_INTERVAL, SHRINK_FACTOR,
};
pub use self::quintic::{Endpoint, QuinticCoeffs, ZERO_THRESHOLD};
pub use self::table::{Table, DERIVATIVE_SCALE};

/// A function to be tabulated, f(x).
///
/// The function must be free of side effects as it is called many times, and in
/// no particular order, while the table is built. Any `Fn(f64) -> f64` closure qualifies.
pub trait TabulationTarget {
    /// Evaluate the function at `x` (typically a squared distance)
    fn evaluate(&self, x: f64) -> f64;
}

impl<F: Fn(f64) -> f64 + ?Sized> TabulationTarget for F {
    #[inline]
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}
