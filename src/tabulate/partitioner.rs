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

//! Adaptive partitioning of the domain into quintic intervals.
//!
//! # Algorithm
//!
//! The domain is swept from `rmax` towards `rmin` so that the smooth, long-ranged part is
//! covered first and refinement increases towards the (typically steep) short-ranged part.
//! For each interval:
//!
//! 1. The trial interval starts at the current upper edge and reaches all the way to `rmin`.
//! 2. A quintic Hermite polynomial is fitted in r² using finite difference derivatives.
//! 3. The fit is checked at [`SAMPLES_PER_INTERVAL`] points equally spaced in r.
//! 4. On failure the width is multiplied by [`SHRINK_FACTOR`] and the fit retried.
//! 5. On success the upper edge moves to the lower edge of the accepted interval.
//!
//! If an accepted interval exceeds one of the magnitude ceilings, the region is
//! repulsive and the sweep stops there; the table minimum is raised accordingly.

use super::boundary::extend_full;
use super::config::TabulatorConfig;
use super::derivative::CentralDifference;
use super::error::{Result, TabulateError};
use super::quintic::QuinticCoeffs;
use super::table::Table;
use super::TabulationTarget;
use std::iter;
use tracing::{debug, instrument, trace, warn};

/// Number of points at which each interval is checked, including both edges
pub const SAMPLES_PER_INTERVAL: usize = 11;

/// Multiplicative factor to decrease the interval width after a failed check
pub const SHRINK_FACTOR: f64 = 0.9;

/// Maximum number of width reductions per interval
pub const MAX_SHRINK_ATTEMPTS: usize = 100;

/// Maximum number of intervals in a table
pub const MAX_INTERVALS: usize = 1200;

/// Outcome of checking a fitted interval against the target function
#[derive(Clone, Copy, Debug, PartialEq)]
struct Check {
    accepted: bool,
    repulsive: bool,
}

/// An accepted interval, [rlow, rupp], in r
#[derive(Clone, Copy, Debug)]
struct Interval {
    rlow: f64,
    coeffs: QuinticCoeffs,
    repulsive: bool,
}

/// Builds [`Table`]s from functions of the squared distance.
///
/// # Examples
/// ```
/// use pairtab::tabulate::{Tabulator, TabulatorConfig};
/// let config = TabulatorConfig::default().with_range(1.0, 10.0).with_tolerance(1e-4);
/// let f = |rsq: f64| (-rsq.sqrt()).exp();
/// let table = Tabulator::new(config).generate(&f)?;
/// let rsq = 2.3 * 2.3;
/// assert!((table.eval(rsq) - f(rsq)).abs() < 2e-4);
/// # Ok::<(), pairtab::tabulate::TabulateError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Tabulator {
    config: TabulatorConfig,
    max_intervals: usize,
    max_attempts: usize,
}

impl Tabulator {
    pub fn new(config: TabulatorConfig) -> Self {
        Self {
            config,
            max_intervals: MAX_INTERVALS,
            max_attempts: MAX_SHRINK_ATTEMPTS,
        }
    }

    /// Override the maximum number of intervals and of width reductions per interval
    pub fn with_budget(mut self, max_intervals: usize, max_attempts: usize) -> Self {
        self.max_intervals = max_intervals;
        self.max_attempts = max_attempts;
        self
    }

    pub fn config(&self) -> &TabulatorConfig {
        &self.config
    }

    /// Tabulate `f` over the configured range.
    ///
    /// The configuration is validated before any function evaluation.
    /// Fails if an interval cannot meet the tolerances within the allowed
    /// number of width reductions, or if more intervals than allowed are needed.
    #[instrument(skip_all, fields(rmin = self.config.rmin, rmax = self.config.rmax))]
    pub fn generate<F: TabulationTarget + ?Sized>(&self, f: &F) -> Result<Table> {
        self.config.validate()?;
        let diff = CentralDifference::new(self.config.step);
        let (mut rsq_min, rsq_max) = self.config.rsq_range();

        // intervals as (lower edge r², coefficients) from high to low
        let mut descending: Vec<(f64, QuinticCoeffs)> = Vec::new();
        let mut rupp = self.config.rmax;
        loop {
            if descending.len() >= self.max_intervals {
                return Err(TabulateError::GridBudgetExceeded {
                    max_intervals: self.max_intervals,
                });
            }
            let interval = self.fit_interval(f, &diff, rupp)?;
            let zlow = interval.rlow * interval.rlow;
            trace!(rlow = interval.rlow, rupp, "accepted interval");
            descending.push((zlow, interval.coeffs));

            if interval.repulsive {
                warn!(
                    r = interval.rlow,
                    "repulsive region reached; tabulation stops here"
                );
                rsq_min = zlow;
                break;
            }
            if interval.rlow <= self.config.rmin {
                break;
            }
            rupp = interval.rlow;
        }

        debug!(intervals = descending.len(), rsq_min, rsq_max, "table generated");

        let rsq = descending
            .iter()
            .rev()
            .map(|(zlow, _)| *zlow)
            .chain(iter::once(rsq_max))
            .collect();
        let intervals = descending.into_iter().rev().map(|(_, coeffs)| coeffs);
        Ok(Table::from_intervals(rsq, intervals, rsq_min, rsq_max))
    }

    /// Tabulate `f` and extend with a hard wall below and zero above the range.
    ///
    /// See [`extend_full`].
    pub fn generate_full<F: TabulationTarget + ?Sized>(&self, f: &F) -> Result<Table> {
        self.generate(f).map(extend_full)
    }

    /// Find the widest acceptable interval with upper edge `rupp`
    fn fit_interval<F: TabulationTarget + ?Sized>(
        &self,
        f: &F,
        diff: &CentralDifference,
        rupp: f64,
    ) -> Result<Interval> {
        let rmin = self.config.rmin;
        let zupp = rupp * rupp;
        let upper = diff.endpoint(f, zupp);
        let mut dr = rupp - rmin;

        for _ in 0..self.max_attempts {
            let rlow = (rupp - dr).max(rmin);
            let zlow = rlow * rlow;
            let lower = diff.endpoint(f, zlow);
            let coeffs = QuinticCoeffs::fit(zlow, zupp, &lower, &upper);
            let check = self.check(f, diff, &coeffs, rlow, rupp);
            if check.accepted {
                return Ok(Interval {
                    rlow,
                    coeffs,
                    repulsive: check.repulsive,
                });
            }
            dr *= SHRINK_FACTOR;
        }
        Err(TabulateError::ToleranceUnachievable {
            r: rupp,
            attempts: self.max_attempts,
        })
    }

    /// Compare the fitted polynomial with `f` at equidistant points in r.
    ///
    /// NaN deviations are rejected.
    fn check<F: TabulationTarget + ?Sized>(
        &self,
        f: &F,
        diff: &CentralDifference,
        coeffs: &QuinticCoeffs,
        rlow: f64,
        rupp: f64,
    ) -> Check {
        let tolerances = &self.config.tolerances;
        let dr = (rupp - rlow) / (SAMPLES_PER_INTERVAL - 1) as f64;
        let zlow = rlow * rlow;
        let within = |a: f64, b: f64, tolerance: f64| (a - b).abs() <= tolerance;
        let mut repulsive = false;

        for i in 0..SAMPLES_PER_INTERVAL {
            let r = rlow + dr * i as f64;
            let rsq = r * r;
            let dz = rsq - zlow;
            let u = coeffs.value(dz);
            let du = coeffs.derivative(dz);

            let rejected = !within(u, f.evaluate(rsq), tolerances.energy)
                || tolerances
                    .derivative
                    .is_some_and(|ftol| !within(du, diff.first(f, rsq), ftol));
            if rejected {
                return Check {
                    accepted: false,
                    repulsive,
                };
            }
            // both ceilings apply to the fitted value
            repulsive |= tolerances.max_energy.is_some_and(|max| u.abs() > max)
                || tolerances.max_derivative.is_some_and(|max| u.abs() > max);
        }
        Check {
            accepted: true,
            repulsive,
        }
    }
}
