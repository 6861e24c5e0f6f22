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

//! Tabulated pair potentials using adaptive quintic interpolation
//!
//! Provides `TabulatedPotential` that wraps any `IsotropicTwobodyEnergy`
//! and replaces analytical evaluation with a table lookup.
//!
//! - **Grid in r²**: Since `IsotropicTwobodyEnergy` already uses r², no sqrt needed for the energy
//! - **Quintic Hermite intervals**: C² continuous, sized adaptively to a given tolerance
//! - **Hard wall below, zero above**: The table is extended to cover all distances
//!
//! # Example
//!
//! ```
//! use pairtab::twobody::{LennardJones, TabulatedPotential, IsotropicTwobodyEnergy};
//! use pairtab::tabulate::TabulatorConfig;
//!
//! let lj = LennardJones::new(1.0, 1.0);
//! let config = TabulatorConfig::default().with_range(0.9, 2.5).with_tolerance(1e-4);
//! let tabulated = TabulatedPotential::new(&lj, config)?;
//!
//! // Use in inner loop (no sqrt needed!)
//! let rsq = 1.5 * 1.5;
//! let energy = tabulated.isotropic_twobody_energy(rsq);
//! assert!((energy - lj.isotropic_twobody_energy(rsq)).abs() < 2e-4);
//! # Ok::<(), pairtab::tabulate::TabulateError>(())
//! ```

use super::IsotropicTwobodyEnergy;
use crate::tabulate::{Result, Table, Tabulator, TabulatorConfig};
use crate::Cutoff;
use std::fmt::{self, Debug};
use tracing::info;

/// A tabulated version of any isotropic twobody potential.
///
/// The potential is type-erased after construction: only the table is kept.
/// Below the tabulated range the energy is a constant hard wall, and beyond
/// the upper bound it is zero.
#[derive(Clone)]
pub struct TabulatedPotential {
    /// Fully extended table
    table: Table,
    /// Tabulated range in r² before extension
    rsq_min: f64,
    rsq_max: f64,
    /// Construction parameters
    config: TabulatorConfig,
}

impl TabulatedPotential {
    /// Tabulate `potential` within the range and tolerances of `config`.
    ///
    /// The upper bound of the range acts as cutoff.
    pub fn new<P: IsotropicTwobodyEnergy + ?Sized>(
        potential: &P,
        config: TabulatorConfig,
    ) -> Result<Self> {
        let tabulator = Tabulator::new(config);
        let table =
            tabulator.generate(&|rsq: f64| potential.isotropic_twobody_energy(rsq))?;
        let (rsq_min, rsq_max) = (table.rsq_min(), table.rsq_max());
        info!(
            intervals = table.len(),
            r_min = rsq_min.sqrt(),
            r_max = rsq_max.sqrt(),
            "tabulated {:?}",
            potential
        );
        Ok(Self {
            table: crate::tabulate::extend_full(table),
            rsq_min,
            rsq_max,
            config: tabulator.config().clone(),
        })
    }

    /// Tabulate a potential with a cutoff, using the cutoff as upper bound.
    ///
    /// The lower bound is the larger of `config.rmin` and the potential's lower cutoff.
    pub fn with_cutoff<P: IsotropicTwobodyEnergy + Cutoff>(
        potential: &P,
        config: TabulatorConfig,
    ) -> Result<Self> {
        let rmin = config.rmin.max(potential.lower_cutoff());
        let config = config.with_range(rmin, potential.cutoff());
        Self::new(potential, config)
    }

    /// Underlying table, including the hard wall and zero extension
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &TabulatorConfig {
        &self.config
    }

    /// Get table statistics for debugging.
    pub fn stats(&self) -> TableStats {
        TableStats {
            n_intervals: self.table.len(),
            rsq_min: self.rsq_min,
            rsq_max: self.rsq_max,
            r_min: self.rsq_min.sqrt(),
            r_max: self.rsq_max.sqrt(),
            memory_bytes: self.table.memory_bytes(),
            truncated: self.rsq_min > self.config.rsq_range().0,
        }
    }

    /// Validate the table against the original potential.
    ///
    /// Energies are compared at `n_test` points within the tabulated range.
    /// Relative errors are used where the energy is significant, absolute otherwise.
    pub fn validate<P: IsotropicTwobodyEnergy + ?Sized>(
        &self,
        potential: &P,
        n_test: usize,
    ) -> ValidationResult {
        let mut max_abs = 0.0f64;
        let mut max_rel = 0.0f64;
        let mut worst_rsq = self.rsq_min;

        for i in 0..n_test {
            // offset by 0.37 to avoid hitting breakpoints
            let t = (i as f64 + 0.37) / n_test as f64;
            let rsq = self.rsq_min + t * (self.rsq_max - self.rsq_min);
            let u_table = self.table.eval(rsq);
            let u_exact = potential.isotropic_twobody_energy(rsq);
            let abs_err = (u_table - u_exact).abs();
            let rel_err = if u_exact.abs() > 0.01 {
                abs_err / u_exact.abs()
            } else {
                abs_err
            };
            if abs_err > max_abs {
                max_abs = abs_err;
                worst_rsq = rsq;
            }
            max_rel = max_rel.max(rel_err);
        }

        ValidationResult {
            max_abs_error: max_abs,
            max_rel_error: max_rel,
            worst_rsq,
        }
    }

    /// Evaluate energy for multiple squared distances at once
    #[inline]
    pub fn energies_batch(&self, rsq_values: &[f64], out: &mut [f64]) {
        debug_assert_eq!(rsq_values.len(), out.len());
        for (rsq, u) in rsq_values.iter().zip(out.iter_mut()) {
            *u = self.table.eval(*rsq);
        }
    }
}

impl IsotropicTwobodyEnergy for TabulatedPotential {
    /// Energy from the table; hard wall below and zero above the tabulated range
    #[inline]
    fn isotropic_twobody_energy(&self, distance_squared: f64) -> f64 {
        self.table.eval(distance_squared)
    }

    /// Force from the analytical derivative of the table, F = -2r dU/d(r²)
    #[inline]
    fn isotropic_twobody_force(&self, distance_squared: f64) -> f64 {
        -2.0 * distance_squared.sqrt() * self.table.slope(distance_squared)
    }
}

impl Cutoff for TabulatedPotential {
    #[inline]
    fn cutoff(&self) -> f64 {
        self.rsq_max.sqrt()
    }

    #[inline]
    fn cutoff_squared(&self) -> f64 {
        self.rsq_max
    }

    #[inline]
    fn lower_cutoff(&self) -> f64 {
        self.rsq_min.sqrt()
    }
}

impl Debug for TabulatedPotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabulatedPotential")
            .field("intervals", &self.table.len())
            .field("rsq_range", &(self.rsq_min, self.rsq_max))
            .finish()
    }
}

/// Statistics about a tabulated potential.
#[derive(Debug, Clone)]
pub struct TableStats {
    /// Number of intervals, including the extensions
    pub n_intervals: usize,
    pub rsq_min: f64,
    pub rsq_max: f64,
    pub r_min: f64,
    pub r_max: f64,
    pub memory_bytes: usize,
    /// True if a repulsive region raised the lower bound
    pub truncated: bool,
}

/// Results from validating a table against the original potential.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub max_abs_error: f64,
    pub max_rel_error: f64,
    pub worst_rsq: f64,
}

/// Create a boxed tabulated potential (useful for heterogeneous collections)
pub fn tabulate_potential<P>(
    potential: &P,
    config: TabulatorConfig,
) -> Result<Box<dyn IsotropicTwobodyEnergy>>
where
    P: IsotropicTwobodyEnergy + ?Sized,
{
    Ok(Box::new(TabulatedPotential::new(potential, config)?))
}
