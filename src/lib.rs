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

//! # Pairtab
//!
//! Adaptive tabulation of one-dimensional functions, tailored for pair potentials.
//!
//! An expensive function of the squared distance, u(r²), is converted into a piecewise
//! quintic polynomial whose intervals are sized adaptively until a given tolerance is met.
//! The resulting [`tabulate::Table`] is immutable and can be evaluated from any number of
//! threads using a binary search followed by a Horner evaluation.
//!
//! ```
//! use pairtab::tabulate::{Tabulator, TabulatorConfig};
//!
//! let config = TabulatorConfig::default().with_range(1.0, 50.0).with_tolerance(0.01);
//! let table = Tabulator::new(config).generate(&|rsq: f64| 1.0 / rsq.sqrt())?;
//! assert!((table.eval(625.0) - 1.0 / 25.0).abs() < 0.01);
//! # Ok::<(), pairtab::tabulate::TabulateError>(())
//! ```

#[cfg(test)]
extern crate approx;

/// A point in 3D space
pub type Vector3 = nalgebra::Vector3<f64>;

pub mod tabulate;
pub mod twobody;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Defines a cutoff distance
pub trait Cutoff {
    /// Squared cutoff distance
    fn cutoff_squared(&self) -> f64 {
        self.cutoff().powi(2)
    }

    /// Cutoff distance
    fn cutoff(&self) -> f64;

    /// Distance below which the interaction is not meaningfully defined (default: 0)
    fn lower_cutoff(&self) -> f64 {
        0.0
    }
}

/// Combination rules for mixing epsilon and sigma values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum CombinationRule {
    /// The Lorentz-Berthelot combination rule (geometric mean on epsilon, arithmetic mean on sigma)
    LorentzBerthelot,
    /// The Fender-Halsey combination rule (harmonic mean on epsilon, arithmetic mean on sigma)
    FenderHalsey,
}

impl CombinationRule {
    /// Combines epsilon and sigma pairs using the selected combination rule
    pub fn mix(&self, epsilons: (f64, f64), sigmas: (f64, f64)) -> (f64, f64) {
        let epsilon = match self {
            Self::LorentzBerthelot => (epsilons.0 * epsilons.1).sqrt(),
            Self::FenderHalsey => 2.0 * epsilons.0 * epsilons.1 / (epsilons.0 + epsilons.1),
        };
        let sigma = 0.5 * (sigmas.0 + sigmas.1);
        (epsilon, sigma)
    }
}

/// Transform x^2 --> x when serializing
#[cfg(feature = "serde")]
fn sqrt_serialize<S>(x: &f64, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_f64(x.sqrt())
}

/// Transform x --> x^2 when deserializing
#[cfg(feature = "serde")]
fn square_deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(f64::deserialize(deserializer)?.powi(2))
}

#[test]
fn test_combination_rules() {
    use approx::assert_relative_eq;
    let (eps, sigma) = CombinationRule::LorentzBerthelot.mix((1.0, 4.0), (2.0, 4.0));
    assert_relative_eq!(eps, 2.0);
    assert_relative_eq!(sigma, 3.0);
    let (eps, _) = CombinationRule::FenderHalsey.mix((1.0, 4.0), (2.0, 4.0));
    assert_relative_eq!(eps, 1.6);
}
