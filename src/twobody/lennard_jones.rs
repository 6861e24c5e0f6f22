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

use crate::twobody::IsotropicTwobodyEnergy;
#[cfg(feature = "serde")]
use crate::{sqrt_serialize, square_deserialize};
use crate::{CombinationRule, Cutoff};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lennard-Jones potential
///
/// $$ u(r) = 4\epsilon_{ij} \left [\left (\frac{\sigma_{ij}}{r}\right )^{12} - \left (\frac{\sigma_{ij}}{r}\right )^6 \right ]$$
///
/// Originally by J. E. Lennard-Jones, see
/// [doi:10/cqhgm7](https://dx.doi.org/10/cqhgm7) or
/// [Wikipedia](https://en.wikipedia.org/wiki/Lennard-Jones_potential).
///
/// # Examples:
/// ~~~
/// use pairtab::twobody::*;
/// let (epsilon, sigma) = (1.5, 2.0);
/// let lj = LennardJones::new(epsilon, sigma);
/// let (r_min, u_min) = (f64::powf(2.0, 1.0 / 6.0) * sigma, -epsilon);
/// assert!((lj.isotropic_twobody_energy(r_min.powi(2)) - u_min).abs() < 1e-12);
/// ~~~
#[derive(Debug, Clone, PartialEq, Default, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(deny_unknown_fields)
)]
pub struct LennardJones {
    /// Interaction strength, ε
    #[cfg_attr(feature = "serde", serde(rename = "eps"))]
    epsilon: f64,
    /// Squared diameter, σ²
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "sigma",
            serialize_with = "sqrt_serialize",
            deserialize_with = "square_deserialize"
        )
    )]
    sigma_squared: f64,
}

impl LennardJones {
    pub fn new(epsilon: f64, sigma: f64) -> Self {
        Self {
            epsilon,
            sigma_squared: sigma.powi(2),
        }
    }

    /// Construct using arbitrary combination rule.
    pub fn from_combination_rule(
        rule: CombinationRule,
        epsilons: (f64, f64),
        sigmas: (f64, f64),
    ) -> Self {
        let (epsilon, sigma) = rule.mix(epsilons, sigmas);
        Self::new(epsilon, sigma)
    }

    /// Diameter, σ
    pub fn sigma(&self) -> f64 {
        self.sigma_squared.sqrt()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Cutoff for LennardJones {
    fn cutoff(&self) -> f64 {
        f64::INFINITY
    }
    fn cutoff_squared(&self) -> f64 {
        f64::INFINITY
    }
}

impl IsotropicTwobodyEnergy for LennardJones {
    #[inline]
    fn isotropic_twobody_energy(&self, distance_squared: f64) -> f64 {
        let x = self.sigma_squared / distance_squared; // σ²/r²
        let x = x * x * x; // σ⁶/r⁶
        4.0 * self.epsilon * (x * x - x)
    }

    #[inline]
    fn isotropic_twobody_force(&self, distance_squared: f64) -> f64 {
        let x = (self.sigma_squared / distance_squared).powi(3); // σ⁶/r⁶
        24.0 * self.epsilon * (2.0 * x * x - x) / distance_squared.sqrt()
    }
}
