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

//! Coulomb interaction with a hard-sphere contact wall.

use super::IsotropicTwobodyEnergy;
use crate::Cutoff;
#[cfg(feature = "serde")]
use crate::{sqrt_serialize, square_deserialize};
use physical_constants::{BOLTZMANN_CONSTANT, ELEMENTARY_CHARGE, VACUUM_ELECTRIC_PERMITTIVITY};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Bjerrum length, lB = e²/4πε₀εᵣkT (Å).
///
/// # Examples
/// ```
/// use pairtab::twobody::bjerrum_length;
/// let lb = bjerrum_length(298.15, 80.0);
/// assert!((lb - 7.0057).abs() < 1e-3);
/// ```
pub fn bjerrum_length(temperature: f64, relative_permittivity: f64) -> f64 {
    ELEMENTARY_CHARGE * ELEMENTARY_CHARGE * 1e10
        / (4.0 * PI * VACUUM_ELECTRIC_PERMITTIVITY * relative_permittivity * BOLTZMANN_CONSTANT * temperature)
}

/// Coulomb potential between two charges plus a hard-sphere wall, in units of kT:
///
/// $$ \beta u(r) = l_B \frac{z_i z_j}{r}, \quad r \geq \sigma $$
///
/// and a constant [`HardSphereCoulomb::CONTACT_ENERGY`] for r < σ.
///
/// # Examples
/// ```
/// use pairtab::twobody::{HardSphereCoulomb, IsotropicTwobodyEnergy};
/// let pot = HardSphereCoulomb::new(-1.0, 7.0, 4.0);
/// assert_eq!(pot.isotropic_twobody_energy(7.0 * 7.0), -1.0);
/// assert_eq!(pot.isotropic_twobody_energy(3.0 * 3.0), HardSphereCoulomb::CONTACT_ENERGY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(deny_unknown_fields)
)]
pub struct HardSphereCoulomb {
    /// Product of the two charge numbers, zᵢzⱼ
    #[cfg_attr(feature = "serde", serde(rename = "z1z2"))]
    charge_product: f64,
    /// Bjerrum length (Å)
    #[cfg_attr(feature = "serde", serde(rename = "bjerrum"))]
    bjerrum_length: f64,
    /// Squared contact distance, σ²
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "σ",
            serialize_with = "sqrt_serialize",
            deserialize_with = "square_deserialize"
        )
    )]
    contact_distance_squared: f64,
}

impl HardSphereCoulomb {
    /// Energy (kT) for overlapping particles
    pub const CONTACT_ENERGY: f64 = 200.0;

    pub fn new(charge_product: f64, bjerrum_length: f64, contact_distance: f64) -> Self {
        Self {
            charge_product,
            bjerrum_length,
            contact_distance_squared: contact_distance.powi(2),
        }
    }
}

impl IsotropicTwobodyEnergy for HardSphereCoulomb {
    #[inline]
    fn isotropic_twobody_energy(&self, distance_squared: f64) -> f64 {
        if distance_squared < self.contact_distance_squared {
            Self::CONTACT_ENERGY
        } else {
            self.bjerrum_length * self.charge_product / distance_squared.sqrt()
        }
    }

    #[inline]
    fn isotropic_twobody_force(&self, distance_squared: f64) -> f64 {
        if distance_squared < self.contact_distance_squared {
            0.0
        } else {
            self.bjerrum_length * self.charge_product / distance_squared
        }
    }
}

impl Cutoff for HardSphereCoulomb {
    fn cutoff(&self) -> f64 {
        f64::INFINITY
    }
    fn lower_cutoff(&self) -> f64 {
        self.contact_distance_squared.sqrt()
    }
}
