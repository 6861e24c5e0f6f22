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

//! ## Twobody interactions
//!
//! Pair potentials that can be tabulated, and the tabulated potential itself.

pub use crate::Vector3;
use dyn_clone::DynClone;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::fmt::Debug;

mod coulomb;
mod lennard_jones;
mod tabulated;
pub use self::coulomb::{bjerrum_length, HardSphereCoulomb};
pub use self::lennard_jones::LennardJones;
pub use self::tabulated::{tabulate_potential, TableStats, TabulatedPotential, ValidationResult};

/// Potential energy between a pair of isotropic particles, 𝑈(𝑟)
pub trait IsotropicTwobodyEnergy: Debug + DynClone + Send + Sync {
    /// Interaction energy between a pair of isotropic particles.
    fn isotropic_twobody_energy(&self, distance_squared: f64) -> f64;

    /// Force magnitude due to an isotropic interaction potential, 𝐹(𝑟) = -∇𝑈(𝑟)
    ///
    /// The default implementation uses a central difference to calculate the force
    /// and should be overridden with the exact analytical expression for better speed
    /// and accuracy.
    fn isotropic_twobody_force(&self, distance_squared: f64) -> f64 {
        const EPS: f64 = 1e-6;
        let r = distance_squared.sqrt();
        let delta_u = self.isotropic_twobody_energy((r + EPS).powi(2))
            - self.isotropic_twobody_energy((r - EPS).powi(2));
        -delta_u / (2.0 * EPS)
    }

    /// Force vector along the separation vector, 𝒓, pointing from the second to the first particle
    fn twobody_force_vector(&self, distance: &Vector3) -> Vector3 {
        let r_squared = distance.norm_squared();
        let r_hat = distance / r_squared.sqrt();
        self.isotropic_twobody_force(r_squared) * r_hat
    }
}

dyn_clone::clone_trait_object!(IsotropicTwobodyEnergy);

/// Combine two twobody energy schemes
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Combined<T, U>(T, U);

impl<T: IsotropicTwobodyEnergy, U: IsotropicTwobodyEnergy> Combined<T, U> {
    pub fn new(t: T, u: U) -> Self {
        Self(t, u)
    }
}

impl<T, U> IsotropicTwobodyEnergy for Combined<T, U>
where
    T: IsotropicTwobodyEnergy + Clone,
    U: IsotropicTwobodyEnergy + Clone,
{
    #[inline]
    fn isotropic_twobody_energy(&self, distance_squared: f64) -> f64 {
        self.0.isotropic_twobody_energy(distance_squared)
            + self.1.isotropic_twobody_energy(distance_squared)
    }

    #[inline]
    fn isotropic_twobody_force(&self, distance_squared: f64) -> f64 {
        self.0.isotropic_twobody_force(distance_squared)
            + self.1.isotropic_twobody_force(distance_squared)
    }
}

/// Plain Coulomb potential with a contact wall, combined with Lennard-Jones
pub type CoulombLennardJones = Combined<HardSphereCoulomb, LennardJones>;
