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

//! Tolerances and range for table construction.

use super::error::{Result, TabulateError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Accuracy requirements for a table.
///
/// Only the energy tolerance is mandatory. The other three are disabled
/// when `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(deny_unknown_fields)
)]
pub struct Tolerances {
    /// Maximum absolute deviation of the tabulated value (default: 0.01)
    #[cfg_attr(feature = "serde", serde(rename = "utol"))]
    pub energy: f64,
    /// Maximum absolute deviation of the tabulated first derivative
    #[cfg_attr(feature = "serde", serde(rename = "ftol", default))]
    pub derivative: Option<f64>,
    /// Values larger than this mark the region as repulsive and stop the tabulation
    #[cfg_attr(feature = "serde", serde(rename = "umaxtol", default))]
    pub max_energy: Option<f64>,
    /// Second value ceiling, paired with `ftol`.
    ///
    /// Like `max_energy`, it is compared against the magnitude of the fitted value.
    #[cfg_attr(feature = "serde", serde(rename = "fmaxtol", default))]
    pub max_derivative: Option<f64>,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            energy: 0.01,
            derivative: None,
            max_energy: None,
            max_derivative: None,
        }
    }
}

impl Tolerances {
    /// Check that all enabled tolerances are strictly positive
    pub fn validate(&self) -> Result<()> {
        let positive = |name, value: f64| {
            if value > 0.0 {
                Ok(())
            } else {
                Err(TabulateError::InvalidTolerance { name, value })
            }
        };
        positive("utol", self.energy)?;
        [
            ("ftol", self.derivative),
            ("umaxtol", self.max_energy),
            ("fmaxtol", self.max_derivative),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .try_for_each(|(name, value)| positive(name, value))
    }
}

/// Configuration for table construction.
///
/// The range is given in distances, r, while the table itself is built
/// in squared distances.
///
/// # Examples
/// ```
/// use pairtab::tabulate::TabulatorConfig;
/// let config = TabulatorConfig::default()
///     .with_range(2.0, 30.0)
///     .with_tolerance(1e-3)
///     .with_max_energy(50.0);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.rsq_range(), (4.0, 900.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(deny_unknown_fields)
)]
pub struct TabulatorConfig {
    /// Lower bound of the distance (default: 0.5)
    pub rmin: f64,
    /// Upper bound of the distance (default: 20.0)
    pub rmax: f64,
    /// Accuracy requirements
    #[cfg_attr(feature = "serde", serde(default))]
    pub tolerances: Tolerances,
    /// Step used for finite difference derivatives (default: 1e-4)
    #[cfg_attr(feature = "serde", serde(rename = "numdr", default = "default_step"))]
    pub step: f64,
}

/// Default finite difference step
pub(crate) const fn default_step() -> f64 {
    1.0e-4
}

impl Default for TabulatorConfig {
    fn default() -> Self {
        Self {
            rmin: 0.5,
            rmax: 20.0,
            tolerances: Tolerances::default(),
            step: default_step(),
        }
    }
}

impl TabulatorConfig {
    /// Set the distance range, [rmin, rmax]
    pub fn with_range(mut self, rmin: f64, rmax: f64) -> Self {
        self.rmin = rmin;
        self.rmax = rmax;
        self
    }

    /// Set the mandatory tolerance on the tabulated value
    pub fn with_tolerance(mut self, energy: f64) -> Self {
        self.tolerances.energy = energy;
        self
    }

    /// Also require the first derivative to be within `tolerance`
    pub fn with_derivative_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerances.derivative = Some(tolerance);
        self
    }

    /// Stop tabulation once the magnitude of the value exceeds `max_energy`
    pub fn with_max_energy(mut self, max_energy: f64) -> Self {
        self.tolerances.max_energy = Some(max_energy);
        self
    }

    /// Stop tabulation once the magnitude of the derivative exceeds `max_derivative`
    pub fn with_max_derivative(mut self, max_derivative: f64) -> Self {
        self.tolerances.max_derivative = Some(max_derivative);
        self
    }

    /// Set all tolerances at once
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Set the finite difference step
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Range in squared distances, (rmin², rmax²)
    pub fn rsq_range(&self) -> (f64, f64) {
        (self.rmin * self.rmin, self.rmax * self.rmax)
    }

    /// Check range, step and tolerances.
    ///
    /// Called before any tabulation work is done.
    pub fn validate(&self) -> Result<()> {
        let finite = self.rmin.is_finite() && self.rmax.is_finite();
        if !finite || self.rmin < 0.0 || self.rmin >= self.rmax {
            return Err(TabulateError::InvalidRange {
                rmin: self.rmin,
                rmax: self.rmax,
            });
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(TabulateError::InvalidStep { step: self.step });
        }
        self.tolerances.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TabulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tolerances.energy, 0.01);
        assert!(config.tolerances.derivative.is_none());
    }

    #[test]
    fn test_zero_tolerance() {
        let config = TabulatorConfig::default().with_tolerance(0.0);
        assert_eq!(
            config.validate(),
            Err(TabulateError::InvalidTolerance {
                name: "utol",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_secondary_tolerances() {
        let config = TabulatorConfig::default().with_derivative_tolerance(-1.0);
        assert!(matches!(
            config.validate(),
            Err(TabulateError::InvalidTolerance { name: "ftol", .. })
        ));
        let config = TabulatorConfig::default().with_max_energy(0.0);
        assert!(matches!(
            config.validate(),
            Err(TabulateError::InvalidTolerance {
                name: "umaxtol",
                ..
            })
        ));
        let config = TabulatorConfig::default().with_max_derivative(-2.0);
        assert!(config.validate().unwrap_err().is_configuration_error());
        let config = TabulatorConfig::default()
            .with_derivative_tolerance(0.1)
            .with_max_energy(10.0)
            .with_max_derivative(100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_range() {
        for (rmin, rmax) in [(2.0, 1.0), (1.0, 1.0), (-1.0, 1.0), (0.0, f64::INFINITY)] {
            let config = TabulatorConfig::default().with_range(rmin, rmax);
            assert_eq!(
                config.validate(),
                Err(TabulateError::InvalidRange { rmin, rmax })
            );
        }
        assert!(matches!(
            TabulatorConfig::default().with_range(f64::NAN, 1.0).validate(),
            Err(TabulateError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_invalid_step() {
        let config = TabulatorConfig::default().with_step(0.0);
        assert_eq!(
            config.validate(),
            Err(TabulateError::InvalidStep { step: 0.0 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize() {
        let config: TabulatorConfig =
            serde_json::from_str(r#"{"rmin": 1.0, "rmax": 10.0, "tolerances": {"utol": 0.001, "umaxtol": 100.0}}"#)
                .unwrap();
        assert_eq!(config.rmin, 1.0);
        assert_eq!(config.tolerances.energy, 0.001);
        assert_eq!(config.tolerances.max_energy, Some(100.0));
        assert_eq!(config.tolerances.derivative, None);
        assert_eq!(config.step, 1e-4);

        let json = serde_json::to_string(&config).unwrap();
        let back: TabulatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        assert!(serde_json::from_str::<TabulatorConfig>(r#"{"rmin": 1.0, "rmax": 2.0, "foo": 1}"#).is_err());
    }
}
