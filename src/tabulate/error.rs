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

use thiserror::Error;

/// Errors from configuring, building or querying a table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabulateError {
    #[error("tolerance `{name}` must be positive, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("invalid range: need finite 0 <= rmin < rmax, got rmin={rmin}, rmax={rmax}")]
    InvalidRange { rmin: f64, rmax: f64 },

    #[error("finite difference step must be positive and finite, got {step}")]
    InvalidStep { step: f64 },

    #[error("tolerance not reached at r={r} after {attempts} attempts; try to increase the tolerances")]
    ToleranceUnachievable { r: f64, attempts: usize },

    #[error("more than {max_intervals} intervals needed; try to increase the tolerances")]
    GridBudgetExceeded { max_intervals: usize },

    #[error("{x} is outside the tabulated range [{min}, {max}]")]
    OutOfDomain { x: f64, min: f64, max: f64 },
}

impl TabulateError {
    /// True for errors raised while validating the configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTolerance { .. } | Self::InvalidRange { .. } | Self::InvalidStep { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TabulateError>;
