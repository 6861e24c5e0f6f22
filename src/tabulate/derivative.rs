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

use super::quintic::Endpoint;
use super::TabulationTarget;

/// Central finite difference derivatives with a fixed step, h.
///
/// # Examples
/// ```
/// use pairtab::tabulate::CentralDifference;
/// let diff = CentralDifference::new(1e-4);
/// let f = |x: f64| x * x * x;
/// assert!((diff.first(&f, 2.0) - 12.0).abs() < 1e-6);
/// assert!((diff.second(&f, 2.0) - 12.0).abs() < 1e-3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentralDifference {
    step: f64,
}

impl CentralDifference {
    pub const fn new(step: f64) -> Self {
        Self { step }
    }

    /// First derivative, (f(x + h/2) - f(x - h/2)) / h
    #[inline]
    pub fn first<F: TabulationTarget + ?Sized>(&self, f: &F, x: f64) -> f64 {
        let half = 0.5 * self.step;
        (f.evaluate(x + half) - f.evaluate(x - half)) / self.step
    }

    /// Second derivative as the central difference of the first derivative
    #[inline]
    pub fn second<F: TabulationTarget + ?Sized>(&self, f: &F, x: f64) -> f64 {
        let half = 0.5 * self.step;
        (self.first(f, x + half) - self.first(f, x - half)) / self.step
    }

    /// Value, first and second derivative at `x`
    pub fn endpoint<F: TabulationTarget + ?Sized>(&self, f: &F, x: f64) -> Endpoint {
        Endpoint {
            value: f.evaluate(x),
            first: self.first(f, x),
            second: self.second(f, x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial_derivatives() {
        let diff = CentralDifference::new(1e-4);
        let f = |x: f64| 3.0 * x * x - 2.0 * x + 1.0;
        assert_relative_eq!(diff.first(&f, 1.5), 7.0, epsilon = 1e-8);
        assert_relative_eq!(diff.second(&f, 1.5), 6.0, epsilon = 1e-4);
    }

    #[test]
    fn test_endpoint() {
        let diff = CentralDifference::new(1e-4);
        let f = |x: f64| 1.0 / x;
        let end = diff.endpoint(&f, 2.0);
        assert_relative_eq!(end.value, 0.5);
        assert_relative_eq!(end.first, -0.25, epsilon = 1e-7);
        assert_relative_eq!(end.second, 0.25, epsilon = 1e-4);
    }
}
