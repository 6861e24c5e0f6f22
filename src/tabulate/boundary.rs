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

//! Behavior outside the tabulated range.

use super::quintic::QuinticCoeffs;
use super::table::Table;
use std::iter;

/// Constant value assigned below the tabulated range by [`extend_full`]
pub const HARD_WALL_ENERGY: f64 = 100000.0;

/// Upper bound of the table returned by [`empty_table`]
pub const EMPTY_RSQ_MAX: f64 = 1e10;

/// Extend a table to cover [0, ∞).
///
/// At and below the original minimum a single interval with the constant
/// [`HARD_WALL_ENERGY`] is inserted; at and above the original maximum a zero interval
/// extends to infinity. If the table already starts at zero, no wall is inserted.
///
/// # Examples
/// ```
/// use pairtab::tabulate::{extend_full, Tabulator, TabulatorConfig, HARD_WALL_ENERGY};
/// let config = TabulatorConfig::default().with_range(1.0, 3.0);
/// let table = Tabulator::new(config).generate(&|rsq: f64| 9.0 - rsq)?;
/// let table = extend_full(table);
/// assert_eq!(table.eval(0.5), HARD_WALL_ENERGY);
/// assert_eq!(table.eval(1.0), HARD_WALL_ENERGY);
/// assert_eq!(table.eval(10.0), 0.0);
/// # Ok::<(), pairtab::tabulate::TabulateError>(())
/// ```
pub fn extend_full(table: Table) -> Table {
    let first = table.breakpoints()[0];
    let wall = (first > 0.0).then_some((
        0.0,
        QuinticCoeffs([HARD_WALL_ENERGY, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ));

    let rsq = wall
        .iter()
        .map(|(rsq, _)| *rsq)
        .chain(table.breakpoints().iter().copied())
        .chain(iter::once(f64::INFINITY))
        .collect();

    let tabulated = (0..table.len()).filter_map(|i| table.interval(i));
    let intervals = wall
        .map(|(_, c)| c)
        .into_iter()
        .chain(tabulated)
        .chain(iter::once(QuinticCoeffs::default()));

    let extended = Table::from_intervals(rsq, intervals, 0.0, f64::INFINITY);
    if wall.is_some() {
        extended.with_hard_wall()
    } else {
        extended
    }
}

/// A table that is zero everywhere in [0, [`EMPTY_RSQ_MAX`]].
///
/// Use for pairs that should not interact, without running any tabulation.
pub fn empty_table() -> Table {
    Table::from_intervals(
        vec![0.0, EMPTY_RSQ_MAX],
        iter::once(QuinticCoeffs::default()),
        0.0,
        EMPTY_RSQ_MAX,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_table() -> Table {
        Table::from_intervals(
            vec![1.0, 2.0, 4.0],
            [
                QuinticCoeffs([3.0, -1.0, 0.0, 0.0, 0.0, 0.0]),
                QuinticCoeffs([2.0, -1.0, 0.0, 0.0, 0.0, 0.0]),
            ],
            1.0,
            4.0,
        )
    }

    #[test]
    fn test_empty_table() {
        let table = empty_table();
        assert!(table.is_consistent());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rsq_min(), 0.0);
        assert_eq!(table.rsq_max(), EMPTY_RSQ_MAX);
        for x in [0.0, 1e-6, 1.0, 123.4, 1e8, EMPTY_RSQ_MAX] {
            assert_eq!(table.eval(x), 0.0);
            assert_eq!(table.eval_derivative(x), 0.0);
        }
    }

    #[test]
    fn test_extend_full() {
        let table = extend_full(linear_table());
        assert!(table.is_consistent());
        assert_eq!(table.len(), 4);
        assert_eq!(table.breakpoints(), &[0.0, 1.0, 2.0, 4.0, f64::INFINITY]);
        assert_eq!(table.rsq_min(), 0.0);
        assert_eq!(table.rsq_max(), f64::INFINITY);

        for x in [0.0, 0.3, 0.999, 1.0] {
            assert_eq!(table.eval(x), HARD_WALL_ENERGY);
            assert_eq!(table.eval_derivative(x), 0.0);
        }
        assert!((table.eval(1.0 + 1e-9) - 3.0).abs() < 1e-8);
        assert_eq!(table.eval(1.5), 2.5);
        assert_eq!(table.eval(3.0), 1.0);
        for x in [4.0, 4.5, 1e6, 1e300, f64::INFINITY] {
            assert_eq!(table.eval(x), 0.0);
            assert_eq!(table.try_eval(x), Ok(0.0));
        }
    }

    #[test]
    fn test_extend_full_from_zero() {
        let table = Table::from_intervals(
            vec![0.0, 2.0],
            [QuinticCoeffs([1.0, 0.0, 0.0, 0.0, 0.0, 0.0])],
            0.0,
            2.0,
        );
        let table = extend_full(table);
        assert_eq!(table.breakpoints(), &[0.0, 2.0, f64::INFINITY]);
        assert_eq!(table.eval(0.0), 1.0);
        assert_eq!(table.eval(2.0), 0.0);
        assert_eq!(table.eval(3.0), 0.0);
    }
}
