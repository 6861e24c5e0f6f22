use approx::assert_relative_eq;
use pairtab::tabulate::{
    empty_table, extend_full, TabulateError, Tabulator, TabulatorConfig, EMPTY_RSQ_MAX,
    HARD_WALL_ENERGY,
};
use std::cell::Cell;

fn inverse_r(rsq: f64) -> f64 {
    1.0 / rsq.sqrt()
}

#[test]
fn inverse_distance_over_wide_range() {
    let config = TabulatorConfig::default()
        .with_range(1.0, 50.0)
        .with_tolerance(0.01);
    let table = Tabulator::new(config).generate(&inverse_r).unwrap();

    assert!(table.len() > 1);
    assert!(table.is_consistent());
    assert_eq!(table.rsq_min(), 1.0);
    assert_eq!(table.rsq_max(), 2500.0);
    assert_eq!(table.breakpoints().first(), Some(&1.0));
    assert_eq!(table.breakpoints().last(), Some(&2500.0));
    assert_relative_eq!(table.eval(625.0), 1.0 / 25.0, epsilon = 0.01);
    assert_relative_eq!(table.try_eval(625.0).unwrap(), table.eval(625.0));
}

#[test]
fn steep_repulsion_raises_lower_bound() {
    // diverges steeply below r = 2
    let f = |rsq: f64| (4.0 / rsq).powi(8);
    let config = TabulatorConfig::default()
        .with_range(0.5, 10.0)
        .with_tolerance(0.01)
        .with_max_energy(5.0);
    let table = Tabulator::new(config).generate(&f).unwrap();

    // f(z) = 5 at r ≈ 1.81
    let r_min = table.rsq_min().sqrt();
    assert!(r_min > 0.5);
    assert!(r_min < 1.82);
    assert!(f(table.rsq_min()) > 4.99);
    assert_eq!(table.breakpoints()[0], table.rsq_min());
    assert!(table.contains(4.0));
    assert!(!table.contains(0.25));
}

#[test]
fn zero_tolerance_fails_before_sweep() {
    let calls = Cell::new(0usize);
    let f = |rsq: f64| {
        calls.set(calls.get() + 1);
        inverse_r(rsq)
    };
    let config = TabulatorConfig::default().with_tolerance(0.0);
    let error = Tabulator::new(config).generate(&f).unwrap_err();
    assert_eq!(
        error,
        TabulateError::InvalidTolerance {
            name: "utol",
            value: 0.0
        }
    );
    assert!(error.is_configuration_error());
    assert_eq!(calls.get(), 0);
}

#[test]
fn full_extension_covers_all_distances() {
    let config = TabulatorConfig::default()
        .with_range(1.0, 10.0)
        .with_tolerance(1e-3);
    let tabulator = Tabulator::new(config);
    let table = tabulator.generate(&inverse_r).unwrap();
    let full = tabulator.generate_full(&inverse_r).unwrap();

    assert_eq!(full, extend_full(table.clone()));
    assert_eq!(full.len(), table.len() + 2);
    assert_eq!(full.rsq_min(), 0.0);
    assert_eq!(full.rsq_max(), f64::INFINITY);
    assert!(full.contains(1e300));

    assert_eq!(full.eval(0.0), HARD_WALL_ENERGY);
    assert_eq!(full.eval(0.5), HARD_WALL_ENERGY);
    assert_eq!(full.eval(table.rsq_min()), HARD_WALL_ENERGY);
    assert_eq!(full.eval(table.rsq_max()), 0.0);
    assert_eq!(full.eval(f64::INFINITY), 0.0);
    assert_eq!(full.try_eval(f64::INFINITY), Ok(0.0));
    assert_eq!(full.eval(100.0), 0.0);
    assert_eq!(full.eval(1e12), 0.0);
    assert_eq!(full.eval_derivative(0.5), 0.0);
    assert_eq!(full.eval(4.0), table.eval(4.0));
    assert_relative_eq!(full.eval(4.0), 0.5, epsilon = 1e-3);
}

#[test]
fn empty_table_is_zero() {
    let table = empty_table();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rsq_max(), EMPTY_RSQ_MAX);
    for x in [0.0, 1.0, 1e5, 1e9] {
        assert_eq!(table.eval(x), 0.0);
        assert_eq!(table.try_eval_derivative(x).unwrap(), 0.0);
    }
    assert!(matches!(
        table.try_eval(2e10),
        Err(TabulateError::OutOfDomain { .. })
    ));
}

#[test]
fn construction_is_deterministic() {
    let config = TabulatorConfig::default()
        .with_range(0.9, 3.0)
        .with_tolerance(1e-4)
        .with_derivative_tolerance(1e-2);
    let lj = |rsq: f64| {
        let x = (1.0 / rsq).powi(3);
        4.0 * (x * x - x)
    };
    let first = Tabulator::new(config.clone()).generate(&lj).unwrap();
    let second = Tabulator::new(config).generate(&lj).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.coefficients(), second.coefficients());
}
