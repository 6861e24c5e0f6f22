//! Compare tolerances for tabulated potentials.
//!
//! This example tabulates a Lennard-Jones + Coulomb potential at different
//! energy tolerances and reports the table size and accuracy of each.
//!
//! Run with: `cargo run --example table_compare`
//! Set `RUST_LOG=pairtab=debug` to see the partitioning.

use anyhow::Result;
use pairtab::tabulate::TabulatorConfig;
use pairtab::twobody::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Lennard-Jones parameters
    let epsilon = 0.5; // kT
    let sigma = 3.0; // Å
    let lj = LennardJones::new(epsilon, sigma);

    // Coulomb parameters
    let charge_product = -1.0; // e²
    let bjerrum = bjerrum_length(298.15, 80.0);
    let coulomb = HardSphereCoulomb::new(charge_product, bjerrum, 0.8 * sigma);

    let combined = Combined::new(lj, coulomb);
    let (rmin, rmax) = (0.9 * sigma, 30.0);

    let tolerances = [1e-2, 1e-3, 1e-4, 1e-5];
    let tables = tolerances
        .iter()
        .map(|&tol| {
            let config = TabulatorConfig::default()
                .with_range(rmin, rmax)
                .with_tolerance(tol);
            TabulatedPotential::new(&combined, config)
        })
        .collect::<Result<Vec<_>, _>>()?;

    println!();
    println!(
        "Lennard-Jones: ε={:.1} kT, σ={:.1} Å; Coulomb: z₁z₂={:.1}, lB={:.2} Å",
        epsilon, sigma, charge_product, bjerrum
    );
    println!("Range: {:.1} Å to {:.1} Å", rmin, rmax);
    println!();
    println!(
        "{:>10} {:>10} {:>10} {:>12} {:>12}",
        "tolerance", "intervals", "bytes", "max abs", "max rel"
    );

    for (tol, table) in tolerances.iter().zip(&tables) {
        let stats = table.stats();
        let validation = table.validate(&combined, 5000);
        println!(
            "{:>10.0e} {:>10} {:>10} {:>12.2e} {:>12.2e}",
            tol,
            stats.n_intervals,
            stats.memory_bytes,
            validation.max_abs_error,
            validation.max_rel_error
        );
    }

    println!();
    println!("{:>8} {:>14} {:>14} {:>14}", "r (Å)", "U_exact", "U_table", "F_table");
    let finest = &tables[tables.len() - 1];
    for r in [2.0, 2.7, 3.0, 3.4, 5.0, 10.0, 20.0, 29.9, 35.0] {
        let rsq = r * r;
        println!(
            "{:>8.1} {:>14.6e} {:>14.6e} {:>14.6e}",
            r,
            combined.isotropic_twobody_energy(rsq),
            finest.isotropic_twobody_energy(rsq),
            finest.isotropic_twobody_force(rsq)
        );
    }
    println!();
    Ok(())
}
