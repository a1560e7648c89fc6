//! grid_sweep — the reference policy sweep over fleet size and booking
//! friction, run in parallel.
//!
//! Usage: `grid_sweep [num_threads]`.  Writes `model_runs.csv` and
//! `final_summary.csv` under `output/grid_sweep`.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use ca_experiments::{ParameterGrid, run_grid, summarize_final, write_results};
use ca_output::MetricsCsvWriter;

const OUTPUT_DIR: &str = "output/grid_sweep";

fn main() -> Result<()> {
    env_logger::init();

    let num_threads = std::env::args()
        .nth(1)
        .map(|s| s.parse::<usize>().with_context(|| format!("invalid thread count {s:?}")))
        .transpose()?;

    // 1. Expand the grid.
    let grid = ParameterGrid::reference();
    let sets = grid.expand();
    println!("=== grid_sweep — carshare_abm ===");
    println!(
        "Scenarios: {}  |  Runs: {}  |  Households: {}  |  Steps: {}",
        grid.scenario_count(),
        sets.len(),
        grid.base.population_size,
        grid.base.step_count
    );
    println!();

    // 2. Run in parallel.
    let t0 = Instant::now();
    let results = run_grid(&sets, num_threads)?;
    println!("Sweep complete in {:.3} s", t0.elapsed().as_secs_f64());

    // 3. Write output.
    let mut writer = MetricsCsvWriter::new(Path::new(OUTPUT_DIR))?;
    write_results(&results, &mut writer)?;
    info!("wrote {} runs to {OUTPUT_DIR}", results.len());
    println!("  {OUTPUT_DIR}/model_runs.csv");
    println!("  {OUTPUT_DIR}/final_summary.csv");
    println!();

    // 4. Mean final adoption per (fleet, friction).
    println!("{:<8} {:>9} {:>10} {:>10}", "Cars", "Friction", "Adoption", "Failed");
    println!("{}", "-".repeat(40));
    for s in summarize_final(&results) {
        println!(
            "{:<8} {:>9.1} {:>10.3} {:>10.3}",
            s.fleet_capacity, s.booking_friction, s.mean_adoption_rate, s.mean_failed_booking_rate
        );
    }

    Ok(())
}
