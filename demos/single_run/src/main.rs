//! single_run — one carshare_abm run with the default (or a JSON) config.
//!
//! Usage: `single_run [config.json]`.  Fields missing from the JSON keep
//! their defaults.  Set `RUST_LOG=info` for progress lines.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use ca_core::{ModelConfig, Step};
use ca_output::{MetricsCsvWriter, MetricsObserver, OutputWriter, RunTag};
use ca_sim::{LogObserver, MetricsRecord, SimBuilder, SimObserver};

const OUTPUT_DIR:   &str  = "output/single_run";
const LOG_INTERVAL: u64   = 10;
const TAIL_ROWS:    usize = 10;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Streams records to CSV and to the log.
struct DemoObserver<W: OutputWriter> {
    output: MetricsObserver<W>,
    log:    LogObserver,
}

impl<W: OutputWriter> SimObserver for DemoObserver<W> {
    fn on_record(&mut self, record: &MetricsRecord) {
        self.output.on_record(record);
        self.log.on_record(record);
    }

    fn on_sim_end(&mut self, final_step: Step) {
        self.output.on_sim_end(final_step);
        self.log.on_sim_end(final_step);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<String>) -> Result<ModelConfig> {
    let Some(path) = path else {
        return Ok(ModelConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    // 1. Configuration.
    let config = load_config(std::env::args().nth(1))?;
    println!("=== single_run — carshare_abm ===");
    println!(
        "Households: {}  |  Shared cars: {}  |  Steps: {}  |  Seed: {}",
        config.population_size, config.fleet_capacity, config.step_count, config.seed
    );
    println!(
        "Price: {}  |  Booking fail: {}  |  Friction: {}  |  Drop ownership: {}",
        config.access_price, config.booking_fail_prob, config.booking_friction, config.drop_ownership_prob
    );
    println!();

    // 2. Build the engine (validates the config).
    let sim = SimBuilder::new(config.clone()).build()?;
    info!("population mix: {:?}", sim.population().archetype_counts());

    // 3. Output.
    let writer = MetricsCsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = DemoObserver {
        output: MetricsObserver::new(writer, RunTag::single(config.seed)),
        log:    LogObserver::new(LOG_INTERVAL),
    };

    // 4. Run.
    let t0 = Instant::now();
    let records = sim.run_to_end(&mut obs);
    let elapsed = t0.elapsed();
    if let Some(e) = obs.output.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  {OUTPUT_DIR}/model_runs.csv : {} rows", obs.output.rows_written());
    println!();

    // 5. Tail of the series.
    println!("{:<6} {:>10} {:>10} {:>10}", "Step", "Adoption", "Owning", "Failed");
    println!("{}", "-".repeat(39));
    let skip = records.len().saturating_sub(TAIL_ROWS);
    for r in &records[skip..] {
        println!(
            "{:<6} {:>10.3} {:>10.3} {:>10.3}",
            r.step, r.adoption_rate, r.ownership_rate, r.failed_booking_rate
        );
    }

    Ok(())
}
